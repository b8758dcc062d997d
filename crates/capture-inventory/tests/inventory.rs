// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Capture Inventory Developers
//
// Inventory pass tests.
//
// TESTING LAYERS:
//
// Layer 1 (No hardware required):
//   - A pass either completes or fails with a real platform error code
//   - Stream invariants hold for whatever devices happen to be attached:
//     pre-order grouping, positive discrete dimensions, ordered ranges
//   - Zero attached devices means success with an untouched sink
//
// Layer 3 (Hardware integration - requires at least one capture device):
//   - Full catalogue enumeration via the collector
//
// RUN LAYER 1:
//   cargo test --test inventory
//
// RUN LAYER 3 (on hardware):
//   cargo test --test inventory -- --ignored --nocapture

use capture_inventory::{populate, Format, Inventory, InventorySink};
use serial_test::serial;

/// Records the raw fact stream for invariant checks.
#[derive(Default)]
struct RecordingSink {
    events: Vec<Event>,
}

#[derive(Debug)]
enum Event {
    Device(u32, String),
    Format(Format),
}

impl InventorySink for RecordingSink {
    fn add_device(&mut self, id: u32, name: &str) {
        self.events.push(Event::Device(id, name.to_string()));
    }

    fn add_discrete_format(&mut self, width: u32, height: u32) {
        self.events.push(Event::Format(Format::discrete(width, height)));
    }

    fn add_stepwise_format(
        &mut self,
        min_width: u32,
        max_width: u32,
        step_width: u32,
        min_height: u32,
        max_height: u32,
        step_height: u32,
    ) {
        self.events.push(Event::Format(Format::stepwise(
            min_width, max_width, step_width, min_height, max_height, step_height,
        )));
    }
}

// =============================================================================
// Layer 1: No Hardware Required
// =============================================================================

#[test]
#[serial]
fn test_pass_stream_invariants() {
    let mut sink = RecordingSink::default();
    let result = populate(&mut sink);

    if let Err(err) = result {
        // Hosts without accessible devices (or without a device category on
        // Windows) are a legitimate environment; the error must still carry
        // a real platform code.
        println!("pass ended with error: {} (os code {})", err, err.os_code());
        assert_ne!(err.os_code(), 0);
    }

    // Whatever was streamed before the end of the pass must be pre-order
    // grouped: no format before the first device.
    let mut seen_device = false;
    for event in &sink.events {
        match event {
            Event::Device(_, _) => seen_device = true,
            Event::Format(format) => {
                assert!(seen_device, "format streamed before any device: {:?}", format);
                match *format {
                    Format::Discrete { width, height } => {
                        assert!(width > 0, "discrete width must be positive");
                        assert!(height > 0, "discrete height must be positive");
                    }
                    Format::Stepwise {
                        min_width,
                        max_width,
                        step_width,
                        min_height,
                        max_height,
                        step_height,
                    } => {
                        assert!(min_width <= max_width);
                        assert!(min_height <= max_height);
                        assert!(step_width > 0, "step width must be positive");
                        assert!(step_height > 0, "step height must be positive");
                    }
                }
            }
        }
    }

    // Zero attached capture devices is success with no sink calls at all.
    if sink.events.is_empty() {
        println!("no capture devices attached");
    }
}

#[test]
#[serial]
fn test_collector_groups_the_same_stream() {
    let mut sink = RecordingSink::default();
    if populate(&mut sink).is_err() {
        return;
    }

    let device_count = sink
        .events
        .iter()
        .filter(|event| matches!(event, Event::Device(_, _)))
        .count();

    match Inventory::get() {
        Ok(inventory) => {
            // Device ids are stable within a pass; back-to-back passes on an
            // idle host should agree on the device list.
            assert_eq!(inventory.devices().len(), device_count);
            for device in inventory.devices() {
                for format in &device.formats {
                    if let Format::Discrete { width, height } = format {
                        assert!(*width > 0 && *height > 0);
                    }
                }
            }
        }
        Err(err) => println!("second pass failed: {}", err),
    }
}

// =============================================================================
// Layer 3: Hardware Integration (Requires capture devices)
// =============================================================================

#[test]
#[ignore = "requires at least one attached capture device"]
#[serial]
fn test_enumerate_hardware_catalogue() {
    let _ = env_logger::builder().is_test(true).try_init();

    let inventory = Inventory::get().expect("inventory pass failed");
    assert!(
        !inventory.devices().is_empty(),
        "expected at least one capture device"
    );

    for device in inventory.devices() {
        println!("Device {}: {}", device.id, device.name);
        assert!(
            !device.formats.is_empty(),
            "capture device reported no formats"
        );
        for format in &device.formats {
            println!("  {}", format);
        }
    }
}
