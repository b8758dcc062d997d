// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Capture Inventory Developers

//! Inventory fact stream boundary.
//!
//! The enumeration engine reports its findings as a flat stream of calls
//! on an [`InventorySink`]: each device is announced once, followed by the
//! formats belonging to it, before the next device. The engine itself does
//! not deduplicate or group anything; the [`Inventory`] collector in this
//! module provides the grouped, duplicate-free view most callers want.

use crate::inventory;
use crate::{Error, Format};

/// Receiver for the flat (device, formats...) fact stream of one
/// inventory pass.
///
/// Calls arrive in pre-order: `add_device` for a device, then one
/// `add_discrete_format`/`add_stepwise_format` call per format that
/// device supports, then the next `add_device`. The sink is invoked
/// synchronously inline and must not block the pass.
pub trait InventorySink {
    /// A capture device was discovered. `id` is stable only within the
    /// current pass: the device node number on Linux (not necessarily
    /// contiguous), the enumeration position on Windows.
    fn add_device(&mut self, id: u32, name: &str);

    /// The most recently added device supports one exact resolution.
    fn add_discrete_format(&mut self, width: u32, height: u32);

    /// The most recently added device supports a stepwise range of
    /// resolutions.
    fn add_stepwise_format(
        &mut self,
        min_width: u32,
        max_width: u32,
        step_width: u32,
        min_height: u32,
        max_height: u32,
        step_height: u32,
    );

    /// Routes a normalized [`Format`] to the matching callback. Used by
    /// the enumeration backends; sinks only implement the methods above.
    fn add_format(&mut self, format: Format) {
        match format {
            Format::Discrete { width, height } => self.add_discrete_format(width, height),
            Format::Stepwise {
                min_width,
                max_width,
                step_width,
                min_height,
                max_height,
                step_height,
            } => self.add_stepwise_format(
                min_width, max_width, step_width, min_height, max_height, step_height,
            ),
        }
    }
}

/// A video capture device together with the formats it supports.
#[derive(Debug, Clone)]
pub struct Device {
    /// Identifier to pass to a capture API when opening the device.
    pub id: u32,
    /// Device name as reported by the operating system.
    pub name: String,
    /// Supported formats in device-reported order, same-size duplicates
    /// removed.
    pub formats: Vec<Format>,
}

/// Collecting sink: builds the grouped device list from the fact stream.
///
/// Devices keep their reported order. A format whose dimensions duplicate
/// one already recorded for the same device is dropped; drivers commonly
/// report the same frame size once per pixel format.
///
/// # Example
///
/// ```no_run
/// use capture_inventory::Inventory;
///
/// let inventory = Inventory::get()?;
/// println!("{} capture devices", inventory.devices().len());
/// # Ok::<(), capture_inventory::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct Inventory {
    devices: Vec<Device>,
}

impl Inventory {
    /// Create an empty inventory, ready to be used as a sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one full pass on the current platform and return the grouped
    /// result.
    pub fn get() -> Result<Self, Error> {
        let mut inventory = Self::new();
        inventory::populate(&mut inventory)?;
        Ok(inventory)
    }

    /// The devices discovered so far, in enumeration order.
    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    fn push_format(&mut self, format: Format) {
        if let Some(device) = self.devices.last_mut() {
            if !device.formats.contains(&format) {
                device.formats.push(format);
            }
        }
    }
}

impl InventorySink for Inventory {
    fn add_device(&mut self, id: u32, name: &str) {
        self.devices.push(Device {
            id,
            name: name.to_string(),
            formats: Vec::new(),
        });
    }

    fn add_discrete_format(&mut self, width: u32, height: u32) {
        self.push_format(Format::discrete(width, height));
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
        self.push_format(Format::stepwise(
            min_width, max_width, step_width, min_height, max_height, step_height,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn replay(inventory: &mut Inventory) {
        inventory.add_device(0, "Camera A");
        inventory.add_discrete_format(1920, 1080);
        inventory.add_discrete_format(640, 480);
        inventory.add_device(2, "Camera B");
        inventory.add_stepwise_format(320, 1920, 1, 240, 1080, 1);
    }

    #[test]
    fn test_formats_group_under_preceding_device() {
        let mut inventory = Inventory::new();
        replay(&mut inventory);

        let devices = inventory.devices();
        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].name, "Camera A");
        assert_eq!(devices[0].formats.len(), 2);
        assert_eq!(devices[1].id, 2);
        assert_eq!(devices[1].formats, vec![Format::stepwise(320, 1920, 1, 240, 1080, 1)]);
    }

    #[test]
    fn test_same_size_format_reported_once() {
        let mut inventory = Inventory::new();
        inventory.add_device(0, "Camera A");
        // The same frame size usually repeats once per pixel format.
        inventory.add_discrete_format(1920, 1080);
        inventory.add_discrete_format(1920, 1080);
        inventory.add_discrete_format(640, 480);

        assert_eq!(
            inventory.devices()[0].formats,
            vec![Format::discrete(1920, 1080), Format::discrete(640, 480)]
        );
    }

    #[test]
    fn test_duplicate_sizes_on_different_devices_both_kept() {
        let mut inventory = Inventory::new();
        inventory.add_device(0, "Camera A");
        inventory.add_discrete_format(1920, 1080);
        inventory.add_device(1, "Camera B");
        inventory.add_discrete_format(1920, 1080);

        assert_eq!(inventory.devices()[0].formats.len(), 1);
        assert_eq!(inventory.devices()[1].formats.len(), 1);
    }

    #[test]
    fn test_format_without_device_is_ignored() {
        let mut inventory = Inventory::new();
        inventory.add_discrete_format(1920, 1080);
        assert!(inventory.devices().is_empty());
    }

    #[test]
    fn test_add_format_dispatch() {
        let mut inventory = Inventory::new();
        inventory.add_device(0, "Camera A");
        inventory.add_format(Format::discrete(640, 480));
        inventory.add_format(Format::continuous(320, 1920, 240, 1080));

        assert_eq!(
            inventory.devices()[0].formats,
            vec![Format::discrete(640, 480), Format::stepwise(320, 1920, 1, 240, 1080, 1)]
        );
    }
}
