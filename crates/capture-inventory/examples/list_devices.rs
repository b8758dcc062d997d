// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Capture Inventory Developers

//! Print the capture device catalogue of this machine.
//!
//! Run with `cargo run --example list_devices`; set `RUST_LOG=debug` to
//! watch the enumeration walk.

use capture_inventory::Inventory;

fn main() -> Result<(), capture_inventory::Error> {
    env_logger::init();

    let inventory = Inventory::get()?;
    println!("Number of capture devices: {}", inventory.devices().len());

    for device in inventory.devices() {
        println!("Device {}: {}", device.id, device.name);
        for format in &device.formats {
            println!("  {}", format);
        }
    }
    Ok(())
}
