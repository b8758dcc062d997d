// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Capture Inventory Developers

//! Inventory pass driver.
//!
//! One call to [`populate`] runs one full enumeration pass on the current
//! platform and streams every (device, formats...) group into the given
//! sink. The pass is single-threaded, synchronous, and performs exactly
//! one platform initialization bracket; concurrent passes are independent
//! and share no state.

use crate::sink::InventorySink;
use crate::Error;

/// Run one full inventory pass, reporting every capture device and its
/// formats to `sink` in pre-order.
///
/// Returns `Ok(())` when the whole catalogue was delivered, or the first
/// fatal error. Facts delivered before the failure remain valid. Zero
/// attached devices is success with an untouched sink on Linux; on
/// Windows an empty device category is reported as
/// `Error::CategoryEmpty`, matching the platform enumerator's behavior.
///
/// On Windows this drives the Media Foundation source list with
/// DirectShow format resolution; see the `win` module for the
/// DirectShow-only variant.
pub fn populate(sink: &mut dyn InventorySink) -> Result<(), Error> {
    #[cfg(target_os = "linux")]
    {
        crate::v4l2::populate(sink)
    }

    #[cfg(windows)]
    {
        crate::win::mf::populate(sink)
    }

    #[cfg(not(any(target_os = "linux", windows)))]
    {
        let _ = sink;
        Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            "no capture inventory backend for this platform",
        )))
    }
}
