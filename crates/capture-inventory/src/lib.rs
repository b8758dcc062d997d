// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Capture Inventory Developers

//! Video Capture Inventory
//!
//! Enumerates every video capture device attached to the local machine
//! together with every frame format each device can produce, for callers
//! that need a capability catalogue before opening a capture session
//! (such as a device-selection UI).
//!
//! The inventory is delivered as a flat, ordered stream of facts: each
//! device is reported once, immediately followed by the formats it
//! supports, before the next device is reported. Consumers either
//! implement [`InventorySink`] to receive the stream directly, or use the
//! [`Inventory`] collector for a ready-made grouped view.
//!
//! # Quick Start
//!
//! ```no_run
//! use capture_inventory::Inventory;
//!
//! let inventory = Inventory::get()?;
//! for device in inventory.devices() {
//!     println!("{}: {}", device.id, device.name);
//!     for format in &device.formats {
//!         println!("  {}", format);
//!     }
//! }
//! # Ok::<(), capture_inventory::Error>(())
//! ```
//!
//! # Platform Backends
//!
//! - **Linux**: probes `/dev/video0` through `/dev/video63` and walks the
//!   V4L2 input, pixel-format, and frame-size enumerations.
//! - **Windows**: lists devices through the Media Foundation source
//!   enumeration, resolves each source to its DirectShow moniker via the
//!   device-instance id, and reads frame sizes from the capture pin's
//!   media types. The pure DirectShow walk remains available as
//!   `win::dshow::populate` for hosts where Media Foundation is not
//!   wanted.
//!
//! # Error Policy
//!
//! One pass produces one terminal result. Devices without capture
//! capability are silently excluded; any other OS failure aborts the pass
//! and is surfaced as a single [`Error`] carrying the platform code.
//! Facts already delivered to the sink before the failure stand.

use std::{error, fmt, io};

/// Error type for inventory passes.
///
/// Every variant maps back to one platform error code via
/// [`os_code`](Error::os_code), preserving the "single code per failed
/// pass" contract of the native enumeration APIs.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// An OS call failed with an errno-carrying error.
    Io(io::Error),

    /// A COM, DirectShow, or Media Foundation call failed.
    #[cfg(windows)]
    Com(windows::core::Error),

    /// The video-input device category enumerator could not be created:
    /// the category exists but holds no devices to enumerate.
    #[cfg(windows)]
    CategoryEmpty,

    /// A device discovered through the Media Foundation source list could
    /// not be matched to a DirectShow moniker. The device is known to
    /// exist, so this indicates an inconsistency between the two
    /// enumeration subsystems. Carries the unresolvable symbolic link.
    #[cfg(windows)]
    CorrelationFailed(String),
}

impl Error {
    /// The platform error code behind this error: the raw errno on Linux,
    /// the failing HRESULT on Windows. Callers that only need "which OS
    /// error ended the pass" use this instead of matching variants.
    pub fn os_code(&self) -> i32 {
        match self {
            Error::Io(err) => err.raw_os_error().unwrap_or(-1),
            #[cfg(windows)]
            Error::Com(err) => err.code().0,
            #[cfg(windows)]
            Error::CategoryEmpty | Error::CorrelationFailed(_) => {
                windows::Win32::Media::DirectShow::VFW_E_NOT_FOUND.0
            }
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "I/O error: {}", err),
            #[cfg(windows)]
            Error::Com(err) => write!(f, "COM error: {}", err),
            #[cfg(windows)]
            Error::CategoryEmpty => {
                write!(f, "video input device category enumerator could not be created")
            }
            #[cfg(windows)]
            Error::CorrelationFailed(link) => {
                write!(f, "no moniker found for device symbolic link {}", link)
            }
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            #[cfg(windows)]
            Error::Com(err) => Some(err),
            #[cfg(windows)]
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

#[cfg(windows)]
impl From<windows::core::Error> for Error {
    fn from(err: windows::core::Error) -> Self {
        Error::Com(err)
    }
}

/// The format module provides the unified frame format model.
pub mod format;

/// The sink module provides the inventory fact stream boundary and the
/// collecting sink.
pub mod sink;

/// The inventory module provides the per-platform pass driver.
pub mod inventory;

mod strings;

/// The v4l2 module provides the Linux enumeration backend.
#[cfg(target_os = "linux")]
pub mod v4l2;

/// The win module provides the Windows enumeration backends.
#[cfg(windows)]
pub mod win;

pub use format::Format;
pub use inventory::populate;
pub use sink::{Device, Inventory, InventorySink};
