// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Capture Inventory Developers

//! Low-level V4L2 ABI definitions for the capture-inventory library.
//!
//! Hand-written `#[repr(C)]` mirrors of the `linux/videodev2.h` structures
//! used for capability, input, pixel-format and frame-size enumeration,
//! together with the matching ioctl request codes. Only the subset needed
//! for device discovery is defined here; streaming I/O is out of scope.
//!
//! Everything in this crate is `unsafe` to use correctly: the structures
//! must be zero-initialized before being handed to the kernel and the
//! request codes must be paired with their matching argument type. The
//! safe wrappers live in the `capture-inventory` crate.

#[cfg(target_os = "linux")]
pub use libc;

#[cfg(target_os = "linux")]
mod v4l2;

#[cfg(target_os = "linux")]
pub use v4l2::*;
