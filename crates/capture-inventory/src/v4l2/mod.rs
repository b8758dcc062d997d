// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Capture Inventory Developers

//! Linux V4L2 enumeration backend.
//!
//! Probes a fixed range of `/dev/videoN` nodes, filters for video capture
//! capability, and walks the input, pixel-format, and frame-size
//! enumerations of each capture-capable node. The probe is gap-tolerant:
//! an absent node index is an empty slot, not the end of the scan, so
//! devices behind a numbering gap are still found.
//!
//! | Enumeration level | ioctl | End sentinel |
//! |-------------------|-------|--------------|
//! | Capability | `VIDIOC_QUERYCAP` | n/a |
//! | Inputs | `VIDIOC_ENUMINPUT` | `EINVAL` |
//! | Pixel formats | `VIDIOC_ENUM_FMT` | `EINVAL` |
//! | Frame sizes | `VIDIOC_ENUM_FRAMESIZES` | `EINVAL` |
//!
//! `EINVAL` at an enumeration level ends that level successfully; any
//! other errno aborts the pass with that errno. A node without the
//! capture capability contributes nothing and does not abort the pass.

mod enumerator;

pub use enumerator::{populate, NODE_PROBE_LIMIT};
