// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Capture Inventory Developers

//! Windows enumeration backends.
//!
//! Windows exposes capture devices through two unrelated subsystems that
//! identify the same physical hardware differently:
//!
//! - **DirectShow** lists the video-input device category as monikers and
//!   is the only subsystem that exposes per-pin media types, i.e. frame
//!   sizes ([`dshow`]).
//! - **Media Foundation** lists device sources identified by a symbolic
//!   link and reports richer, more current device metadata ([`mf`]).
//!
//! The default pass ([`mf::populate`]) takes the device list from Media
//! Foundation and resolves each source to its DirectShow moniker through
//! the device-instance id, the one identifier stable across both
//! subsystems (`correlate`). The DirectShow-only pass
//! ([`dshow::populate`]) covers hosts where the Media Foundation route is
//! not wanted.
//!
//! Both passes hold one multithreaded-apartment COM context for their
//! whole duration; every OS allocation that the `windows` crate does not
//! already scope is wrapped in a guard in the `com` module so that each
//! resource is released exactly once on every exit path.

pub(crate) mod com;
mod correlate;
pub mod dshow;
pub mod mf;
