// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Capture Inventory Developers

//! V4L2 device and format enumeration walk.

use std::fs::File;
use std::io;
use std::mem;
use std::os::fd::{AsRawFd, RawFd};

use capture_inventory_sys as sys;
use sys::libc;

use crate::sink::InventorySink;
use crate::strings;
use crate::{Error, Format};

/// Number of device nodes probed per pass: `/dev/video0` through
/// `/dev/video63`. Node numbering can have gaps (unloaded drivers,
/// unplugged devices), so every index in the range is tried.
pub const NODE_PROBE_LIMIT: u32 = 64;

/// Run one V4L2 enumeration pass over the probe range.
pub fn populate(sink: &mut dyn InventorySink) -> Result<(), Error> {
    for node in 0..NODE_PROBE_LIMIT {
        let path = format!("/dev/video{}", node);
        let file = match File::open(&path) {
            Ok(file) => file,
            // Empty slot in the node numbering.
            Err(err) if err.kind() == io::ErrorKind::NotFound => continue,
            Err(err) => return Err(Error::Io(err)),
        };

        log::debug!("probing {}", path);
        describe_device(file.as_raw_fd(), node, sink)?;
    }
    Ok(())
}

/// Enumerate the inputs of one opened node, emitting a device per input,
/// each followed by the node's formats.
fn describe_device(fd: RawFd, node: u32, sink: &mut dyn InventorySink) -> Result<(), Error> {
    let mut cap: sys::v4l2_capability = unsafe { mem::zeroed() };
    if unsafe { libc::ioctl(fd, sys::VIDIOC_QUERYCAP as _, &mut cap) } == -1 {
        let err = io::Error::last_os_error();
        // The node vanished between probe and query: empty slot.
        if err.raw_os_error() == Some(libc::ENOENT) {
            return Ok(());
        }
        return Err(Error::Io(err));
    }

    if cap.device_caps & sys::V4L2_CAP_VIDEO_CAPTURE == 0 {
        log::debug!(
            "/dev/video{}: {} does not capture video, skipping",
            node,
            strings::from_driver_bytes(&cap.card)
        );
        return Ok(());
    }

    for index in 0.. {
        let mut input: sys::v4l2_input = unsafe { mem::zeroed() };
        input.index = index;
        if unsafe { libc::ioctl(fd, sys::VIDIOC_ENUMINPUT as _, &mut input) } == -1 {
            let err = io::Error::last_os_error();
            if err.raw_os_error() == Some(libc::EINVAL) {
                // No more inputs.
                break;
            }
            return Err(Error::Io(err));
        }

        let name = strings::from_driver_bytes(&input.name);
        log::debug!("/dev/video{} input {}: {}", node, index, name);
        sink.add_device(node, &name);
        describe_formats(fd, sink)?;
    }
    Ok(())
}

/// Enumerate the capture pixel formats of a node and the frame sizes of
/// each.
fn describe_formats(fd: RawFd, sink: &mut dyn InventorySink) -> Result<(), Error> {
    for index in 0.. {
        let mut fmt: sys::v4l2_fmtdesc = unsafe { mem::zeroed() };
        fmt.index = index;
        fmt.type_ = sys::V4L2_BUF_TYPE_VIDEO_CAPTURE;
        if unsafe { libc::ioctl(fd, sys::VIDIOC_ENUM_FMT as _, &mut fmt) } == -1 {
            let err = io::Error::last_os_error();
            if err.raw_os_error() == Some(libc::EINVAL) {
                break;
            }
            return Err(Error::Io(err));
        }

        describe_frame_sizes(fd, fmt.pixelformat, sink)?;
    }
    Ok(())
}

/// Enumerate the frame sizes of one pixel format, normalizing each entry
/// into the unified format model.
fn describe_frame_sizes(
    fd: RawFd,
    pixel_format: u32,
    sink: &mut dyn InventorySink,
) -> Result<(), Error> {
    for index in 0.. {
        let mut frmsize: sys::v4l2_frmsizeenum = unsafe { mem::zeroed() };
        frmsize.index = index;
        frmsize.pixel_format = pixel_format;
        if unsafe { libc::ioctl(fd, sys::VIDIOC_ENUM_FRAMESIZES as _, &mut frmsize) } == -1 {
            let err = io::Error::last_os_error();
            if err.raw_os_error() == Some(libc::EINVAL) {
                break;
            }
            return Err(Error::Io(err));
        }

        match frmsize.type_ {
            sys::V4L2_FRMSIZE_TYPE_DISCRETE => {
                let size = unsafe { frmsize.size.discrete };
                sink.add_format(Format::discrete(size.width, size.height));
            }
            sys::V4L2_FRMSIZE_TYPE_STEPWISE => {
                let size = unsafe { frmsize.size.stepwise };
                sink.add_format(Format::stepwise(
                    size.min_width,
                    size.max_width,
                    size.step_width,
                    size.min_height,
                    size.max_height,
                    size.step_height,
                ));
            }
            sys::V4L2_FRMSIZE_TYPE_CONTINUOUS => {
                let size = unsafe { frmsize.size.stepwise };
                sink.add_format(Format::continuous(
                    size.min_width,
                    size.max_width,
                    size.min_height,
                    size.max_height,
                ));
            }
            other => {
                log::debug!("unknown frame size type {}, skipping entry", other);
            }
        }
    }
    Ok(())
}
