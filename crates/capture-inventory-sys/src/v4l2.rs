// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Capture Inventory Developers

//! V4L2 structures and ioctl request codes from `linux/videodev2.h`.

#![allow(non_camel_case_types)]

use std::mem::size_of;

/// Device produces video frames (`V4L2_CAP_VIDEO_CAPTURE`).
pub const V4L2_CAP_VIDEO_CAPTURE: u32 = 0x0000_0001;

/// Buffer type for single-planar video capture (`V4L2_BUF_TYPE_VIDEO_CAPTURE`).
pub const V4L2_BUF_TYPE_VIDEO_CAPTURE: u32 = 1;

/// Frame size entry carries one exact resolution.
pub const V4L2_FRMSIZE_TYPE_DISCRETE: u32 = 1;
/// Frame size entry carries a min/max range with no step expressed.
pub const V4L2_FRMSIZE_TYPE_CONTINUOUS: u32 = 2;
/// Frame size entry carries a min/max range reachable in driver steps.
pub const V4L2_FRMSIZE_TYPE_STEPWISE: u32 = 3;

/// `struct v4l2_capability` returned by `VIDIOC_QUERYCAP`.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct v4l2_capability {
    pub driver: [u8; 16],
    pub card: [u8; 32],
    pub bus_info: [u8; 32],
    pub version: u32,
    pub capabilities: u32,
    pub device_caps: u32,
    pub reserved: [u32; 3],
}

/// `struct v4l2_input` filled by `VIDIOC_ENUMINPUT`.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct v4l2_input {
    pub index: u32,
    pub name: [u8; 32],
    pub type_: u32,
    pub audioset: u32,
    pub tuner: u32,
    pub std: u64,
    pub status: u32,
    pub capabilities: u32,
    pub reserved: [u32; 3],
}

/// `struct v4l2_fmtdesc` filled by `VIDIOC_ENUM_FMT`.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct v4l2_fmtdesc {
    pub index: u32,
    pub type_: u32,
    pub flags: u32,
    pub description: [u8; 32],
    pub pixelformat: u32,
    pub mbus_code: u32,
    pub reserved: [u32; 3],
}

/// Discrete arm of the `v4l2_frmsizeenum` union.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct v4l2_frmsize_discrete {
    pub width: u32,
    pub height: u32,
}

/// Stepwise arm of the `v4l2_frmsizeenum` union.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct v4l2_frmsize_stepwise {
    pub min_width: u32,
    pub max_width: u32,
    pub step_width: u32,
    pub min_height: u32,
    pub max_height: u32,
    pub step_height: u32,
}

#[repr(C)]
#[derive(Clone, Copy)]
pub union v4l2_frmsize_union {
    pub discrete: v4l2_frmsize_discrete,
    pub stepwise: v4l2_frmsize_stepwise,
}

/// `struct v4l2_frmsizeenum` filled by `VIDIOC_ENUM_FRAMESIZES`.
///
/// Which arm of `size` is valid is indicated by `type_`.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct v4l2_frmsizeenum {
    pub index: u32,
    pub pixel_format: u32,
    pub type_: u32,
    pub size: v4l2_frmsize_union,
    pub reserved: [u32; 2],
}

// ioctl request code construction, as in asm-generic/ioctl.h.
const _IOC_NRSHIFT: u32 = 0;
const _IOC_TYPESHIFT: u32 = 8;
const _IOC_SIZESHIFT: u32 = 16;
const _IOC_DIRSHIFT: u32 = 30;

const _IOC_WRITE: u32 = 1;
const _IOC_READ: u32 = 2;

const fn ioc(dir: u32, ty: u32, nr: u32, size: u32) -> libc::c_ulong {
    ((dir << _IOC_DIRSHIFT) | (size << _IOC_SIZESHIFT) | (ty << _IOC_TYPESHIFT) | (nr << _IOC_NRSHIFT))
        as libc::c_ulong
}

const fn ior<T>(ty: u32, nr: u32) -> libc::c_ulong {
    ioc(_IOC_READ, ty, nr, size_of::<T>() as u32)
}

const fn iowr<T>(ty: u32, nr: u32) -> libc::c_ulong {
    ioc(_IOC_READ | _IOC_WRITE, ty, nr, size_of::<T>() as u32)
}

// The V4L2 ioctl character ('V').
const VIDIOC_TYPE: u32 = b'V' as u32;

pub const VIDIOC_QUERYCAP: libc::c_ulong = ior::<v4l2_capability>(VIDIOC_TYPE, 0);
pub const VIDIOC_ENUM_FMT: libc::c_ulong = iowr::<v4l2_fmtdesc>(VIDIOC_TYPE, 2);
pub const VIDIOC_ENUMINPUT: libc::c_ulong = iowr::<v4l2_input>(VIDIOC_TYPE, 26);
pub const VIDIOC_ENUM_FRAMESIZES: libc::c_ulong = iowr::<v4l2_frmsizeenum>(VIDIOC_TYPE, 74);

#[cfg(test)]
mod tests {
    use super::*;

    // Struct sizes feed directly into the ioctl request codes, so a layout
    // mismatch would show up as the kernel rejecting every request.
    #[test]
    fn test_struct_layouts() {
        assert_eq!(size_of::<v4l2_capability>(), 104);
        assert_eq!(size_of::<v4l2_input>(), 80);
        assert_eq!(size_of::<v4l2_fmtdesc>(), 64);
        assert_eq!(size_of::<v4l2_frmsizeenum>(), 44);
    }

    // Well-known request values from videodev2.h on 64-bit Linux.
    #[test]
    fn test_request_codes() {
        assert_eq!(VIDIOC_QUERYCAP, 0x8068_5600);
        assert_eq!(VIDIOC_ENUM_FMT, 0xC040_5602);
        assert_eq!(VIDIOC_ENUMINPUT, 0xC050_561A);
        assert_eq!(VIDIOC_ENUM_FRAMESIZES, 0xC02C_564A);
    }
}
