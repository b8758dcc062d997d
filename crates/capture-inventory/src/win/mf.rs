// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Capture Inventory Developers

//! Media Foundation enumeration: the default Windows pass.
//!
//! Devices come from `MFEnumDeviceSources` filtered to video capture.
//! Each source must carry a friendly name and a symbolic link; the link
//! is correlated to the DirectShow moniker that can actually enumerate
//! the device's frame formats.

use std::ffi::c_void;
use std::ptr;
use std::slice;

use windows::core::{GUID, PWSTR};
use windows::Win32::Foundation::E_POINTER;
use windows::Win32::Media::MediaFoundation::{
    IMFActivate, IMFAttributes, MFCreateAttributes, MFEnumDeviceSources,
    MF_DEVSOURCE_ATTRIBUTE_FRIENDLY_NAME, MF_DEVSOURCE_ATTRIBUTE_SOURCE_TYPE,
    MF_DEVSOURCE_ATTRIBUTE_SOURCE_TYPE_VIDCAP_GUID,
    MF_DEVSOURCE_ATTRIBUTE_SOURCE_TYPE_VIDCAP_SYMBOLIC_LINK,
};
use windows::Win32::System::Com::CoTaskMemFree;

use super::com::{ComSession, CoTaskString};
use super::{correlate, dshow};
use crate::sink::InventorySink;
use crate::Error;

/// Run one Media Foundation inventory pass.
///
/// Device ids are positions in the source list. Formats are read through
/// the correlated DirectShow moniker; a source whose symbolic link cannot
/// be resolved or matched aborts the pass.
pub fn populate(sink: &mut dyn InventorySink) -> Result<(), Error> {
    let _com = ComSession::begin()?;
    describe_devices(sink)
}

fn describe_devices(sink: &mut dyn InventorySink) -> Result<(), Error> {
    let sources = DeviceSources::enumerate()?;
    for (id, source) in sources.iter().enumerate() {
        describe_device(id as u32, source, sink)?;
    }
    Ok(())
}

fn describe_device(id: u32, source: &IMFActivate, sink: &mut dyn InventorySink) -> Result<(), Error> {
    let name = get_string_attribute(source, &MF_DEVSOURCE_ATTRIBUTE_FRIENDLY_NAME)?;
    log::debug!("device source {}: {}", id, name);
    sink.add_device(id, &name);

    let symbolic_link =
        get_string_attribute(source, &MF_DEVSOURCE_ATTRIBUTE_SOURCE_TYPE_VIDCAP_SYMBOLIC_LINK)?;
    let moniker = correlate::find_moniker(&symbolic_link)?;
    dshow::describe_formats(&moniker, sink)
}

/// Read one wide-string attribute from an activation object.
fn get_string_attribute(source: &IMFActivate, key: &GUID) -> Result<String, Error> {
    let mut value = PWSTR::null();
    let mut len = 0u32;
    unsafe { source.GetAllocatedString(key, &mut value, &mut len) }?;
    let value = unsafe { CoTaskString::from_raw(value) };
    Ok(value.to_string())
}

/// Owned device-source array from `MFEnumDeviceSources`: every activation
/// object is released and the array freed on drop.
struct DeviceSources {
    ptr: *mut Option<IMFActivate>,
    count: u32,
}

impl DeviceSources {
    fn enumerate() -> Result<Self, Error> {
        let mut attributes: Option<IMFAttributes> = None;
        unsafe { MFCreateAttributes(&mut attributes, 1) }?;
        let attributes = attributes.ok_or_else(|| Error::Com(E_POINTER.into()))?;
        unsafe {
            attributes.SetGUID(
                &MF_DEVSOURCE_ATTRIBUTE_SOURCE_TYPE,
                &MF_DEVSOURCE_ATTRIBUTE_SOURCE_TYPE_VIDCAP_GUID,
            )
        }?;

        let mut ptr: *mut Option<IMFActivate> = ptr::null_mut();
        let mut count = 0u32;
        unsafe { MFEnumDeviceSources(&attributes, &mut ptr, &mut count) }?;
        Ok(Self { ptr, count })
    }

    fn iter(&self) -> impl Iterator<Item = &IMFActivate> {
        let slice: &[Option<IMFActivate>] = if self.ptr.is_null() || self.count == 0 {
            &[]
        } else {
            unsafe { slice::from_raw_parts(self.ptr, self.count as usize) }
        };
        slice.iter().filter_map(|source| source.as_ref())
    }
}

impl Drop for DeviceSources {
    fn drop(&mut self) {
        if self.ptr.is_null() {
            return;
        }
        unsafe {
            for index in 0..self.count as usize {
                // Reading the slot drops (releases) the activation object.
                let _ = self.ptr.add(index).read();
            }
            CoTaskMemFree(Some(self.ptr as *const c_void));
        }
    }
}
