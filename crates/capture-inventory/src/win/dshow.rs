// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Capture Inventory Developers

//! DirectShow enumeration: device monikers and capture-pin media types.
//!
//! This module carries both the moniker-based device walk (the
//! registry-backed strategy) and the format walk every Windows pass uses:
//! bind the moniker to a filter, find the output pin named "Capture", and
//! read frame sizes from its media types.

use std::ffi::c_void;
use std::mem::{size_of, ManuallyDrop};
use std::ptr;

use windows::core::{w, Interface, PCWSTR};
use windows::Win32::Foundation::{E_POINTER, S_OK};
use windows::Win32::Media::DirectShow::{
    IBaseFilter, ICreateDevEnum, IEnumMediaTypes, IEnumPins, IPin, CLSID_SystemDeviceEnum,
    CLSID_VideoInputDeviceCategory, FORMAT_VideoInfo, PINDIR_OUTPUT, PIN_INFO,
};
use windows::Win32::Media::MediaFoundation::{AM_MEDIA_TYPE, VIDEOINFOHEADER};
use windows::Win32::System::Com::StructuredStorage::IPropertyBag;
use windows::Win32::System::Com::{
    CoCreateInstance, IEnumMoniker, IMoniker, CLSCTX_INPROC_SERVER,
};
use windows::Win32::System::Variant::{VariantClear, VARIANT};

use super::com::{ComSession, MediaType};
use crate::sink::InventorySink;
use crate::strings;
use crate::{Error, Format};

/// Run one DirectShow-only inventory pass.
///
/// Device ids are enumeration positions. Names prefer the property bag's
/// "Description" entry, falling back to "FriendlyName".
pub fn populate(sink: &mut dyn InventorySink) -> Result<(), Error> {
    let _com = ComSession::begin()?;
    describe_devices(sink)
}

fn describe_devices(sink: &mut dyn InventorySink) -> Result<(), Error> {
    let monikers = create_class_enumerator()?;

    let mut id = 0u32;
    while let Some(moniker) = next_moniker(&monikers)? {
        describe_device(id, &moniker, sink)?;
        id += 1;
    }
    Ok(())
}

/// Create the moniker enumerator for the video-input device category.
///
/// An empty category leaves the enumerator unset (`S_FALSE`); that is an
/// error here, distinct from an enumerator that yields no items.
pub(crate) fn create_class_enumerator() -> Result<IEnumMoniker, Error> {
    let dev_enum: ICreateDevEnum =
        unsafe { CoCreateInstance(&CLSID_SystemDeviceEnum, None, CLSCTX_INPROC_SERVER) }?;

    let mut monikers: Option<IEnumMoniker> = None;
    unsafe { dev_enum.CreateClassEnumerator(&CLSID_VideoInputDeviceCategory, &mut monikers, 0) }?;
    monikers.ok_or(Error::CategoryEmpty)
}

/// Pull the next moniker from the enumerator; `None` on exhaustion.
pub(crate) fn next_moniker(monikers: &IEnumMoniker) -> Result<Option<IMoniker>, Error> {
    let mut slot = [None];
    let hr = unsafe { monikers.Next(&mut slot, None) };
    if hr == S_OK {
        Ok(slot[0].take())
    } else {
        Ok(None)
    }
}

fn describe_device(id: u32, moniker: &IMoniker, sink: &mut dyn InventorySink) -> Result<(), Error> {
    let bag = bind_to_storage(moniker)?;
    let name = read_device_name(&bag)?;
    sink.add_device(id, &name);
    describe_formats(moniker, sink)
}

/// Read the device name from a moniker's property bag. "Description" is
/// not always present, but when it is it carries more detail than
/// "FriendlyName".
fn read_device_name(bag: &IPropertyBag) -> Result<String, Error> {
    match read_bag_string(bag, w!("Description")) {
        Ok(name) => Ok(name),
        Err(_) => read_bag_string(bag, w!("FriendlyName")),
    }
}

/// Read one string property from a moniker's property bag.
pub(crate) fn read_bag_string(bag: &IPropertyBag, property: PCWSTR) -> Result<String, Error> {
    let mut value = VARIANT::default();
    unsafe { bag.Read(property, &mut value, None) }?;
    let text = strings::from_bstr_variant(&value);
    unsafe {
        let _ = VariantClear(&mut value);
    }
    Ok(text)
}

/// Bind a moniker to its property-bag storage.
pub(crate) fn bind_to_storage(moniker: &IMoniker) -> Result<IPropertyBag, Error> {
    let mut bag: Option<IPropertyBag> = None;
    unsafe {
        moniker.BindToStorage(
            None,
            None,
            &IPropertyBag::IID,
            &mut bag as *mut _ as *mut *mut c_void,
        )
    }?;
    bag.ok_or_else(|| Error::Com(E_POINTER.into()))
}

/// Enumerate the frame formats a moniker's capture filter exposes.
///
/// Used by both the DirectShow pass and the Media Foundation pass once a
/// source has been correlated to its moniker.
pub(crate) fn describe_formats(
    moniker: &IMoniker,
    sink: &mut dyn InventorySink,
) -> Result<(), Error> {
    let mut filter: Option<IBaseFilter> = None;
    unsafe {
        moniker.BindToObject(
            None,
            None,
            &IBaseFilter::IID,
            &mut filter as *mut _ as *mut *mut c_void,
        )
    }?;
    let filter = filter.ok_or_else(|| Error::Com(E_POINTER.into()))?;

    let pins: IEnumPins = unsafe { filter.EnumPins() }?;
    loop {
        let mut slot: [Option<IPin>; 1] = [None];
        let hr = unsafe { pins.Next(&mut slot, None) };
        if hr != S_OK {
            break;
        }
        if let Some(pin) = slot[0].take() {
            describe_pin(&pin, sink)?;
        }
    }
    Ok(())
}

/// Inspect one pin; only the output pin in the "Capture" role is walked
/// for media types (a device may also expose a "Still" pin).
fn describe_pin(pin: &IPin, sink: &mut dyn InventorySink) -> Result<(), Error> {
    let mut info = PIN_INFO::default();
    unsafe { pin.QueryPinInfo(&mut info) }?;
    // QueryPinInfo hands back an owning reference to the pin's filter.
    let _owner = unsafe { ManuallyDrop::take(&mut info.pFilter) };

    if info.dir != PINDIR_OUTPUT || strings::from_wide(&info.achName) != "Capture" {
        return Ok(());
    }

    let media_types: IEnumMediaTypes = unsafe { pin.EnumMediaTypes() }?;
    loop {
        let mut slot: [*mut AM_MEDIA_TYPE; 1] = [ptr::null_mut()];
        let hr = unsafe { media_types.Next(&mut slot, None) };
        if hr != S_OK {
            break;
        }
        if !slot[0].is_null() {
            let media_type = unsafe { MediaType::from_raw(slot[0]) };
            describe_media_type(media_type.get(), sink);
        }
    }
    Ok(())
}

/// Report a media type as a discrete format if it carries a structurally
/// valid video-info block.
fn describe_media_type(media_type: &AM_MEDIA_TYPE, sink: &mut dyn InventorySink) {
    if media_type.formattype != FORMAT_VideoInfo
        || (media_type.cbFormat as usize) < size_of::<VIDEOINFOHEADER>()
        || media_type.pbFormat.is_null()
    {
        return;
    }

    let header = unsafe { &*(media_type.pbFormat as *const VIDEOINFOHEADER) };
    sink.add_format(Format::from_signed(
        header.bmiHeader.biWidth,
        header.bmiHeader.biHeight,
    ));
}
