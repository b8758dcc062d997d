// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Capture Inventory Developers

//! Device identity correlation between Media Foundation and DirectShow.
//!
//! A Media Foundation device source is identified by a symbolic link; a
//! DirectShow moniker by its "DevicePath" property. Neither identifier is
//! usable in the other subsystem, but both resolve through the device
//! configuration manager to the same device-instance id. The correlation
//! therefore runs two hops: resolve the target symbolic link to an
//! instance id, then resolve each moniker's device path the same way
//! until the ids compare equal.

use windows::core::{w, PCWSTR};
use windows::Win32::Devices::DeviceAndDriverInstallation::{
    CM_Get_Device_IDW, CM_Get_Device_ID_Size, SetupDiCreateDeviceInfoList,
    SetupDiDestroyDeviceInfoList, SetupDiEnumDeviceInfo, SetupDiOpenDeviceInterfaceW,
    CR_SUCCESS, HDEVINFO, SP_DEVINFO_DATA,
};
use windows::Win32::Foundation::E_FAIL;
use windows::Win32::System::Com::IMoniker;

use super::dshow;
use crate::strings;
use crate::Error;

/// Find the DirectShow moniker for the device behind a Media Foundation
/// symbolic link.
///
/// The device is known to exist (it came from the source list), so
/// exhausting the moniker enumerator without a match is a hard error,
/// not an empty result.
pub(crate) fn find_moniker(symbolic_link: &str) -> Result<IMoniker, Error> {
    let target = instance_id_of(symbolic_link)?;

    let monikers = dshow::create_class_enumerator()?;
    while let Some(moniker) = dshow::next_moniker(&monikers)? {
        let bag = dshow::bind_to_storage(&moniker)?;
        let device_path = dshow::read_bag_string(&bag, w!("DevicePath"))?;
        if instance_id_of(&device_path)? == target {
            return Ok(moniker);
        }
    }

    Err(Error::CorrelationFailed(symbolic_link.to_string()))
}

/// Resolve a device-interface symbolic link to its device-instance id.
fn instance_id_of(symbolic_link: &str) -> Result<String, Error> {
    let list = DeviceInfoList::new()?;
    list.instance_id_for(symbolic_link)
}

/// Scoped `HDEVINFO` device-info list, destroyed on drop.
struct DeviceInfoList {
    handle: HDEVINFO,
}

impl DeviceInfoList {
    fn new() -> Result<Self, Error> {
        let handle = unsafe { SetupDiCreateDeviceInfoList(None, None) }?;
        Ok(Self { handle })
    }

    fn instance_id_for(&self, symbolic_link: &str) -> Result<String, Error> {
        let link: Vec<u16> = symbolic_link.encode_utf16().chain(Some(0)).collect();
        unsafe { SetupDiOpenDeviceInterfaceW(self.handle, PCWSTR(link.as_ptr()), 0, None) }?;

        // Opening one interface yields exactly one device-info entry.
        let mut info = SP_DEVINFO_DATA {
            cbSize: std::mem::size_of::<SP_DEVINFO_DATA>() as u32,
            ..Default::default()
        };
        unsafe { SetupDiEnumDeviceInfo(self.handle, 0, &mut info) }?;

        let mut len = 0u32;
        if unsafe { CM_Get_Device_ID_Size(&mut len, info.DevInst, 0) } != CR_SUCCESS {
            return Err(Error::Com(E_FAIL.into()));
        }

        let mut buffer = vec![0u16; len as usize + 1];
        if unsafe { CM_Get_Device_IDW(info.DevInst, &mut buffer, 0) } != CR_SUCCESS {
            return Err(Error::Com(E_FAIL.into()));
        }

        Ok(strings::from_wide(&buffer))
    }
}

impl Drop for DeviceInfoList {
    fn drop(&mut self) {
        unsafe {
            let _ = SetupDiDestroyDeviceInfoList(self.handle);
        }
    }
}
