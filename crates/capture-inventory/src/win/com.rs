// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Capture Inventory Developers

//! Scoped guards for COM resources the `windows` crate does not manage.
//!
//! Interface pointers already release themselves on drop; what remains is
//! the apartment context, task-memory allocations, and the media-type
//! structure with its embedded format block and interface pointer. Each
//! gets a guard whose drop releases it exactly once, in reverse
//! acquisition order as the guards leave scope.

use std::ffi::c_void;
use std::mem::ManuallyDrop;
use std::ptr;

use windows::core::PWSTR;
use windows::Win32::Media::MediaFoundation::AM_MEDIA_TYPE;
use windows::Win32::System::Com::{
    CoInitializeEx, CoTaskMemFree, CoUninitialize, COINIT_MULTITHREADED,
};

use crate::strings;
use crate::Error;

/// Multithreaded-apartment COM context, held for one whole inventory
/// pass and released on drop regardless of how the pass ends.
pub(crate) struct ComSession(());

impl ComSession {
    pub fn begin() -> Result<Self, Error> {
        unsafe { CoInitializeEx(None, COINIT_MULTITHREADED) }.ok()?;
        Ok(ComSession(()))
    }
}

impl Drop for ComSession {
    fn drop(&mut self) {
        unsafe { CoUninitialize() };
    }
}

/// Owned task-memory wide string, as returned by
/// `IMFActivate::GetAllocatedString`.
pub(crate) struct CoTaskString {
    ptr: PWSTR,
}

impl CoTaskString {
    /// Takes ownership of a `CoTaskMemAlloc`'d wide string. The pointer
    /// must not be freed elsewhere; null stands for the empty string.
    pub unsafe fn from_raw(ptr: PWSTR) -> Self {
        Self { ptr }
    }

    pub fn to_string(&self) -> String {
        if self.ptr.is_null() {
            return String::new();
        }
        strings::from_wide(unsafe { self.ptr.as_wide() })
    }
}

impl Drop for CoTaskString {
    fn drop(&mut self) {
        if !self.ptr.is_null() {
            unsafe { CoTaskMemFree(Some(self.ptr.0 as *const c_void)) };
        }
    }
}

/// Owned `AM_MEDIA_TYPE` as yielded by `IEnumMediaTypes::Next`.
///
/// Releasing one takes three steps in order: free the format block, then
/// release the embedded (normally unused) `pUnk`, then free the structure
/// itself.
pub(crate) struct MediaType {
    ptr: *mut AM_MEDIA_TYPE,
}

impl MediaType {
    /// Takes ownership of a heap-allocated media type. `ptr` must be
    /// non-null and valid.
    pub unsafe fn from_raw(ptr: *mut AM_MEDIA_TYPE) -> Self {
        Self { ptr }
    }

    pub fn get(&self) -> &AM_MEDIA_TYPE {
        unsafe { &*self.ptr }
    }
}

impl Drop for MediaType {
    fn drop(&mut self) {
        unsafe {
            let mt = &mut *self.ptr;
            if mt.cbFormat != 0 && !mt.pbFormat.is_null() {
                CoTaskMemFree(Some(mt.pbFormat as *const c_void));
                mt.cbFormat = 0;
                mt.pbFormat = ptr::null_mut();
            }
            // pUnk should not be used, but it is still owed a release.
            drop(ManuallyDrop::take(&mut mt.pUnk));
            CoTaskMemFree(Some(self.ptr as *const c_void));
        }
    }
}
