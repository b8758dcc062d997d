// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Capture Inventory Developers

//! String codec between platform text encodings and portable UTF-8.
//!
//! Drivers hand back NUL-padded byte arrays on Linux and NUL-terminated
//! wide strings on Windows; both convert lossily, since a device name
//! with a bad byte in it is still a usable name. A zero-length string is
//! a valid empty name, not an error.

/// Decode a NUL-padded driver byte array (e.g. `v4l2_input.name`).
#[cfg(any(target_os = "linux", test))]
pub(crate) fn from_driver_bytes(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

/// Decode a NUL-terminated wide string buffer (e.g. `PIN_INFO.achName`
/// or a device-instance id).
#[cfg(any(windows, test))]
pub(crate) fn from_wide(wide: &[u16]) -> String {
    let end = wide.iter().position(|&w| w == 0).unwrap_or(wide.len());
    String::from_utf16_lossy(&wide[..end])
}

/// Extract the BSTR payload of a property-bag `VARIANT`. A null BSTR is
/// a valid zero-length string.
#[cfg(windows)]
pub(crate) fn from_bstr_variant(value: &windows::Win32::System::Variant::VARIANT) -> String {
    let bstr = unsafe { &value.Anonymous.Anonymous.Anonymous.bstrVal };
    String::from_utf16_lossy(bstr.as_wide())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_driver_bytes_stop_at_nul() {
        let mut name = [0u8; 32];
        name[..8].copy_from_slice(b"Camera A");
        assert_eq!(from_driver_bytes(&name), "Camera A");
    }

    #[test]
    fn test_driver_bytes_without_nul() {
        assert_eq!(from_driver_bytes(b"abc"), "abc");
    }

    #[test]
    fn test_driver_bytes_empty() {
        assert_eq!(from_driver_bytes(&[0u8; 32]), "");
    }

    #[test]
    fn test_driver_bytes_invalid_utf8_is_lossy() {
        let name = [b'C', b'a', b'm', 0xFF, 0];
        assert_eq!(from_driver_bytes(&name), "Cam\u{FFFD}");
    }

    #[test]
    fn test_wide_stops_at_nul() {
        let mut name = [0u16; 16];
        for (slot, ch) in name.iter_mut().zip("Webcam".encode_utf16()) {
            *slot = ch;
        }
        assert_eq!(from_wide(&name), "Webcam");
    }

    #[test]
    fn test_wide_empty() {
        assert_eq!(from_wide(&[0u16; 4]), "");
        assert_eq!(from_wide(&[]), "");
    }

    #[test]
    fn test_wide_unpaired_surrogate_is_lossy() {
        assert_eq!(from_wide(&[0xD800, 0]), "\u{FFFD}");
    }
}
