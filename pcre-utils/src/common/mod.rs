mod code;
mod error;

pub use self::code::{Code, CodeRef};
pub use self::error::Error;

use std::ptr;

use crate::ffi;

/// The current PCRE2 version information.
pub fn version() -> semver::Version {
    let s = version_str();
    let mut parts = s
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .split('.')
        .map(|n| n.parse::<u64>().unwrap_or_default());

    semver::Version::new(
        parts.next().unwrap_or_default(),
        parts.next().unwrap_or_default(),
        parts.next().unwrap_or_default(),
    )
}

/// Utility function for identifying this release version.
///
/// Returns a string containing the version number of the engine and the date of its release.
pub fn version_str() -> String {
    unsafe {
        let len = ffi::pcre2_config_8(ffi::PCRE2_CONFIG_VERSION, ptr::null_mut());

        if len <= 0 {
            return String::new();
        }

        let mut buf = vec![0u8; len as usize];

        ffi::pcre2_config_8(ffi::PCRE2_CONFIG_VERSION, buf.as_mut_ptr() as *mut _);

        let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());

        String::from_utf8_lossy(&buf[..end]).into_owned()
    }
}

/// Whether the engine was built with JIT support for this platform.
pub fn jit_available() -> bool {
    let mut jit: u32 = 0;

    unsafe { ffi::pcre2_config_8(ffi::PCRE2_CONFIG_JIT, &mut jit as *mut u32 as *mut _) };

    jit == 1
}
