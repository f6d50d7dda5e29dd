use libc::c_int;
use thiserror::Error;

use crate::ffi;

/// Providing details of the compile error condition.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{message} at offset {offset}")]
pub struct Error {
    code: c_int,
    offset: usize,
    message: String,
}

impl Error {
    pub(crate) fn new(code: c_int, offset: usize) -> Self {
        Error {
            code,
            offset,
            message: error_message(code),
        }
    }

    /// A human-readable error message describing the error.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The byte offset in the escaped pattern body where the error was detected.
    ///
    /// Every `/` escaped in the raw pattern shifts later offsets by one.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The raw engine error code.
    pub fn code(&self) -> c_int {
        self.code
    }
}

fn error_message(code: c_int) -> String {
    let mut buf = [0u8; 256];

    let len = unsafe { ffi::pcre2_get_error_message_8(code, buf.as_mut_ptr(), buf.len()) };

    if len < 0 {
        format!("unknown compile error {}", code)
    } else {
        String::from_utf8_lossy(&buf[..len as usize]).into_owned()
    }
}
