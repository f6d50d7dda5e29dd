use libc::c_int;
use thiserror::Error;

use crate::ffi;

/// PCRE2 Error Codes
///
/// `PCRE2_ERROR_NOMATCH` is not an error and never reaches this type;
/// a successful status is the `Ok` arm of the surrounding `Result`.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The engine reported an internal fault, ran out of memory or was given an offset past the subject.
    #[error("Internal PCRE error")]
    InternalEngineError,

    /// The match limit was reached.
    #[error("Backtrack limit was exhausted")]
    BacktrackLimitExceeded,

    /// The depth or heap limit was reached.
    #[error("Recursion limit was exhausted")]
    RecursionLimitExceeded,

    /// The subject is not valid UTF-8.
    #[error("Malformed UTF-8 data")]
    MalformedEncoding,

    /// The start offset points into the middle of a UTF-8 character.
    #[error("The offset didn't correspond to the beginning of a valid UTF-8 code point")]
    InvalidEncodingOffset,

    /// The JIT stack was too small.
    #[error("JIT stack space limit exceeded")]
    JitStackLimitExceeded,

    /// Unknown error code
    #[error("Unknown error code: {0}")]
    UnknownEngineError(c_int),
}

impl From<c_int> for Error {
    fn from(err: c_int) -> Self {
        use Error::*;

        match err {
            ffi::PCRE2_ERROR_INTERNAL | ffi::PCRE2_ERROR_NOMEMORY | ffi::PCRE2_ERROR_BADOFFSET => InternalEngineError,
            ffi::PCRE2_ERROR_MATCHLIMIT => BacktrackLimitExceeded,
            ffi::PCRE2_ERROR_DEPTHLIMIT | ffi::PCRE2_ERROR_HEAPLIMIT => RecursionLimitExceeded,
            ffi::PCRE2_ERROR_UTF8_ERR21..=ffi::PCRE2_ERROR_UTF8_ERR1 => MalformedEncoding,
            ffi::PCRE2_ERROR_BADUTFOFFSET => InvalidEncodingOffset,
            ffi::PCRE2_ERROR_JIT_STACKLIMIT => JitStackLimitExceeded,
            _ => UnknownEngineError(err),
        }
    }
}
