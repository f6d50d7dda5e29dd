use std::fmt;
use std::result::Result as StdResult;

use libc::c_int;
use thiserror::Error;

use crate::common::Error as EngineError;

/// The type returned by the facade methods.
pub type Result<T> = StdResult<T, Error>;

/// PCRE facade error
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The engine failed while matching.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// The pattern could not be compiled.
    #[error(transparent)]
    Compile(#[from] crate::compile::Error),

    /// Invalid flag
    #[error("invalid pattern flag: {0}")]
    InvalidFlag(char),

    /// The composed pattern is not wrapped in delimiters.
    #[error("no ending delimiter '{0}' found")]
    MissingDelimiter(char),

    /// The capture group is out of range or did not participate in the match.
    #[error("group {0} did not participate in the match")]
    GroupNotMatched(usize),

    /// The pattern has no capture group with this name.
    #[error("no capture group named `{0}`")]
    UnknownGroup(String),

    /// Invalid UTF-8 string
    #[error(transparent)]
    Utf8(#[from] std::str::Utf8Error),
}

impl Error {
    /// Projects the error onto the engine error taxonomy.
    ///
    /// Compilation failures surface through the engine's last-error channel as internal errors.
    /// Errors about accessing a match result have no engine counterpart.
    pub fn kind(&self) -> Option<EngineError> {
        match self {
            Error::Engine(err) => Some(*err),
            Error::Compile(_) | Error::InvalidFlag(_) | Error::MissingDelimiter(_) => {
                Some(EngineError::InternalEngineError)
            }
            Error::GroupNotMatched(_) | Error::UnknownGroup(_) | Error::Utf8(_) => None,
        }
    }
}

pub trait AsResult
where
    Self: Sized,
{
    type Output;
    type Error: fmt::Debug;

    fn ok(self) -> StdResult<Self::Output, Self::Error>;

    fn map<U, F: FnOnce(Self::Output) -> U>(self, op: F) -> StdResult<U, Self::Error> {
        self.ok().map(op)
    }

    fn and_then<U, F: FnOnce(Self::Output) -> StdResult<U, Self::Error>>(self, op: F) -> StdResult<U, Self::Error> {
        self.ok().and_then(op)
    }
}

impl AsResult for c_int {
    type Output = c_int;
    type Error = Error;

    fn ok(self) -> StdResult<Self::Output, Self::Error> {
        if self >= 0 {
            Ok(self)
        } else {
            Err(EngineError::from(self).into())
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::ffi;

    use super::*;

    #[test]
    fn test_as_result() {
        let _ = pretty_env_logger::try_init();

        let (success, captured): (c_int, c_int) = (0, 3);

        assert_eq!(success.ok(), Ok(0));
        assert_eq!(captured.map(|n| n * 2), Ok(6));
        assert_eq!(captured.and_then(|n| Ok(n + 1)), Ok(4));
        assert_eq!(
            ffi::PCRE2_ERROR_NOMEMORY.and_then(|n| Ok(n + 1)),
            Err(Error::Engine(EngineError::InternalEngineError))
        );
        assert_eq!(
            ffi::PCRE2_ERROR_MATCHLIMIT.ok(),
            Err(Error::Engine(EngineError::BacktrackLimitExceeded))
        );
    }

    #[test]
    fn test_error_kind() {
        let _ = pretty_env_logger::try_init();

        assert_eq!(
            Error::from(EngineError::JitStackLimitExceeded).kind(),
            Some(EngineError::JitStackLimitExceeded)
        );
        assert_eq!(Error::InvalidFlag('q').kind(), Some(EngineError::InternalEngineError));
        assert_eq!(Error::GroupNotMatched(2).kind(), None);
    }
}
