use std::fmt;
use std::str::FromStr;

use crate::{
    common::Code,
    compile::{escape, Flags, DELIMITER},
    Error, Result,
};

/// A pattern body with its flags, as written between delimiters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    /// The expression to compile, escaped for the delimiter.
    pub expression: String,
    /// Flags which modify the behaviour of the expression.
    pub flags: Flags,
}

impl Pattern {
    /// Construct a pattern from a raw body without flags.
    pub fn new<S: AsRef<str>>(body: S) -> Pattern {
        Pattern::with_flags(body, Flags::empty())
    }

    /// Construct a pattern from a raw body and flags.
    pub fn with_flags<S: AsRef<str>>(body: S, flags: Flags) -> Pattern {
        Pattern {
            expression: escape(body.as_ref()),
            flags,
        }
    }

    /// Parse a composed pattern such as `/expr/flags`.
    pub fn parse(s: &str) -> Result<Pattern> {
        let body = s.strip_prefix(DELIMITER).ok_or(Error::MissingDelimiter(DELIMITER))?;

        let mut escaped = false;
        let mut end = None;

        for (off, c) in body.char_indices() {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == DELIMITER {
                end = Some(off);
                break;
            }
        }

        let end = end.ok_or(Error::MissingDelimiter(DELIMITER))?;

        let pattern = Pattern {
            expression: body[..end].into(),
            flags: body[end + DELIMITER.len_utf8()..].parse()?,
        };

        debug!("pattern `{}` parsed to `{:?}`", s, pattern);

        Ok(pattern)
    }

    /// Compile the pattern with the engine.
    pub fn compile(&self, jit: bool) -> Result<Code> {
        Code::compile(&self.expression, self.flags, jit)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{0}{1}{0}{2}", DELIMITER, self.expression, self.flags)
    }
}

impl FromStr for Pattern {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Pattern::parse(s)
    }
}
