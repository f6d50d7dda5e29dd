use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;

use crate::{ffi, Error};

bitflags! {
    /// Pattern flags
    #[derive(Default)]
    pub struct Flags: u32 {
        /// Set case-insensitive matching.
        const CASELESS = ffi::PCRE2_CASELESS;
        /// Set multi-line anchoring.
        const MULTILINE = ffi::PCRE2_MULTILINE;
        /// Matching a `.` will not exclude newlines.
        const DOTALL = ffi::PCRE2_DOTALL;
        /// Ignore whitespace and `#` comments in the pattern.
        const EXTENDED = ffi::PCRE2_EXTENDED;
        /// Force the match to start at the search offset.
        const ANCHORED = ffi::PCRE2_ANCHORED;
        /// A `$` matches only at the very end of the subject.
        const DOLLAR_ENDONLY = ffi::PCRE2_DOLLAR_ENDONLY;
        /// Invert the greediness of quantifiers.
        const UNGREEDY = ffi::PCRE2_UNGREEDY;
        /// Enable UTF-8 mode and Unicode properties for this expression.
        const UTF8 = ffi::PCRE2_UTF | ffi::PCRE2_UCP;
    }
}

impl FromStr for Flags {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut flags = Flags::empty();

        for c in s.chars() {
            match c {
                'i' => flags |= Flags::CASELESS,
                'm' => flags |= Flags::MULTILINE,
                's' => flags |= Flags::DOTALL,
                'x' => flags |= Flags::EXTENDED,
                'A' => flags |= Flags::ANCHORED,
                'D' => flags |= Flags::DOLLAR_ENDONLY,
                'U' => flags |= Flags::UNGREEDY,
                'u' => flags |= Flags::UTF8,
                // extra and study are always on with PCRE2
                'X' | 'S' => {}
                ' ' | '\n' | '\r' => {}
                _ => {
                    return Err(Error::InvalidFlag(c));
                }
            }
        }

        Ok(flags)
    }
}

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.contains(Flags::CASELESS) {
            write!(f, "i")?
        }
        if self.contains(Flags::MULTILINE) {
            write!(f, "m")?
        }
        if self.contains(Flags::DOTALL) {
            write!(f, "s")?
        }
        if self.contains(Flags::EXTENDED) {
            write!(f, "x")?
        }
        if self.contains(Flags::ANCHORED) {
            write!(f, "A")?
        }
        if self.contains(Flags::DOLLAR_ENDONLY) {
            write!(f, "D")?
        }
        if self.contains(Flags::UNGREEDY) {
            write!(f, "U")?
        }
        if self.contains(Flags::UTF8) {
            write!(f, "u")?
        }
        Ok(())
    }
}
