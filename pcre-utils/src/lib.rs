//! A PCRE facade: raw patterns are escaped into a delimited form, cached, compiled by PCRE2
//! and run with well-defined capture group semantics.
//!
//! # Usage
//!
//! This crate can be used by adding `pcre-utils` to your dependencies in your project's Cargo.toml.
//!
//! ```toml
//! [dependencies]
//! pcre-utils = "0.1"
//! ```
//!
//! # Examples
//!
//! ```
//! use pcre_utils::prelude::*;
//!
//! fn main() -> pcre_utils::Result<()> {
//!     let m = pcre_utils::find_first(r"(a)(b)?", "a", "", 0)?.unwrap();
//!
//!     assert_eq!(m.get(1)?, b"a");
//!     assert!(!m.has(2));
//!     assert_eq!(m.get_or_null(2), None);
//!     assert_eq!(m.get_or_empty(2), b"");
//!
//!     let (text, count) = pcre_utils::replace_with_count("B", "abc", "lol", None, "i")?;
//!
//!     assert_eq!(text, b"alolc");
//!     assert_eq!(count, 1);
//!
//!     let pcre = PcreBuilder::new().backtrack_limit(10_000).build();
//!     let re = pcre.compile(r"\s*,\s*", "")?;
//!
//!     assert_eq!(re.split("a , b,c", None)?, vec![&b"a"[..], b"b", b"c"]);
//!
//!     Ok(())
//! }
//! ```
#![warn(missing_docs, rust_2018_idioms)]

#[macro_use]
extern crate log;

mod ffi {
    pub use pcre2_sys::*;
}

mod common;
mod compile;
mod error;
mod pcre;
pub mod regex;
mod runtime;

pub use crate::common::{jit_available, version, version_str, Error as EngineError};
pub use crate::compile::{escape, quote, EscapeCache, Error as CompileError, Flags, Pattern, CACHE_CAPACITY, DELIMITER};
pub use crate::error::{Error, Result};
pub use crate::pcre::{find_all, find_first, replace, replace_with_count, split, Pcre};
pub use crate::regex::{Builder, Config, Group, Match, MatchAll, MatchResult, PcreBuilder, Regex, RegexBuilder};
pub use crate::runtime::Template;

/// The `pcre-utils` Prelude
pub mod prelude {
    pub use crate::{EngineError, Flags, Match, MatchAll, MatchResult, Pcre, PcreBuilder, Regex, RegexBuilder};
}
