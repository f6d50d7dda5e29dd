//! Compiled patterns and their match results
mod builder;
mod captures;
mod re;

pub use self::builder::{Builder, Config, PcreBuilder, RegexBuilder};
pub use self::captures::{Group, Match, MatchAll, MatchResult};
pub use self::re::Regex;
