mod cache;
mod error;
mod escape;
mod flags;
mod pattern;

pub use self::cache::{EscapeCache, CACHE_CAPACITY};
pub use self::error::Error;
pub use self::escape::{escape, quote, DELIMITER};
pub use self::flags::Flags;
pub use self::pattern::Pattern;
