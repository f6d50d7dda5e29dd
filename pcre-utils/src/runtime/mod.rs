mod match_data;
mod scan;
mod template;

pub use self::match_data::{MatchContext, MatchContextRef, MatchData, MatchDataRef, Slots};
pub use self::scan::{exec, Scanner};
pub use self::template::Template;
