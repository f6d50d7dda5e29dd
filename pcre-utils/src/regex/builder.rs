use std::sync::Arc;

use crate::{
    compile::{EscapeCache, Flags, Pattern, CACHE_CAPACITY},
    regex::Regex,
    Pcre, Result,
};

/// Engine limits and caching behaviour of a facade instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// The engine match limit, the number of backtracking steps allowed per match call.
    pub backtrack_limit: u32,
    /// The engine depth limit.
    pub recursion_limit: u32,
    /// JIT-compile patterns when the engine supports it.
    pub jit: bool,
    /// The number of escaped patterns kept before the cache is reset.
    pub cache_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            backtrack_limit: 1_000_000,
            recursion_limit: 100_000,
            jit: true,
            cache_capacity: CACHE_CAPACITY,
        }
    }
}

/// A configurable builder for a facade instance with its own pattern cache.
pub type PcreBuilder = Builder<()>;

/// A configurable builder for a regular expression.
///
/// A builder can be used to configure how the regex is built,
/// for example, by setting the default flags
/// (which can be overridden in the expression itself).
pub type RegexBuilder = Builder<Pattern>;

/// A configurable builder.
#[derive(Clone, Debug, Default)]
pub struct Builder<T> {
    target: T,
    config: Config,
}

impl<T> Builder<T> {
    /// The configuration built so far.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Set the engine match limit.
    pub fn backtrack_limit(&mut self, limit: u32) -> &mut Self {
        self.config.backtrack_limit = limit;
        self
    }

    /// Set the engine depth limit.
    pub fn recursion_limit(&mut self, limit: u32) -> &mut Self {
        self.config.recursion_limit = limit;
        self
    }

    /// Enable or disable JIT compilation.
    pub fn jit(&mut self, yes: bool) -> &mut Self {
        self.config.jit = yes;
        self
    }
}

impl Builder<()> {
    /// Create a new builder with the default configuration.
    pub fn new() -> Self {
        Builder::default()
    }

    /// Set the bound of the pattern cache.
    pub fn cache_capacity(&mut self, capacity: usize) -> &mut Self {
        self.config.cache_capacity = capacity;
        self
    }

    /// Build a facade instance with a fresh pattern cache.
    pub fn build(&self) -> Pcre {
        let cache = Arc::new(EscapeCache::new(self.config.cache_capacity));

        Pcre::with_cache(cache, self.config.clone())
    }
}

impl Builder<Pattern> {
    /// Create a new regular expression builder with the given raw pattern body.
    ///
    /// If the pattern is invalid, then an error will be returned when build is called.
    pub fn new<S: AsRef<str>>(body: S) -> Self {
        Builder {
            target: Pattern::new(body),
            config: Config::default(),
        }
    }

    /// Compile the regular expression.
    pub fn build(&self) -> Result<Regex> {
        Regex::with_config(self.target.clone(), &self.config)
    }

    /// Replace all the flags.
    pub fn flags(&mut self, flags: Flags) -> &mut Self {
        self.target.flags = flags;
        self
    }

    fn toggle(&mut self, flag: Flags, yes: bool) -> &mut Self {
        if yes {
            self.target.flags.insert(flag)
        } else {
            self.target.flags.remove(flag)
        }
        self
    }

    /// Set the value for the case insensitive (`i`) flag.
    ///
    /// When enabled, letters in the pattern will match both upper case and lower case variants.
    pub fn case_insensitive(&mut self, yes: bool) -> &mut Self {
        self.toggle(Flags::CASELESS, yes)
    }

    /// Set the value for the multi-line matching (`m`) flag.
    ///
    /// When enabled, ^ matches the beginning of lines and $ matches the end of lines.
    ///
    /// By default, they match beginning/end of the input.
    pub fn multi_line(&mut self, yes: bool) -> &mut Self {
        self.toggle(Flags::MULTILINE, yes)
    }

    /// Set the value for the any character (`s`) flag,
    /// where in . matches anything when s is set and matches anything
    /// except for new line when it is not set (the default).
    pub fn dot_matches_new_line(&mut self, yes: bool) -> &mut Self {
        self.toggle(Flags::DOTALL, yes)
    }

    /// Set the value for the extended (`x`) flag, ignoring whitespace and `#` comments.
    pub fn ignore_whitespace(&mut self, yes: bool) -> &mut Self {
        self.toggle(Flags::EXTENDED, yes)
    }

    /// Set the value for the anchored (`A`) flag.
    pub fn anchored(&mut self, yes: bool) -> &mut Self {
        self.toggle(Flags::ANCHORED, yes)
    }

    /// Set the value for the dollar end only (`D`) flag.
    pub fn dollar_end_only(&mut self, yes: bool) -> &mut Self {
        self.toggle(Flags::DOLLAR_ENDONLY, yes)
    }

    /// Set the value for the ungreedy (`U`) flag.
    pub fn swap_greed(&mut self, yes: bool) -> &mut Self {
        self.toggle(Flags::UNGREEDY, yes)
    }

    /// Set the value for the Unicode (`u`) flag.
    ///
    /// When enabled the subject must be valid UTF-8 and character classes such as `\w`
    /// match Unicode word characters.
    pub fn unicode(&mut self, yes: bool) -> &mut Self {
        self.toggle(Flags::UTF8, yes)
    }
}

#[cfg(test)]
mod tests {
    use crate::Error;

    use super::*;

    #[test]
    fn test_config() {
        let _ = pretty_env_logger::try_init();

        let config = Config::default();

        assert_eq!(config.backtrack_limit, 1_000_000);
        assert_eq!(config.recursion_limit, 100_000);
        assert!(config.jit);
        assert_eq!(config.cache_capacity, 10_000);
    }

    #[test]
    fn test_pcre_builder() {
        let _ = pretty_env_logger::try_init();

        let pcre = PcreBuilder::new().backtrack_limit(100).jit(false).cache_capacity(2).build();

        assert_eq!(pcre.config().backtrack_limit, 100);
        assert!(!pcre.config().jit);
        assert_eq!(pcre.cache().capacity(), 2);
        assert!(pcre.cache().is_empty());
    }

    #[test]
    fn test_regex_builder() {
        let _ = pretty_env_logger::try_init();

        let re = RegexBuilder::new("^B . c$")
            .case_insensitive(true)
            .ignore_whitespace(true)
            .multi_line(true)
            .build()
            .unwrap();

        assert_eq!(re.pattern().flags, Flags::CASELESS | Flags::MULTILINE | Flags::EXTENDED);
        assert!(re.is_match("a\nbxc\n").unwrap());

        let re = RegexBuilder::new("b.c").case_insensitive(true).case_insensitive(false).build().unwrap();

        assert!(re.pattern().flags.is_empty());
        assert!(!re.is_match("B\nc").unwrap());

        assert!(matches!(RegexBuilder::new("b(").build(), Err(Error::Compile(_))));
    }
}
