use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::{
    compile::{EscapeCache, Pattern, DELIMITER},
    regex::{Config, MatchAll, MatchResult, PcreBuilder, Regex},
    Result,
};

/// A facade instance: a pattern cache and the engine configuration every operation runs with.
///
/// Each operation composes the pattern as `/escaped body/flags`, compiles it and runs it once.
/// Use [`Pcre::compile`] to keep the compiled pattern around instead.
#[derive(Debug)]
pub struct Pcre {
    cache: Arc<EscapeCache>,
    config: Config,
}

impl Default for Pcre {
    fn default() -> Self {
        PcreBuilder::new().build()
    }
}

impl Pcre {
    /// Create a facade with the default configuration and a private cache.
    pub fn new() -> Pcre {
        Pcre::default()
    }

    /// A builder to configure a facade.
    pub fn builder() -> PcreBuilder {
        PcreBuilder::new()
    }

    /// Create a facade around an existing cache, which may be shared with other instances.
    pub fn with_cache(cache: Arc<EscapeCache>, config: Config) -> Pcre {
        Pcre { cache, config }
    }

    /// The pattern cache.
    pub fn cache(&self) -> &EscapeCache {
        &self.cache
    }

    /// The engine configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The composed pattern handed to the engine for a raw pattern and flags.
    pub fn compose(&self, pattern: &str, flags: &str) -> String {
        let body = self.cache.escape(pattern);
        let mut s = String::with_capacity(body.len() + flags.len() + 2);

        s.push(DELIMITER);
        s.push_str(&body);
        s.push(DELIMITER);
        s.push_str(flags);
        s
    }

    /// Compile a raw pattern with flags for repeated use.
    pub fn compile(&self, pattern: &str, flags: &str) -> Result<Regex> {
        let pattern: Pattern = self.compose(pattern, flags).parse()?;

        Regex::with_config(pattern, &self.config)
    }

    /// The first match of `pattern` in `subject`, searching from byte `offset`.
    pub fn find_first<'t, S: AsRef<[u8]> + ?Sized>(
        &self,
        pattern: &str,
        subject: &'t S,
        flags: &str,
        offset: usize,
    ) -> Result<Option<MatchResult<'t>>> {
        self.compile(pattern, flags)?.find_at(subject, offset)
    }

    /// Every non-overlapping match of `pattern` in `subject`, searching from byte `offset`.
    pub fn find_all<'t, S: AsRef<[u8]> + ?Sized>(
        &self,
        pattern: &str,
        subject: &'t S,
        flags: &str,
        offset: usize,
    ) -> Result<MatchAll<'t>> {
        self.compile(pattern, flags)?.find_all_at(subject, offset)
    }

    /// Replace at most `limit` matches of `pattern`, all of them when `limit` is `None`.
    pub fn replace<S, R>(
        &self,
        pattern: &str,
        subject: &S,
        replacement: &R,
        limit: Option<usize>,
        flags: &str,
    ) -> Result<Vec<u8>>
    where
        S: AsRef<[u8]> + ?Sized,
        R: AsRef<[u8]> + ?Sized,
    {
        self.compile(pattern, flags)?.replace(subject, replacement, limit)
    }

    /// Like `replace`, also returning the number of replacements made.
    pub fn replace_with_count<S, R>(
        &self,
        pattern: &str,
        subject: &S,
        replacement: &R,
        limit: Option<usize>,
        flags: &str,
    ) -> Result<(Vec<u8>, usize)>
    where
        S: AsRef<[u8]> + ?Sized,
        R: AsRef<[u8]> + ?Sized,
    {
        self.compile(pattern, flags)?
            .replace_with_count(subject, replacement, limit)
    }

    /// Split `subject` at the matches of `pattern` into at most `limit` pieces.
    pub fn split<'t, S: AsRef<[u8]> + ?Sized>(
        &self,
        pattern: &str,
        subject: &'t S,
        limit: Option<usize>,
        flags: &str,
    ) -> Result<Vec<&'t [u8]>> {
        self.compile(pattern, flags)?.split(subject, limit)
    }
}

static PCRE: Lazy<Pcre> = Lazy::new(Pcre::default);

/// The first match of `pattern` in `subject`, using the shared default instance.
pub fn find_first<'t, S: AsRef<[u8]> + ?Sized>(
    pattern: &str,
    subject: &'t S,
    flags: &str,
    offset: usize,
) -> Result<Option<MatchResult<'t>>> {
    PCRE.find_first(pattern, subject, flags, offset)
}

/// Every non-overlapping match of `pattern` in `subject`, using the shared default instance.
pub fn find_all<'t, S: AsRef<[u8]> + ?Sized>(
    pattern: &str,
    subject: &'t S,
    flags: &str,
    offset: usize,
) -> Result<MatchAll<'t>> {
    PCRE.find_all(pattern, subject, flags, offset)
}

/// Replace matches of `pattern`, using the shared default instance.
pub fn replace<S, R>(pattern: &str, subject: &S, replacement: &R, limit: Option<usize>, flags: &str) -> Result<Vec<u8>>
where
    S: AsRef<[u8]> + ?Sized,
    R: AsRef<[u8]> + ?Sized,
{
    PCRE.replace(pattern, subject, replacement, limit, flags)
}

/// Replace matches of `pattern` and count them, using the shared default instance.
pub fn replace_with_count<S, R>(
    pattern: &str,
    subject: &S,
    replacement: &R,
    limit: Option<usize>,
    flags: &str,
) -> Result<(Vec<u8>, usize)>
where
    S: AsRef<[u8]> + ?Sized,
    R: AsRef<[u8]> + ?Sized,
{
    PCRE.replace_with_count(pattern, subject, replacement, limit, flags)
}

/// Split `subject` at the matches of `pattern`, using the shared default instance.
pub fn split<'t, S: AsRef<[u8]> + ?Sized>(
    pattern: &str,
    subject: &'t S,
    limit: Option<usize>,
    flags: &str,
) -> Result<Vec<&'t [u8]>> {
    PCRE.split(pattern, subject, limit, flags)
}
