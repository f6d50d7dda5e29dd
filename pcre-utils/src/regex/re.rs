use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::{
    common::Code,
    compile::Pattern,
    regex::{Config, MatchAll, MatchResult},
    runtime::{exec, MatchContext, MatchData, Scanner, Slots, Template},
    Error, Result,
};

struct Inner {
    pattern: Pattern,
    code: Code,
    names: Arc<HashMap<String, usize>>,
    ctx: MatchContext,
}

/// A compiled regular expression, ready to search, split or replace any number of subjects.
#[derive(Clone)]
pub struct Regex(Arc<Inner>);

impl fmt::Debug for Regex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Regex").field(&self.0.pattern.to_string()).finish()
    }
}

impl fmt::Display for Regex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.pattern, f)
    }
}

impl FromStr for Regex {
    type Err = Error;

    /// Attempts to parse a string into a regular expression
    fn from_str(s: &str) -> Result<Regex> {
        Regex::new(s)
    }
}

/// Core regular expression methods.
impl Regex {
    /// Compiles a raw pattern body without flags.
    ///
    /// If an invalid expression is given, then an error is returned.
    pub fn new(body: &str) -> Result<Regex> {
        Regex::with_config(Pattern::new(body), &Config::default())
    }

    /// Compiles a pattern with the engine limits of `config`.
    pub fn with_config(pattern: Pattern, config: &Config) -> Result<Regex> {
        let code = pattern.compile(config.jit)?;
        let names = Arc::new(code.names()?);
        let ctx = MatchContext::with_limits(config.backtrack_limit, config.recursion_limit)?;

        debug!("compiled `{}` with {} groups", pattern, code.capture_count()?);

        Ok(Regex(Arc::new(Inner {
            pattern,
            code,
            names,
            ctx,
        })))
    }

    /// The pattern this regex was compiled from.
    pub fn pattern(&self) -> &Pattern {
        &self.0.pattern
    }

    /// The number of capture groups, not counting the whole match.
    pub fn capture_count(&self) -> Result<usize> {
        self.0.code.capture_count()
    }

    /// The named capture groups mapped to their group numbers.
    pub fn names(&self) -> &HashMap<String, usize> {
        &self.0.names
    }

    fn scanner<'a>(&'a self, subject: &'a [u8], offset: usize) -> Result<Scanner<'a>> {
        Scanner::new(&self.0.code, &self.0.ctx, subject, offset)
    }

    fn result<'t>(&self, subject: &'t [u8], slots: Slots) -> MatchResult<'t> {
        MatchResult::new(subject, slots, self.0.names.clone())
    }

    /// Returns true if and only if the regex matches the subject given.
    pub fn is_match<S: AsRef<[u8]> + ?Sized>(&self, subject: &S) -> Result<bool> {
        self.find(subject).map(|m| m.is_some())
    }

    /// The first match in `subject`.
    pub fn find<'t, S: AsRef<[u8]> + ?Sized>(&self, subject: &'t S) -> Result<Option<MatchResult<'t>>> {
        self.find_at(subject, 0)
    }

    /// The first match in `subject` starting the search at byte `offset`.
    ///
    /// An offset past the end of the subject is an engine error.
    ///
    /// # Examples
    ///
    /// Find the start and end location of the first word with exactly 13 word characters:
    ///
    /// ```rust
    /// # use pcre_utils::Regex;
    /// let text = "I categorically deny having triskaidekaphobia.";
    /// let mat = Regex::new(r"\b\w{13}\b").unwrap().find_at(text, 0).unwrap().unwrap();
    /// assert_eq!(mat.start(), 2);
    /// assert_eq!(mat.end(), 15);
    /// ```
    pub fn find_at<'t, S: AsRef<[u8]> + ?Sized>(
        &self,
        subject: &'t S,
        offset: usize,
    ) -> Result<Option<MatchResult<'t>>> {
        let subject = subject.as_ref();
        let md = MatchData::for_code(&self.0.code)?;

        let res = exec(&self.0.code, subject, offset, 0, &md, &self.0.ctx)?;

        Ok(res.map(|slots| self.result(subject, slots)))
    }

    /// Every non-overlapping match in `subject`.
    pub fn find_all<'t, S: AsRef<[u8]> + ?Sized>(&self, subject: &'t S) -> Result<MatchAll<'t>> {
        self.find_all_at(subject, 0)
    }

    /// Every non-overlapping match in `subject` starting the search at byte `offset`.
    pub fn find_all_at<'t, S: AsRef<[u8]> + ?Sized>(&self, subject: &'t S, offset: usize) -> Result<MatchAll<'t>> {
        let subject = subject.as_ref();

        let matches = self
            .scanner(subject, offset)?
            .map(|res| res.map(|slots| self.result(subject, slots)))
            .collect::<Result<MatchAll<'t>>>()?;

        trace!("`{}` matched {} times", self, matches.len());

        Ok(matches)
    }

    /// Replace matches in `subject` with the expansion of `replacement`.
    ///
    /// At most `limit` matches are replaced, all of them when `limit` is `None`.
    pub fn replace<S, R>(&self, subject: &S, replacement: &R, limit: Option<usize>) -> Result<Vec<u8>>
    where
        S: AsRef<[u8]> + ?Sized,
        R: AsRef<[u8]> + ?Sized,
    {
        self.replace_with_count(subject, replacement, limit)
            .map(|(replaced, _)| replaced)
    }

    /// Replace matches in `subject`, also returning the number of replacements made.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use pcre_utils::{Flags, Pattern, Regex, Config};
    /// let re = Regex::with_config(Pattern::with_flags("B", Flags::CASELESS), &Config::default()).unwrap();
    /// let (text, count) = re.replace_with_count("abcb", "lol", Some(1)).unwrap();
    /// assert_eq!(text, b"alolcb");
    /// assert_eq!(count, 1);
    /// ```
    pub fn replace_with_count<S, R>(&self, subject: &S, replacement: &R, limit: Option<usize>) -> Result<(Vec<u8>, usize)>
    where
        S: AsRef<[u8]> + ?Sized,
        R: AsRef<[u8]> + ?Sized,
    {
        let subject = subject.as_ref();
        let limit = limit.unwrap_or(usize::MAX);

        if limit == 0 {
            return Ok((subject.to_vec(), 0));
        }

        let template = Template::parse(replacement);
        let mut replaced = Vec::with_capacity(subject.len());
        let mut last = 0;
        let mut count = 0;

        for res in self.scanner(subject, 0)?.take(limit) {
            let slots = res?;

            if let Some(Some(m)) = slots.first() {
                replaced.extend_from_slice(&subject[last..m.start]);
                template.expand(subject, &slots, &mut replaced);
                last = m.end;
                count += 1;
            }
        }

        replaced.extend_from_slice(&subject[last..]);

        trace!("`{}` replaced {} times", self, count);

        Ok((replaced, count))
    }

    /// Split `subject` at every match.
    ///
    /// The piece before each match is returned, followed by the remainder.
    /// With a `limit` at most that many pieces are returned, the last one
    /// holding the rest of the subject; a limit below 1 counts as 1.
    pub fn split<'t, S: AsRef<[u8]> + ?Sized>(&self, subject: &'t S, limit: Option<usize>) -> Result<Vec<&'t [u8]>> {
        let subject = subject.as_ref();
        let limit = limit.map_or(usize::MAX, |n| n.max(1));

        if limit == 1 {
            return Ok(vec![subject]);
        }

        let mut pieces = vec![];
        let mut last = 0;

        for res in self.scanner(subject, 0)?.take(limit - 1) {
            let slots = res?;

            if let Some(Some(m)) = slots.first() {
                pieces.push(&subject[last..m.start]);
                last = m.end;
            }
        }

        pieces.push(&subject[last..]);

        Ok(pieces)
    }
}

#[cfg(test)]
mod tests {
    use crate::{compile::Flags, EngineError};

    use super::*;

    #[test]
    fn test_find() {
        let _ = pretty_env_logger::try_init();

        let re = Regex::new(r"(\d+)-(x)?(\d+)").unwrap();

        assert_eq!(re.capture_count().unwrap(), 3);
        assert!(re.is_match("tel 12-34").unwrap());
        assert!(!re.is_match("tel").unwrap());

        let m = re.find("tel 12-34").unwrap().unwrap();

        assert_eq!(m.as_bytes(), b"12-34");
        assert_eq!(m.get(1).unwrap(), b"12");
        assert!(!m.has(2));
        assert_eq!(m.offset(3).unwrap(), 7);

        assert!(re.find_at("12-34 56-78", 1).unwrap().unwrap().get(0).unwrap() == b"2-34");
        assert!(re.find_at("12-34", 5).unwrap().is_none());
        assert_eq!(
            re.find_at("12-34", 6).err().and_then(|err| err.kind()),
            Some(EngineError::InternalEngineError)
        );
    }

    #[test]
    fn test_find_all() {
        let regex = r"\b\w{13}\b";
        let text = "Retroactively relinquishing remunerations is reprehensible.";

        assert_eq!(
            regex::Regex::new(regex)
                .unwrap()
                .find_iter(text)
                .map(|m| m.range())
                .collect::<Vec<_>>(),
            super::Regex::new(regex)
                .unwrap()
                .find_all(text)
                .unwrap()
                .iter()
                .map(|m| m.byte_range(0).unwrap())
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_find_all_at() {
        let _ = pretty_env_logger::try_init();

        let re = Regex::new(r"\d").unwrap();
        let all = re.find_all_at("1a2b3", 1).unwrap();

        assert_eq!(all.iter().map(|m| m.as_bytes()).collect::<Vec<_>>(), vec![&b"2"[..], b"3"]);
        assert!(re.find_all("abc").unwrap().is_empty());
    }

    #[test]
    fn test_named_groups() {
        let _ = pretty_env_logger::try_init();

        let re = Regex::new(r"(?<year>\d{4})-(?<month>\d\d)(?:-(?<day>\d\d))?").unwrap();
        let m = re.find("on 2024-06").unwrap().unwrap();

        assert_eq!(re.names().len(), 3);
        assert_eq!(m.get_named("year").unwrap(), b"2024");
        assert_eq!(m.get_named_or_null("day"), None);
        assert!(!m.has_named("day"));
        assert_eq!(m.index_of("month").unwrap(), 2);
    }

    #[test]
    fn test_replace() {
        let _ = pretty_env_logger::try_init();

        let re = Regex::new(r"(\w+)@(\w+)").unwrap();

        assert_eq!(
            re.replace("a@b, c@d", "$2 at ${1}", None).unwrap(),
            b"b at a, d at c".to_vec()
        );
        assert_eq!(
            re.replace_with_count("a@b, c@d", r"<\0>", Some(1)).unwrap(),
            (b"<a@b>, c@d".to_vec(), 1)
        );
        assert_eq!(re.replace_with_count("a@b", "x", Some(0)).unwrap(), (b"a@b".to_vec(), 0));

        let re = Regex::new("x*").unwrap();

        assert_eq!(re.replace_with_count("abc", "-", None).unwrap(), (b"-a-b-c-".to_vec(), 4));
    }

    #[test]
    fn test_split() {
        let _ = pretty_env_logger::try_init();

        let re = Regex::new(r"[ \t]+").unwrap();

        assert_eq!(
            re.split("a b \t  c\td    e", None).unwrap(),
            vec![&b"a"[..], b"b", b"c", b"d", b"e"]
        );
        assert_eq!(
            re.split("a b c d", Some(3)).unwrap(),
            vec![&b"a"[..], b"b", b"c d"]
        );
        assert_eq!(re.split("a b", Some(1)).unwrap(), vec![&b"a b"[..]]);
        assert_eq!(re.split("a b", Some(0)).unwrap(), vec![&b"a b"[..]]);
        assert_eq!(re.split(" a ", None).unwrap(), vec![&b""[..], b"a", b""]);

        let re = Regex::new("").unwrap();

        assert_eq!(re.split("ab", None).unwrap(), vec![&b""[..], b"a", b"b", b""]);
    }

    #[test]
    fn test_utf8() {
        let _ = pretty_env_logger::try_init();

        let re = Regex::with_config(Pattern::with_flags(r"\w", Flags::UTF8), &Config::default()).unwrap();

        assert_eq!(re.find_all("é!ü").unwrap().len(), 2);
        assert_eq!(
            re.find_at("é", 1).err().and_then(|err| err.kind()),
            Some(EngineError::InvalidEncodingOffset)
        );
        assert_eq!(
            re.find(&b"\xff"[..]).err().and_then(|err| err.kind()),
            Some(EngineError::MalformedEncoding)
        );
    }

    #[test]
    fn test_display() {
        let _ = pretty_env_logger::try_init();

        let re = Regex::with_config(Pattern::with_flags("a/b", Flags::CASELESS), &Config::default()).unwrap();

        assert_eq!(re.to_string(), r"/a\/b/i");
        assert_eq!(format!("{:?}", re), r#"Regex("/a\\/b/i")"#);
        assert!(Regex::new("(").is_err());
    }
}
