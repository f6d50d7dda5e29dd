use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::iter::FromIterator;
use std::ops::Range;
use std::str;
use std::sync::Arc;

use derive_more::{Deref, From, Index, Into, IntoIterator};

use crate::{runtime::Slots, Error, Result};

/// Match represents a single captured group in a haystack.
///
/// The lifetime parameter `'t` refers to the lifetime of the matched text.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Match<'t> {
    text: &'t [u8],
    start: usize,
    end: usize,
}

impl<'t> Match<'t> {
    /// Returns the starting byte offset of the match in the haystack.
    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Returns the ending byte offset of the match in the haystack.
    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }

    /// Returns the range over the starting and ending byte offsets of the
    /// match in the haystack.
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Returns true if the match is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns the matched bytes.
    #[inline]
    pub fn as_bytes(&self) -> &'t [u8] {
        &self.text[self.start..self.end]
    }

    /// Returns the matched text, if it is valid UTF-8.
    #[inline]
    pub fn as_str(&self) -> Result<&'t str> {
        Ok(str::from_utf8(self.as_bytes())?)
    }

    #[inline]
    fn new(haystack: &'t [u8], range: Range<usize>) -> Match<'t> {
        Match {
            text: haystack,
            start: range.start,
            end: range.end,
        }
    }
}

impl<'t> From<Match<'t>> for &'t [u8] {
    fn from(m: Match<'t>) -> &'t [u8] {
        m.as_bytes()
    }
}

impl<'t> From<Match<'t>> for Range<usize> {
    fn from(m: Match<'t>) -> Range<usize> {
        m.range()
    }
}

/// The key of a present group in `MatchResult::to_map`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Group {
    /// A group by number, `0` being the whole match.
    Index(usize),
    /// A named group.
    Name(String),
}

/// One match of a pattern: every capture group, with absent groups kept apart from empty ones.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchResult<'t> {
    subject: &'t [u8],
    slots: Slots,
    names: Arc<HashMap<String, usize>>,
}

impl<'t> MatchResult<'t> {
    pub(crate) fn new(subject: &'t [u8], slots: Slots, names: Arc<HashMap<String, usize>>) -> Self {
        MatchResult { subject, slots, names }
    }

    /// The number of group slots, including the whole match and absent groups.
    pub fn group_count(&self) -> usize {
        self.slots.len()
    }

    /// The group `n`, or `None` if it is absent or out of range.
    pub fn group(&self, n: usize) -> Option<Match<'t>> {
        match self.slots.get(n) {
            Some(Some(range)) => Some(Match::new(self.subject, range.clone())),
            _ => None,
        }
    }

    /// Returns `true` only if group `n` participated in the match.
    pub fn has(&self, n: usize) -> bool {
        self.group(n).is_some()
    }

    /// The text of group `n`.
    pub fn get(&self, n: usize) -> Result<&'t [u8]> {
        self.group(n)
            .map(|m| m.as_bytes())
            .ok_or(Error::GroupNotMatched(n))
    }

    /// The text of group `n` as UTF-8.
    pub fn get_str(&self, n: usize) -> Result<&'t str> {
        self.group(n).ok_or(Error::GroupNotMatched(n))?.as_str()
    }

    /// The text of group `n`, `None` when absent.
    pub fn get_or_null(&self, n: usize) -> Option<&'t [u8]> {
        self.group(n).map(|m| m.as_bytes())
    }

    /// The text of group `n`, empty when absent.
    pub fn get_or_empty(&self, n: usize) -> &'t [u8] {
        self.get_or_null(n).unwrap_or_default()
    }

    /// The byte offset of group `n` in the subject.
    pub fn offset(&self, n: usize) -> Result<usize> {
        self.group(n).map(|m| m.start()).ok_or(Error::GroupNotMatched(n))
    }

    /// The byte range of group `n` in the subject.
    pub fn byte_range(&self, n: usize) -> Result<Range<usize>> {
        self.group(n).map(|m| m.range()).ok_or(Error::GroupNotMatched(n))
    }

    /// The whole match.
    pub fn as_bytes(&self) -> &'t [u8] {
        self.get_or_empty(0)
    }

    /// The starting byte offset of the whole match.
    pub fn start(&self) -> usize {
        self.group(0).map_or(0, |m| m.start())
    }

    /// The ending byte offset of the whole match.
    pub fn end(&self) -> usize {
        self.group(0).map_or(0, |m| m.end())
    }

    /// The group number of a named group.
    pub fn index_of(&self, name: &str) -> Result<usize> {
        self.names
            .get(name)
            .copied()
            .ok_or_else(|| Error::UnknownGroup(name.to_owned()))
    }

    /// The text of a named group.
    pub fn get_named(&self, name: &str) -> Result<&'t [u8]> {
        self.get(self.index_of(name)?)
    }

    /// The text of a named group, `None` when absent or unknown.
    pub fn get_named_or_null(&self, name: &str) -> Option<&'t [u8]> {
        self.index_of(name).ok().and_then(|n| self.get_or_null(n))
    }

    /// Returns `true` only if the named group participated in the match.
    pub fn has_named(&self, name: &str) -> bool {
        self.index_of(name).map_or(false, |n| self.has(n))
    }

    /// Iterate over every group slot in order.
    pub fn iter(&self) -> impl Iterator<Item = Option<Match<'t>>> + '_ {
        (0..self.slots.len()).map(move |n| self.group(n))
    }

    /// Every present group, by number and by name.
    pub fn to_map(&self) -> BTreeMap<Group, &'t [u8]> {
        let mut map = BTreeMap::new();

        for (n, m) in self.iter().enumerate() {
            if let Some(m) = m {
                map.insert(Group::Index(n), m.as_bytes());
            }
        }

        for (name, &n) in self.names.iter() {
            if let Some(text) = self.get_or_null(n) {
                map.insert(Group::Name(name.clone()), text);
            }
        }

        map
    }
}

impl fmt::Display for MatchResult<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(self.as_bytes()))
    }
}

/// Every non-overlapping match of a pattern, in subject order.
#[repr(transparent)]
#[derive(Clone, Debug, Default, PartialEq, Eq, Deref, From, Index, Into, IntoIterator)]
#[deref(forward)]
pub struct MatchAll<'t>(Vec<MatchResult<'t>>);

impl<'t> FromIterator<MatchResult<'t>> for MatchAll<'t> {
    fn from_iter<T: IntoIterator<Item = MatchResult<'t>>>(iter: T) -> Self {
        Self(Vec::from_iter(iter))
    }
}
