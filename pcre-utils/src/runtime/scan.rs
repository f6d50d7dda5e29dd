use foreign_types::ForeignTypeRef;

use crate::{
    common::CodeRef,
    error::AsResult,
    ffi,
    runtime::{MatchContextRef, MatchData, MatchDataRef, Slots},
    Result,
};

/// Run one match attempt of `code` against `subject` from `offset`.
///
/// Returns `None` when the engine finds no match; every other failure is an error.
pub fn exec(
    code: &CodeRef,
    subject: &[u8],
    offset: usize,
    options: u32,
    md: &MatchDataRef,
    ctx: &MatchContextRef,
) -> Result<Option<Slots>> {
    let rc = unsafe {
        ffi::pcre2_match_8(
            code.as_ptr(),
            subject.as_ptr(),
            subject.len(),
            offset,
            options,
            md.as_ptr(),
            ctx.as_ptr(),
        )
    };

    if rc == ffi::PCRE2_ERROR_NOMATCH {
        trace!("no match from offset {}", offset);

        return Ok(None);
    }

    let rc = rc.ok()?;

    Ok(Some(md.slots(rc)))
}

/// Successive non-overlapping matches of a pattern in a subject.
///
/// After an empty match the next attempt starts at the same position and
/// must be non-empty; if that fails the position advances by one character.
pub struct Scanner<'a> {
    code: &'a CodeRef,
    ctx: &'a MatchContextRef,
    subject: &'a [u8],
    md: MatchData,
    utf: bool,
    offset: usize,
    options: u32,
    checked: bool,
    done: bool,
}

impl<'a> Scanner<'a> {
    /// Create a scanner that starts at `offset`.
    pub fn new(code: &'a CodeRef, ctx: &'a MatchContextRef, subject: &'a [u8], offset: usize) -> Result<Self> {
        Ok(Scanner {
            code,
            ctx,
            subject,
            md: MatchData::for_code(code)?,
            utf: code.is_utf()?,
            offset,
            options: 0,
            checked: false,
            done: false,
        })
    }

    fn advance(&mut self) {
        self.offset += 1;

        if self.utf {
            while self.offset < self.subject.len() && self.subject[self.offset] & 0xC0 == 0x80 {
                self.offset += 1;
            }
        }
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Result<Slots>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            // the subject is validated once, by the first attempt
            let options = if self.checked {
                self.options | ffi::PCRE2_NO_UTF_CHECK
            } else {
                self.options
            };

            let res = exec(self.code, self.subject, self.offset, options, &self.md, self.ctx);

            self.checked = true;

            match res {
                Err(err) => {
                    self.done = true;

                    return Some(Err(err));
                }
                Ok(Some(slots)) => {
                    let (start, end) = match slots.first() {
                        Some(Some(m)) => (m.start, m.end),
                        _ => (self.offset, self.offset),
                    };

                    self.options = if start == end {
                        ffi::PCRE2_NOTEMPTY_ATSTART | ffi::PCRE2_ANCHORED
                    } else {
                        0
                    };
                    self.offset = end;

                    return Some(Ok(slots));
                }
                Ok(None) if self.options != 0 && self.offset < self.subject.len() => {
                    self.options = 0;
                    self.advance();
                }
                Ok(None) => {
                    self.done = true;
                }
            }
        }

        None
    }
}
