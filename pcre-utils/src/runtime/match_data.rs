use std::ops::Range;
use std::ptr;
use std::slice;

use foreign_types::{foreign_type, ForeignType, ForeignTypeRef};

use crate::{common::CodeRef, common::Error as EngineError, ffi, Result};

/// The ovector value of a group that did not participate in the match.
const UNSET: usize = usize::MAX;

/// The byte range of every capture group of one match, `None` for an absent group.
pub type Slots = Vec<Option<Range<usize>>>;

foreign_type! {
    /// A block of memory that receives the offsets of a match.
    pub unsafe type MatchData: Send {
        type CType = ffi::pcre2_match_data_8;

        fn drop = free_match_data;
    }
}

unsafe fn free_match_data(md: *mut ffi::pcre2_match_data_8) {
    ffi::pcre2_match_data_free_8(md)
}

impl MatchData {
    /// Allocate match data large enough for every capture group of the code.
    pub fn for_code(code: &CodeRef) -> Result<MatchData> {
        let p = unsafe { ffi::pcre2_match_data_create_from_pattern_8(code.as_ptr(), ptr::null_mut()) };

        if p.is_null() {
            Err(EngineError::InternalEngineError.into())
        } else {
            Ok(unsafe { MatchData::from_ptr(p) })
        }
    }
}

impl MatchDataRef {
    /// The raw offset pairs of the last match.
    pub fn ovector(&self) -> &[usize] {
        unsafe {
            let n = ffi::pcre2_get_ovector_count_8(self.as_ptr()) as usize;
            let p = ffi::pcre2_get_ovector_pointer_8(self.as_ptr());

            slice::from_raw_parts(p, n * 2)
        }
    }

    /// The group ranges of the last match, given the positive match status.
    ///
    /// A status of zero means the ovector was too small and every pair was filled.
    pub fn slots(&self, rc: i32) -> Slots {
        let ovector = self.ovector();
        let groups = if rc > 0 { rc as usize } else { ovector.len() / 2 };

        ovector
            .chunks_exact(2)
            .enumerate()
            .map(|(i, pair)| {
                if i < groups && pair[0] != UNSET && pair[1] != UNSET {
                    // `\K` in a lookahead may report a start past the end
                    Some(pair[0].min(pair[1])..pair[1])
                } else {
                    None
                }
            })
            .collect()
    }
}

foreign_type! {
    /// Resource limits applied while matching.
    pub unsafe type MatchContext: Send + Sync {
        type CType = ffi::pcre2_match_context_8;

        fn drop = free_match_context;
    }
}

unsafe fn free_match_context(ctx: *mut ffi::pcre2_match_context_8) {
    ffi::pcre2_match_context_free_8(ctx)
}

impl MatchContext {
    /// Create a context with the given backtracking and recursion depth limits.
    pub fn with_limits(backtrack_limit: u32, recursion_limit: u32) -> Result<MatchContext> {
        let p = unsafe { ffi::pcre2_match_context_create_8(ptr::null_mut()) };

        if p.is_null() {
            return Err(EngineError::InternalEngineError.into());
        }

        let ctx = unsafe { MatchContext::from_ptr(p) };

        unsafe {
            ffi::pcre2_set_match_limit_8(ctx.as_ptr(), backtrack_limit);
            ffi::pcre2_set_depth_limit_8(ctx.as_ptr(), recursion_limit);
        }

        Ok(ctx)
    }
}

#[cfg(test)]
mod tests {
    use crate::common::Code;
    use crate::compile::Flags;

    use super::*;

    #[test]
    fn test_match_data() {
        let _ = pretty_env_logger::try_init();

        let code = Code::compile("(a)(x)?(b)", Flags::empty(), false).unwrap();
        let md = MatchData::for_code(&code).unwrap();

        assert_eq!(md.ovector().len(), 8);

        let ctx = MatchContext::with_limits(1000, 1000).unwrap();
        let subject = b"zab";

        let rc = unsafe {
            ffi::pcre2_match_8(
                code.as_ptr(),
                subject.as_ptr(),
                subject.len(),
                0,
                0,
                md.as_ptr(),
                ctx.as_ptr(),
            )
        };

        assert_eq!(rc, 4);
        assert_eq!(md.slots(rc), vec![Some(1..3), Some(1..2), None, Some(2..3)]);
    }
}
