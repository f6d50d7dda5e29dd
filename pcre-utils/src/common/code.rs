use std::collections::HashMap;
use std::ptr;
use std::slice;
use std::str;

use foreign_types::{foreign_type, ForeignType, ForeignTypeRef};
use libc::c_int;

use crate::{
    compile::{Error as CompileError, Flags},
    error::AsResult,
    ffi, Result,
};

foreign_type! {
    /// A compiled pattern that can then be used to match subjects.
    pub unsafe type Code: Send + Sync {
        type CType = ffi::pcre2_code_8;

        fn drop = free_code;
    }
}

unsafe fn free_code(code: *mut ffi::pcre2_code_8) {
    ffi::pcre2_code_free_8(code)
}

impl Code {
    /// Compile a pattern body with the given flags.
    ///
    /// When `jit` is set the compiled code is also handed to the JIT compiler;
    /// failing that is not an error, the interpreter runs the pattern instead.
    pub fn compile(expr: &str, flags: Flags, jit: bool) -> Result<Code> {
        let mut code = 0 as c_int;
        let mut offset = 0usize;

        let p = unsafe {
            ffi::pcre2_compile_8(
                expr.as_ptr(),
                expr.len(),
                flags.bits(),
                &mut code,
                &mut offset,
                ptr::null_mut(),
            )
        };

        if p.is_null() {
            return Err(CompileError::new(code, offset).into());
        }

        let compiled = unsafe { Code::from_ptr(p) };

        if jit {
            let rc = unsafe { ffi::pcre2_jit_compile_8(compiled.as_ptr(), ffi::PCRE2_JIT_COMPLETE) };

            if rc != 0 {
                debug!("pattern `{}` runs without JIT, code {}", expr, rc);
            }
        }

        Ok(compiled)
    }
}

impl CodeRef {
    fn info(&self, what: u32) -> Result<u32> {
        let mut value = 0u32;

        let rc = unsafe { ffi::pcre2_pattern_info_8(self.as_ptr(), what, &mut value as *mut u32 as *mut _) };

        rc.map(|_| value)
    }

    /// The number of capture groups in the pattern, not counting the whole match.
    pub fn capture_count(&self) -> Result<usize> {
        self.info(ffi::PCRE2_INFO_CAPTURECOUNT).map(|n| n as usize)
    }

    /// Whether the pattern runs in UTF mode, either from flags or from a leading `(*UTF)`.
    pub fn is_utf(&self) -> Result<bool> {
        self.info(ffi::PCRE2_INFO_ALLOPTIONS)
            .map(|options| options & ffi::PCRE2_UTF != 0)
    }

    /// The named capture groups of the pattern, mapped to their group numbers.
    pub fn names(&self) -> Result<HashMap<String, usize>> {
        let count = self.info(ffi::PCRE2_INFO_NAMECOUNT)? as usize;

        if count == 0 {
            return Ok(HashMap::new());
        }

        let size = self.info(ffi::PCRE2_INFO_NAMEENTRYSIZE)? as usize;
        let mut table: *const u8 = ptr::null();

        let rc = unsafe {
            ffi::pcre2_pattern_info_8(
                self.as_ptr(),
                ffi::PCRE2_INFO_NAMETABLE,
                &mut table as *mut *const u8 as *mut _,
            )
        };

        rc.and_then(|_| {
            // each entry is a big-endian group number followed by the NUL terminated name
            let table = unsafe { slice::from_raw_parts(table, count * size) };

            table
                .chunks_exact(size)
                .map(|entry| -> Result<(String, usize)> {
                    let group = (entry[0] as usize) << 8 | entry[1] as usize;
                    let name = &entry[2..];
                    let end = name.iter().position(|&b| b == 0).unwrap_or(name.len());

                    Ok((str::from_utf8(&name[..end])?.to_owned(), group))
                })
                .collect()
        })
    }
}
