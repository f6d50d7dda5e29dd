// pcregrep: search input files for lines matching a pattern.
//
// Lines are split with the facade itself, each line is matched with a pattern
// compiled once, and matches are printed with their file name and line number.
//
// Usage:
//
//     cargo run --example pcregrep -- [-i] [-u] [-c] [-o] [-r <replacement>] <pattern> <file>...
//
// Example:
//
//     cargo run --example pcregrep -- -i 'fn\s+(\w+)' src/lib.rs

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::debug;
use structopt::StructOpt;

use pcre_utils::prelude::*;

#[derive(Debug, StructOpt)]
#[structopt(name = "pcregrep", about = "Search the given input files for a pattern.")]
struct Opt {
    /// case-insensitive matching
    #[structopt(short = "i")]
    caseless: bool,

    /// treat the pattern and the input as UTF-8
    #[structopt(short = "u")]
    utf8: bool,

    /// only print the number of matching lines
    #[structopt(short = "c")]
    count: bool,

    /// only print the matched part of each line
    #[structopt(short = "o")]
    only_matching: bool,

    /// print lines with every match replaced, `$1` refers to the first group
    #[structopt(short = "r")]
    replacement: Option<String>,

    /// pattern body, without delimiters
    pattern: String,

    /// input files
    #[structopt(parse(from_os_str), required = true)]
    files: Vec<PathBuf>,
}

fn main() -> Result<()> {
    pretty_env_logger::init();

    let opt = Opt::from_args();

    let mut flags = String::new();
    if opt.caseless {
        flags.push('i');
    }
    if opt.utf8 {
        flags.push('u');
    }

    let pcre = Pcre::new();
    let re = pcre
        .compile(&opt.pattern, &flags)
        .with_context(|| format!("compile pattern `{}`", opt.pattern))?;

    debug!("pattern compiled as `{}`", re);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    for path in &opt.files {
        let data = fs::read(path).with_context(|| format!("read input file {}", path.display()))?;
        let lines = pcre.split(r"\r?\n", &data, None, "")?;
        let mut matched = 0;

        for (no, line) in lines.iter().enumerate() {
            let all = re
                .find_all(*line)
                .with_context(|| format!("scan {}:{}", path.display(), no + 1))?;

            if all.is_empty() {
                continue;
            }

            matched += 1;

            if opt.count {
                continue;
            }

            write!(out, "{}:{}:", path.display(), no + 1)?;

            if let Some(ref replacement) = opt.replacement {
                out.write_all(&re.replace(*line, replacement.as_str(), None)?)?;
            } else if opt.only_matching {
                for (i, m) in all.iter().enumerate() {
                    if i > 0 {
                        out.write_all(b" ")?;
                    }
                    out.write_all(m.as_bytes())?;
                }
            } else {
                out.write_all(line)?;
            }

            out.write_all(b"\n")?;
        }

        if opt.count {
            writeln!(out, "{}:{}", path.display(), matched)?;
        }
    }

    Ok(())
}
