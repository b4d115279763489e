//! lbisect CLI - binary search (bisection) in a line-sorted text file
//!
//! Usage:
//!   lbisect -<flags> <sorted-text-file> <key-x> [<key-y>]
//!
//! <key-x> is the first key to search for.
//! <key-y> is the last key to search for; default is <key-x>.
//!
//! Flags (each group at most one occurrence):
//!   e: boundary mode LE (bisect-left, open interval end)
//!   t: boundary mode LT (bisect-right, closed interval end)
//!   p: boundary mode LP (prefix search)
//!   b: start mode LE for the interval start (default)
//!   a: start mode LT for the interval start (append position; only valid
//!      with -e -o and no <key-y>)
//!   c: print matched file contents (default)
//!   o: print decimal offsets
//!   q: print nothing, use exit code only
//!   i: ignore an incomplete (unterminated) trailing line

use std::env;
use std::io::{self, Write};
use std::process;

use lbisect_core::{bisect, bisect_interval, detect, read_range, trim_incomplete, ByteReader, CompareMode};

fn main() {
    let args: Vec<String> = env::args().collect();
    match run(&args) {
        Ok(code) => process::exit(code),
        Err(CliError::Usage(msg)) => {
            eprintln!("usage error: {}", msg);
            process::exit(1);
        }
        Err(CliError::Io(e)) => {
            eprintln!("error: {}", e);
            process::exit(2);
        }
    }
}

#[derive(Debug)]
enum CliError {
    Usage(String),
    Io(lbisect_core::Error),
}

impl From<lbisect_core::Error> for CliError {
    fn from(e: lbisect_core::Error) -> Self {
        CliError::Io(e)
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(lbisect_core::Error::from(e))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Contents,
    Offsets,
    Detect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Incomplete {
    Ignore,
    Use,
}

struct Config {
    boundary: CompareMode,
    start_mode: CompareMode,
    output: OutputMode,
    incomplete: Incomplete,
    file: String,
    key_x: Vec<u8>,
    key_y: Option<Vec<u8>>,
}

fn run(args: &[String]) -> Result<i32, CliError> {
    let config = parse_args(args)?;

    let mut reader = ByteReader::open(&config.file, None)?;
    if config.incomplete == Incomplete::Ignore {
        trim_incomplete(&mut reader)?;
    }
    let size = reader.size();

    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    if config.key_y.is_none() && config.boundary == CompareMode::Le && config.output == OutputMode::Offsets {
        let start = bisect(&mut reader, 0, size, &config.key_x, config.start_mode)?;
        writeln!(stdout, "{}", start)?;
        return Ok(0);
    }

    let single_key_or_equal = match &config.key_y {
        None => true,
        Some(y) => y == &config.key_x,
    };
    if config.output == OutputMode::Detect && single_key_or_equal {
        let found = detect(&mut reader, 0, size, &config.key_x, config.boundary)?;
        return Ok(if found { 0 } else { 3 });
    }

    let key_y: &[u8] = config.key_y.as_deref().unwrap_or(&config.key_x);
    let (start, end) = bisect_interval(&mut reader, 0, size, &config.key_x, key_y, config.boundary)?;
    match config.output {
        OutputMode::Contents => read_range(&mut reader, start, end, &mut stdout)?,
        OutputMode::Offsets => writeln!(stdout, "{} {}", start, end)?,
        OutputMode::Detect => {}
    }
    Ok(if start >= end { 3 } else { 0 })
}

fn truncate_at_lf(raw: &str) -> Vec<u8> {
    let bytes = raw.as_bytes();
    match bytes.iter().position(|&b| b == b'\n') {
        Some(i) => bytes[..i].to_vec(),
        None => bytes.to_vec(),
    }
}

fn parse_args(args: &[String]) -> Result<Config, CliError> {
    if args.len() != 4 && args.len() != 5 {
        return Err(CliError::Usage("incorrect argument count".into()));
    }
    let flags = args[1]
        .strip_prefix('-')
        .ok_or_else(|| CliError::Usage("missing flags".into()))?;
    let file = args[2].clone();
    let key_x = truncate_at_lf(&args[3]);
    let key_y = args.get(4).map(|s| truncate_at_lf(s));

    let mut boundary: Option<CompareMode> = None;
    let mut start_mode: Option<CompareMode> = None;
    let mut output: Option<OutputMode> = None;
    let mut incomplete: Option<Incomplete> = None;

    for flag in flags.chars() {
        match flag {
            'e' => set_once(&mut boundary, CompareMode::Le, "multiple boundary flags")?,
            't' => set_once(&mut boundary, CompareMode::Lt, "multiple boundary flags")?,
            'p' => set_once(&mut boundary, CompareMode::Lp, "multiple boundary flags")?,
            'b' => set_once(&mut start_mode, CompareMode::Le, "multiple start flags")?,
            'a' => set_once(&mut start_mode, CompareMode::Lt, "multiple start flags")?,
            'o' => set_once(&mut output, OutputMode::Offsets, "multiple printing flags")?,
            'c' => set_once(&mut output, OutputMode::Contents, "multiple printing flags")?,
            'q' => set_once(&mut output, OutputMode::Detect, "multiple printing flags")?,
            'i' => set_once(&mut incomplete, Incomplete::Ignore, "multiple incomplete flags")?,
            _ => return Err(CliError::Usage(format!("unsupported flag: {}", flag))),
        }
    }

    let output = output.unwrap_or(OutputMode::Contents);
    let incomplete = incomplete.unwrap_or(Incomplete::Use);
    let start_mode = start_mode.unwrap_or(CompareMode::Le);
    let boundary = boundary.ok_or_else(|| CliError::Usage("missing boundary flag".into()))?;

    let append_mode_ok =
        key_y.is_none() && boundary == CompareMode::Le && output == OutputMode::Offsets;
    if start_mode == CompareMode::Lt && !append_mode_ok {
        return Err(CliError::Usage(
            "flag -a needs -eo and no <key-y>".into(),
        ));
    }
    if key_y.is_none() && output != OutputMode::Offsets && boundary == CompareMode::Le {
        return Err(CliError::Usage(
            "single-key contents is always empty".into(),
        ));
    }

    Ok(Config {
        boundary,
        start_mode,
        output,
        incomplete,
        file,
        key_x,
        key_y,
    })
}

fn set_once<T>(slot: &mut Option<T>, value: T, conflict_msg: &str) -> Result<(), CliError> {
    if slot.is_some() {
        return Err(CliError::Usage(conflict_msg.into()));
    }
    *slot = Some(value);
    Ok(())
}
