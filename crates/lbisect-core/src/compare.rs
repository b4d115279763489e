//! The line comparator: reads one line and evaluates a comparison
//! predicate against an in-memory key, short-circuiting on the first
//! differing byte.

use crate::error::Result;
use crate::reader::ByteReader;

/// A comparison predicate evaluated against a line during bisection.
///
/// Deliberately a closed, three-way tag rather than a trait object: the
/// set never grows and the dispatch sits on the hottest path in the
/// engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareMode {
    /// `key <= line`.
    Le,
    /// `key < line`.
    Lt,
    /// Prefix search: `key` followed by a virtual byte greater than any
    /// real byte is `< line`. Used to find the right boundary of a
    /// prefix query.
    Lp,
}

/// Evaluates `predicate(line_at(line_start), key, mode)` without ever
/// materializing the line: bytes are compared one at a time against
/// `key` and the read stops at the first difference, at LF, or at
/// end-of-file.
///
/// `key` must not contain an LF; the engine assumes this as a
/// precondition (callers truncate keys at the first LF before calling
/// in).
pub fn predicate(
    reader: &mut ByteReader,
    line_start: i64,
    key: &[u8],
    mode: CompareMode,
) -> Result<bool> {
    reader.seek_abs(line_start);
    let Some(first) = reader.get_byte()? else {
        // Phantom past-end line: treat as infinity so bisection always
        // terminates on the right, regardless of mode.
        return Ok(true);
    };
    reader.unget();

    let mut rest = key;
    loop {
        let c = reader.get_byte()?;
        match c {
            None | Some(b'\n') => {
                // The line ended first: it's a strict prefix of the key
                // bytes examined so far, so line < key lexicographically.
                return Ok(mode == CompareMode::Le && rest.is_empty());
            }
            Some(c) => {
                let Some((&x, tail)) = rest.split_first() else {
                    // The key ended first: key is a strict prefix of line,
                    // so key < line for Le/Lt, but not for Lp (key is a
                    // prefix, not strictly less with the virtual sentinel).
                    return Ok(mode != CompareMode::Lp);
                };
                if x != c {
                    return Ok(x < c);
                }
                rest = tail;
            }
        }
    }
}
