//! Collaborator contract for streaming a byte range out of the file.
//!
//! Decimal offset formatting and binary-mode switching for stdout are the
//! CLI's job (see the `lbisect-cli` crate); this module only knows how to
//! push `[start, end)` bytes out of a [`ByteReader`] and into an
//! `io::Write` sink, in order, without materializing the range in memory.

use std::io::Write;

use crate::error::{Error, Result};
use crate::reader::ByteReader;

/// Writes bytes `[start, end)` of the file to `sink`, in order. Does
/// nothing if `start >= end`. A short write by the sink is fatal.
pub fn read_range(reader: &mut ByteReader, start: i64, end: i64, sink: &mut dyn Write) -> Result<()> {
    if start >= end {
        return Ok(());
    }
    reader.seek_abs(start);
    let mut remaining = end - start;
    while remaining > 0 {
        let chunk = reader.peek(remaining)?;
        if chunk.is_empty() {
            break;
        }
        let n = chunk.len();
        sink.write_all(chunk).map_err(Error::Io)?;
        reader.seek_rel(n as i64);
        remaining -= n as i64;
    }
    Ok(())
}
