//! Resolves an arbitrary byte offset to the start of its line.

use crate::error::Result;
use crate::reader::ByteReader;

/// Returns the smallest line-start `s` such that `s >= off`: either `0`
/// (when `off == 0`), the file's size (when `off` is past it), or the
/// offset immediately following the first LF found at or after `off - 1`.
///
/// This is the only primitive that answers "what line contains this byte
/// offset?" ([`crate::cache::BisectCache`] and [`crate::bisect::bisect`]
/// both route every probe through it, directly or via the cache).
pub fn line_start_at(reader: &mut ByteReader, off: i64) -> Result<i64> {
    debug_assert!(off >= 0);
    if off == 0 {
        return Ok(0);
    }
    let size = reader.size();
    if off > size {
        return Ok(size);
    }
    reader.seek_abs(off - 1);
    loop {
        if let Some(found) = reader.find_lf_in_buffer() {
            return Ok(found);
        }
        match reader.get_byte()? {
            None => return Ok(reader.tell()),
            Some(b'\n') => return Ok(reader.tell()),
            Some(_) => {}
        }
    }
}
