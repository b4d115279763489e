//! Optionally shrinks a reader's effective size to exclude a trailing
//! line that has no terminating LF.
//!
//! Useful when the sorted file may be concurrently appended to: the
//! trailing partial record is made invisible to every subsequent
//! operation, so a writer racing to finish that line can't perturb an
//! in-flight search.

use crate::error::Result;
use crate::reader::ByteReader;

/// Scans backward from `reader.size()` until an LF is found or the file
/// empties, then applies that position as the reader's new limit.
pub fn trim_incomplete(reader: &mut ByteReader) -> Result<()> {
    let mut size = reader.size();
    while size != 0 {
        reader.seek_abs(size - 1);
        match reader.get_byte()? {
            None | Some(b'\n') => break,
            Some(_) => size -= 1,
        }
    }
    reader.limit(size);
    Ok(())
}
