//! Random-access buffered byte reader.
//!
//! [`ByteReader`] is the single choke point for all file I/O performed by
//! the bisection engine: every `seek`/`read` call the kernel ever sees goes
//! through here, so that (a) no `lseek` is issued when the requested offset
//! is already buffered, (b) no `read` larger than the buffer capacity is
//! ever issued, and (c) refills are always aligned to a buffer-sized
//! granule, so successive gets across a granule boundary read exactly once.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use crate::error::{Error, Result};

/// Default buffer capacity, in bytes. Must stay a power of two.
pub const DEFAULT_BUFFER_SIZE: usize = 8192;

fn map_seek_err(e: std::io::Error) -> Error {
    #[cfg(unix)]
    {
        if e.raw_os_error() == Some(libc::ESPIPE) {
            return Error::NotSeekable;
        }
    }
    Error::Io(e)
}

/// A random-access, buffered byte reader over a read-only file of known
/// (possibly artificially reduced) size.
///
/// See the module documentation for the I/O discipline this type enforces.
pub struct ByteReader {
    file: File,
    /// Effective size; may be smaller than the file's true size after
    /// [`ByteReader::limit`].
    size: i64,
    /// Buffer capacity, a power of two.
    cap: usize,
    buf: Vec<u8>,
    /// Absolute file offset at which `buf[0]` lives. Negative in the cold
    /// (never-filled) state, chosen so that `ofs + p == 0`.
    ofs: i64,
    /// Read position within `buf`. `p > cap` marks the cold state.
    p: usize,
    /// One past the last valid byte in `buf`. Tracks `p` in the cold state.
    end: usize,
    reads: u64,
}

impl ByteReader {
    /// Opens `path` read-only. If `size_hint` is `None`, the size is
    /// determined by seeking to the end of the file.
    pub fn open(path: impl AsRef<Path>, size_hint: Option<i64>) -> Result<Self> {
        Self::open_with_capacity(path, size_hint, DEFAULT_BUFFER_SIZE)
    }

    /// Like [`ByteReader::open`] but with an explicit buffer capacity
    /// (must be a power of two). Mostly useful for tests that want to
    /// observe granule boundaries without a multi-megabyte fixture file.
    pub fn open_with_capacity(
        path: impl AsRef<Path>,
        size_hint: Option<i64>,
        cap: usize,
    ) -> Result<Self> {
        assert!(cap > 0 && cap & (cap - 1) == 0, "buffer capacity must be a power of two");
        let mut file = File::open(path)?;
        let size = match size_hint {
            Some(s) => s,
            None => file.seek(SeekFrom::End(0)).map_err(map_seek_err)? as i64,
        };
        Ok(ByteReader {
            file,
            size,
            cap,
            buf: vec![0u8; cap],
            ofs: -(cap as i64 + 1),
            p: cap + 1,
            end: cap + 1,
            reads: 0,
        })
    }

    /// Current effective size of the file.
    #[inline]
    pub fn size(&self) -> i64 {
        self.size
    }

    /// Number of `read(2)`-equivalent calls issued so far. Exposed for
    /// tests exercising the single-read-per-granule property; not part of
    /// the engine's behavioral contract.
    #[inline]
    pub fn read_count(&self) -> u64 {
        self.reads
    }

    #[inline]
    fn is_cold(&self) -> bool {
        self.p > self.cap
    }

    #[inline]
    fn available(&self) -> i64 {
        if self.is_cold() {
            0
        } else {
            self.end as i64 - self.p as i64
        }
    }

    /// Shrinks the effective size if `new_size` is smaller than the
    /// current size. Returns the (possibly unchanged) effective size.
    pub fn limit(&mut self, new_size: i64) -> i64 {
        if new_size < self.size {
            self.size = new_size;
            let buffered_end = self.ofs + self.end as i64;
            if buffered_end > self.size && !self.is_cold() {
                let cursor = self.ofs + self.p as i64;
                if cursor > self.size {
                    self.invalidate_at(cursor);
                } else {
                    self.end = (self.size - self.ofs) as usize;
                }
            }
        }
        self.size
    }

    fn invalidate_at(&mut self, cursor: i64) {
        self.p = self.cap + 1;
        self.end = self.cap + 1;
        self.ofs = cursor - (self.cap as i64 + 1);
    }

    /// Seeks to an absolute offset. `off` may exceed `size()`; this never
    /// touches the kernel, it only adjusts bookkeeping.
    pub fn seek_abs(&mut self, off: i64) {
        debug_assert!(off >= 0);
        if !self.is_cold() {
            let delta = off - self.ofs;
            if delta >= 0 && (delta as u64) <= self.end as u64 {
                self.p = delta as usize;
                return;
            }
        }
        self.invalidate_at(off);
    }

    /// Seeks relative to the current cursor. Fast path when `delta >= 0`
    /// and the destination is already buffered; otherwise delegates to
    /// [`ByteReader::seek_abs`].
    pub fn seek_rel(&mut self, delta: i64) {
        let remaining = self.end as i64 - self.p as i64;
        if delta >= 0 && delta <= remaining {
            self.p = (self.p as i64 + delta) as usize;
        } else {
            let abs = self.ofs + self.p as i64 + delta;
            self.seek_abs(abs);
        }
    }

    /// Returns the next byte, or `None` at end-of-stream.
    pub fn get_byte(&mut self) -> Result<Option<u8>> {
        if self.p != self.end {
            let b = self.buf[self.p];
            self.p += 1;
            return Ok(Some(b));
        }
        self.fill_and_get()
    }

    fn fill_and_get(&mut self) -> Result<Option<u8>> {
        let cursor = self.ofs + self.p as i64;
        if cursor >= self.size {
            return Ok(None);
        }
        let aligned = cursor & !(self.cap as i64 - 1);
        if self.ofs != aligned {
            self.file
                .seek(SeekFrom::Start(aligned as u64))
                .map_err(map_seek_err)?;
            self.ofs = aligned;
        }
        let need = if aligned + self.cap as i64 > self.size {
            (self.size - aligned) as usize
        } else {
            self.cap
        };
        let got = self.file.read(&mut self.buf[..need])?;
        self.reads += 1;
        let filled_to = aligned + got as i64;
        if got < need && filled_to < self.size {
            self.size = filled_to;
        }
        self.p = (cursor - aligned) as usize;
        self.end = got;
        if filled_to <= cursor {
            // The read produced nothing past (or at) the cursor: genuine EOF.
            self.p = self.end;
            return Ok(None);
        }
        let b = self.buf[self.p];
        self.p += 1;
        Ok(Some(b))
    }

    /// Steps the cursor back by one byte. Only legal immediately after a
    /// `get_byte` call that returned `Some`.
    pub fn unget(&mut self) {
        debug_assert!(self.p > 0 && !self.is_cold());
        self.p -= 1;
    }

    /// Scans forward from the cursor for the next LF within the currently
    /// buffered granule. Returns the offset just past the LF on a match,
    /// advancing the cursor there; on a miss, advances the cursor to the
    /// end of the buffered granule and returns `None` so the next
    /// [`ByteReader::get_byte`] triggers a refill. Used by
    /// [`crate::locator::line_start_at`] to skip a whole granule of
    /// non-terminator bytes in one call instead of one `get_byte` at a
    /// time.
    pub(crate) fn find_lf_in_buffer(&mut self) -> Option<i64> {
        if self.available() <= 0 {
            return None;
        }
        match memchr::memchr(b'\n', &self.buf[self.p..self.end]) {
            Some(i) => {
                let at = self.ofs + self.p as i64 + i as i64;
                self.p += i + 1;
                Some(at + 1)
            }
            None => {
                self.p = self.end;
                None
            }
        }
    }

    /// Current absolute cursor position.
    #[inline]
    pub(crate) fn tell(&self) -> i64 {
        self.ofs + self.p as i64
    }

    /// Returns a contiguous slice of up to `max_len` buffered bytes at the
    /// current cursor, forcing one fill if the buffer is currently empty.
    /// Does not advance the cursor; the caller must `seek_rel` by the
    /// returned length to consume it.
    pub fn peek(&mut self, max_len: i64) -> Result<&[u8]> {
        if max_len <= 0 {
            return Ok(&[]);
        }
        let mut available = self.available();
        if available <= 0 {
            match self.get_byte()? {
                Some(_) => {
                    self.unget();
                    available = self.available();
                }
                None => return Ok(&[]),
            }
        }
        let n = std::cmp::min(max_len, available) as usize;
        Ok(&self.buf[self.p..self.p + n])
    }
}
