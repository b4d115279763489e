//! Drives binary search over a monotonic predicate defined by a key and a
//! comparison mode, and composes the higher-level interval search.

use crate::cache::BisectCache;
use crate::compare::{predicate, CompareMode};
use crate::error::Result;
use crate::reader::ByteReader;

/// Returns the smallest line-start `s` in `[lo, hi]` for which
/// `predicate(line_at(s), key, mode)` holds, or the line-start of `hi` if
/// no such `s` exists. `hi` is clamped to the reader's current size.
///
/// `key` must not contain an LF.
pub fn bisect(
    reader: &mut ByteReader,
    lo: i64,
    hi: i64,
    key: &[u8],
    mode: CompareMode,
) -> Result<i64> {
    let mut cache = BisectCache::new();
    bisect_with_cache(reader, &mut cache, lo, hi, key, mode)
}

fn bisect_with_cache(
    reader: &mut ByteReader,
    cache: &mut BisectCache,
    lo: i64,
    mut hi: i64,
    key: &[u8],
    mode: CompareMode,
) -> Result<i64> {
    let size = reader.size();
    if hi > size {
        hi = size;
    }
    if key.is_empty() {
        if mode == CompareMode::Le {
            // The empty key is <= every line; the answer is always lo's
            // line start, found faster by clamping hi down to lo.
            hi = lo;
        }
        if mode == CompareMode::Lp && hi == size {
            // The virtual-byte key exceeds every byte in the file.
            return Ok(hi);
        }
    }
    if lo >= hi {
        return cache.lookup_line_start_only(reader, lo);
    }

    let mut lo = lo;
    let mut mid = lo;
    let mut mid_line_start = lo;
    while lo < hi {
        mid = (lo + hi) / 2;
        let (line_start, pred) = cache.lookup_with_predicate(reader, mid, key, mode)?;
        mid_line_start = line_start;
        if pred {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    if mid == lo {
        Ok(mid_line_start)
    } else {
        cache.lookup_line_start_only(reader, lo)
    }
}

/// Computes the half-open `[start, end)` byte range of lines whose key
/// falls within `[key_x, key_y]` under `mode`, using the left-closed
/// convention (`LE`) for the low boundary.
///
/// Uses a fresh cache for each of the two sub-searches: the cache's
/// predicate field is only meaningful for a fixed `(key, mode)`, and `key`
/// or `mode` always differs between the start and end search.
pub fn bisect_interval(
    reader: &mut ByteReader,
    lo: i64,
    hi: i64,
    key_x: &[u8],
    key_y: &[u8],
    mode: CompareMode,
) -> Result<(i64, i64)> {
    let mut start_cache = BisectCache::new();
    let start = bisect_with_cache(reader, &mut start_cache, lo, hi, key_x, CompareMode::Le)?;
    if mode == CompareMode::Le && key_x == key_y {
        return Ok((start, start));
    }
    let mut end_cache = BisectCache::new();
    let end = bisect_with_cache(reader, &mut end_cache, start, hi, key_y, mode)?;
    Ok((start, end))
}

/// Answers whether `bisect_interval(lo, hi, key, key, mode)` would be
/// non-empty, without necessarily computing both ends of the range.
///
/// Mirrors the CLI's "detect-only" output mode: for `mode = Le` the
/// resulting interval is always empty (the shortcut in
/// [`bisect_interval`] collapses `start == end` whenever the two keys are
/// equal under `Le`), so this returns `false` immediately without
/// touching the file again. Otherwise it runs a single `Le` bisection to
/// find `start`, then evaluates `mode`'s predicate directly on the line
/// at `start`.
pub fn detect(reader: &mut ByteReader, lo: i64, hi: i64, key: &[u8], mode: CompareMode) -> Result<bool> {
    if mode == CompareMode::Le {
        return Ok(false);
    }
    let start = bisect(reader, lo, hi, key, CompareMode::Le)?;
    let no_match = predicate(reader, start, key, mode)?;
    Ok(!no_match)
}
