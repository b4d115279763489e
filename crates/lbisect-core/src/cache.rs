//! A two-slot memoization of `probe -> (line_start, predicate)`, valid for
//! a single `(key, mode)` pair.
//!
//! Binary search probes cluster: after resolving the line start for a
//! probe `m`, the next probe often lands in `[m, line_start(m)]`, which
//! resolves to the very same line. Two slots are enough to capture this:
//! successive iterations of a binary search tend to alternate between a
//! "left" and a "right" prior line start, and the post-search resolution
//! of the final low bound reuses one of them. Do not generalize this to
//! an unbounded map; the access pattern doesn't benefit from more slots.

use crate::compare::{predicate, CompareMode};
use crate::error::Result;
use crate::locator::line_start_at;
use crate::reader::ByteReader;

#[derive(Clone, Copy)]
struct Entry {
    probe_ofs: i64,
    line_start_ofs: i64,
    predicate_value: bool,
}

/// Cache status, mirroring the four reachable states of two optional
/// slots plus which one is "active" (the one an immediate requery with
/// the same probe would return).
#[derive(Clone, Copy, PartialEq, Eq)]
enum Status {
    None,
    OneActive,
    TwoSlot0Active,
    TwoSlot1Active,
}

/// A [`BisectCache`] is created fresh for each independent bisection and
/// must never be reused across a different `(key, mode)` pair: its
/// predicate field is only meaningful for the inputs it was populated
/// with.
pub struct BisectCache {
    slots: [Option<Entry>; 2],
    status: Status,
}

impl BisectCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        BisectCache {
            slots: [None, None],
            status: Status::None,
        }
    }

    fn active_index(&self) -> Option<usize> {
        match self.status {
            Status::None => None,
            Status::OneActive | Status::TwoSlot0Active => Some(0),
            Status::TwoSlot1Active => Some(1),
        }
    }

    fn mark_active(&mut self, idx: usize) {
        self.status = match (idx, self.slots[1].is_some()) {
            (0, false) => Status::OneActive,
            (0, true) => Status::TwoSlot0Active,
            (1, _) => Status::TwoSlot1Active,
            _ => unreachable!(),
        };
    }

    fn find_containing(&self, probe: i64) -> Option<usize> {
        self.slots.iter().position(|e| match e {
            Some(e) => e.probe_ofs <= probe && probe <= e.line_start_ofs,
            None => false,
        })
    }

    fn find_by_line_start(&self, line_start: i64) -> Option<usize> {
        self.slots.iter().position(|e| match e {
            Some(e) => e.line_start_ofs == line_start,
            None => false,
        })
    }

    /// Picks the slot index a freshly-computed line start should be
    /// written into: fill an empty slot if one exists, otherwise evict
    /// the currently inactive one.
    fn slot_for_new_entry(&self) -> usize {
        match (&self.slots[0], &self.slots[1]) {
            (None, _) => 0,
            (Some(_), None) => 1,
            (Some(_), Some(_)) => match self.active_index() {
                Some(0) => 1,
                Some(1) => 0,
                _ => 0,
            },
        }
    }

    /// Resolves `(line_start, predicate)` for `probe`, consulting and
    /// updating the cache as described in the module documentation.
    pub fn lookup_with_predicate(
        &mut self,
        reader: &mut ByteReader,
        probe: i64,
        key: &[u8],
        mode: CompareMode,
    ) -> Result<(i64, bool)> {
        debug_assert!(probe >= 0);
        if let Some(idx) = self.find_containing(probe) {
            self.mark_active(idx);
            let e = self.slots[idx].unwrap();
            return Ok((e.line_start_ofs, e.predicate_value));
        }

        let line_start = line_start_at(reader, probe)?;
        debug_assert!(probe <= line_start);

        if let Some(idx) = self.find_by_line_start(line_start) {
            self.mark_active(idx);
            let e = self.slots[idx].as_mut().unwrap();
            if e.probe_ofs > probe {
                e.probe_ofs = probe;
            }
            return Ok((line_start, e.predicate_value));
        }

        let idx = self.slot_for_new_entry();
        let predicate_value = predicate(reader, line_start, key, mode)?;
        self.slots[idx] = Some(Entry {
            probe_ofs: probe,
            line_start_ofs: line_start,
            predicate_value,
        });
        self.mark_active(idx);
        Ok((line_start, predicate_value))
    }

    /// Resolves just the line start for `probe`, never evaluating the
    /// predicate. If a matching line start is discovered but no existing
    /// slot covers it, the cache is left unchanged, since there's no
    /// predicate value to store for it.
    pub fn lookup_line_start_only(&mut self, reader: &mut ByteReader, probe: i64) -> Result<i64> {
        debug_assert!(probe >= 0);
        if probe == 0 {
            return Ok(0);
        }
        if let Some(idx) = self.find_containing(probe) {
            self.mark_active(idx);
            return Ok(self.slots[idx].unwrap().line_start_ofs);
        }

        let line_start = line_start_at(reader, probe)?;
        debug_assert!(probe <= line_start);

        if let Some(idx) = self.find_by_line_start(line_start) {
            self.mark_active(idx);
            let e = self.slots[idx].as_mut().unwrap();
            if e.probe_ofs > probe {
                e.probe_ofs = probe;
            }
        }
        Ok(line_start)
    }
}

impl Default for BisectCache {
    fn default() -> Self {
        Self::new()
    }
}
