//! Fixed-size transposition table of fail-soft score intervals.
//!
//! Entries are keyed by the pair of position signature and search depth, so
//! the same position searched to different depths occupies different
//! entries. The table uses direct indexing with depth-preferred replacement
//! on slot collisions and is cleared wholesale at the start of each root
//! search.

use crate::search::evaluation::MATE_UPPER;

/// Inclusive score interval proved for one (signature, depth) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreBounds {
    pub lower: i32,
    pub upper: i32,
}

impl ScoreBounds {
    /// Interval carrying no information; what a probe miss returns.
    pub const OPEN: ScoreBounds = ScoreBounds {
        lower: -MATE_UPPER,
        upper: MATE_UPPER,
    };
}

#[derive(Debug, Clone, Copy)]
struct TTEntry {
    signature: u64,
    depth: u8,
    bounds: ScoreBounds,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TTStats {
    pub probes: u64,
    pub hits: u64,
    pub stores: u64,
    pub rejected: u64,
}

#[derive(Debug, Clone)]
pub struct TranspositionTable {
    entries: Vec<Option<TTEntry>>,
    stats: TTStats,
}

/// Default table budget in megabytes.
pub const DEFAULT_TABLE_MB: usize = 16;

impl TranspositionTable {
    pub fn new_with_mb(size_mb: usize) -> Self {
        let bytes = size_mb.max(1) * 1024 * 1024;
        let entry_size = std::mem::size_of::<Option<TTEntry>>().max(1);
        let count = (bytes / entry_size).max(1);
        Self {
            entries: vec![None; count],
            stats: TTStats::default(),
        }
    }

    /// Drop every entry and reset counters, keeping the capacity.
    #[inline]
    pub fn clear(&mut self) {
        self.entries.fill(None);
        self.stats = TTStats::default();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn stats(&self) -> TTStats {
        self.stats
    }

    #[inline]
    fn idx(&self, signature: u64, depth: u8) -> usize {
        let key = signature ^ (depth as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
        (key % self.entries.len() as u64) as usize
    }

    /// Bounds proved for `(signature, depth)`; the open interval on a miss,
    /// so callers never branch on entry presence.
    pub fn probe(&mut self, signature: u64, depth: u8) -> ScoreBounds {
        self.stats.probes += 1;
        let idx = self.idx(signature, depth);
        match self.entries[idx] {
            Some(entry) if entry.signature == signature && entry.depth == depth => {
                self.stats.hits += 1;
                entry.bounds
            }
            _ => ScoreBounds::OPEN,
        }
    }

    /// Store `bounds` for `(signature, depth)`.
    ///
    /// A colliding entry of strictly greater depth keeps the slot; storing
    /// over the same key overwrites, which is how re-searches narrow an
    /// interval.
    pub fn store(&mut self, signature: u64, depth: u8, bounds: ScoreBounds) {
        let idx = self.idx(signature, depth);
        if let Some(existing) = self.entries[idx] {
            let same_key = existing.signature == signature && existing.depth == depth;
            if !same_key && existing.depth > depth {
                self.stats.rejected += 1;
                return;
            }
        }
        self.stats.stores += 1;
        self.entries[idx] = Some(TTEntry {
            signature,
            depth,
            bounds,
        });
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new_with_mb(DEFAULT_TABLE_MB)
    }
}
