//! Bounded, linear undo/redo history of raster snapshots.

use std::collections::VecDeque;

use crate::raster::RasterSnapshot;

/// Maximum number of retained snapshots. Oldest entries are evicted FIFO.
pub const HISTORY_CAP: usize = 20;

/// Linear history: an ordered entry list plus a cursor at the current state.
///
/// No branching redo — pushing after an undo discards everything beyond the
/// cursor. The cursor is valid (`0 ≤ cursor < len`) whenever any entry
/// exists.
#[derive(Debug)]
pub struct SnapshotHistory {
    entries: VecDeque<RasterSnapshot>,
    cursor: usize,
}

impl SnapshotHistory {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(HISTORY_CAP),
            cursor: 0,
        }
    }

    /// Append a snapshot after the cursor, discarding any redo tail, and
    /// evict the oldest entry once the cap is exceeded (shifting the cursor
    /// so the most recent `HISTORY_CAP` remain).
    pub fn push(&mut self, snapshot: RasterSnapshot) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.cursor + 1);
        }
        self.entries.push_back(snapshot);
        self.cursor = self.entries.len() - 1;

        if self.entries.len() > HISTORY_CAP {
            self.entries.pop_front();
            self.cursor -= 1;
        }
    }

    /// Step back one entry and return the snapshot to restore.
    /// No-op (`None`) when already at the oldest retained entry.
    pub fn undo(&mut self) -> Option<&RasterSnapshot> {
        if self.entries.is_empty() || self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(&self.entries[self.cursor])
    }

    /// Step forward one entry and return the snapshot to restore.
    /// No-op (`None`) when already at the newest entry.
    pub fn redo(&mut self) -> Option<&RasterSnapshot> {
        if self.entries.is_empty() || self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(&self.entries[self.cursor])
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        !self.entries.is_empty() && self.cursor + 1 < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SnapshotHistory {
    fn default() -> Self {
        Self::new()
    }
}
