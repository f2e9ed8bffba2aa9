// Sidelog - core/buffer.rs
//
// Capped ring buffer of log entries.
//
// The logical log lives here, separate from the display widget: the widget
// only ever renders a read-only projection of this buffer. Capping keeps a
// long-running host session bounded; when full, the oldest entry is evicted
// and the dropped counter increments so the UI can say so.

use crate::core::model::LogEntry;
use std::collections::VecDeque;

/// Append-only entry store with a fixed retention cap.
#[derive(Debug)]
pub struct LogBuffer {
    entries: VecDeque<LogEntry>,
    /// Sequence number assigned to the next appended entry.
    next_seq: u64,
    /// Retention cap; always >= 1.
    cap: usize,
    /// Entries evicted since this buffer was created.
    dropped: u64,
}

impl LogBuffer {
    /// Create an empty buffer with the given retention cap.
    /// A cap of 0 is clamped to 1 so the buffer can always hold the newest
    /// entry.
    pub fn new(cap: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            next_seq: 0,
            cap: cap.max(1),
            dropped: 0,
        }
    }

    /// Append an entry, evicting the oldest if the buffer is at capacity.
    /// Returns the sequence number assigned to the new entry.
    pub fn push(&mut self, time: String, level: String, message: String) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;

        if self.entries.len() == self.cap {
            self.entries.pop_front();
            self.dropped += 1;
        }
        self.entries
            .push_back(LogEntry::new(seq, time, level, message));
        seq
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no entries are retained.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries evicted since creation.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Total entries ever appended (retained + dropped).
    pub fn total_appended(&self) -> u64 {
        self.next_seq
    }

    /// Iterate retained entries, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// Clone the retained entries, oldest first, for the display projection
    /// or for export. The widget never holds a reference into the buffer.
    pub fn snapshot(&self) -> Vec<LogEntry> {
        self.entries.iter().cloned().collect()
    }
}
