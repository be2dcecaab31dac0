//! Linear undo/redo timeline.
//!
//! DESIGN
//! ======
//! `HistoryStack` is a plain state machine over `(entries, cursor)`:
//!
//! - empty: no entries, no cursor
//! - otherwise `cursor` indexes the entry that matches the live scene
//!
//! `push` after one or more undos discards everything past the cursor before
//! appending (branch truncation). There is one timeline, never a tree. The
//! stack is unbounded and is only shrunk by that truncation or by `reset`.
//!
//! Navigation comes in two halves so that callers with an asynchronous apply
//! step can keep the cursor still until the apply succeeds: `peek_undo` /
//! `peek_redo` return the target entry without moving, `undo` / `redo`
//! commit the move.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use crate::snapshot::Snapshot;

/// Ordered entries plus a cursor into them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryStack<T = Snapshot> {
    entries: Vec<T>,
    cursor: Option<usize>,
}

impl<T> Default for HistoryStack<T> {
    fn default() -> Self {
        Self { entries: Vec::new(), cursor: None }
    }
}

impl<T> HistoryStack<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every entry with `entry` and point the cursor at it.
    pub fn reset(&mut self, entry: T) {
        self.entries.clear();
        self.entries.push(entry);
        self.cursor = Some(0);
    }

    /// Append `entry`, first truncating any redo-able entries.
    pub fn push(&mut self, entry: T) {
        if let Some(cursor) = self.cursor {
            self.entries.truncate(cursor + 1);
        }
        self.entries.push(entry);
        self.cursor = Some(self.entries.len() - 1);
    }

    /// Step back. Returns the new current entry, or `None` at the oldest entry.
    pub fn undo(&mut self) -> Option<&T> {
        let target = self.cursor.filter(|&c| c > 0)? - 1;
        self.cursor = Some(target);
        self.entries.get(target)
    }

    /// Step forward. Returns the new current entry, or `None` at the tip.
    pub fn redo(&mut self) -> Option<&T> {
        let target = self.cursor.filter(|&c| c + 1 < self.entries.len())? + 1;
        self.cursor = Some(target);
        self.entries.get(target)
    }

    /// Move the cursor to `index`. Returns `None` and stays put if out of range.
    pub fn seek(&mut self, index: usize) -> Option<&T> {
        let entry = self.entries.get(index)?;
        self.cursor = Some(index);
        Some(entry)
    }

    /// The entry `undo` would move to, without moving.
    #[must_use]
    pub fn peek_undo(&self) -> Option<&T> {
        let cursor = self.cursor.filter(|&c| c > 0)?;
        self.entries.get(cursor - 1)
    }

    /// The entry `redo` would move to, without moving.
    #[must_use]
    pub fn peek_redo(&self) -> Option<&T> {
        let cursor = self.cursor?;
        self.entries.get(cursor + 1)
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor.is_some_and(|c| c > 0)
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor.is_some_and(|c| c + 1 < self.entries.len())
    }

    /// Entry matching the live scene.
    #[must_use]
    pub fn current(&self) -> Option<&T> {
        self.entries.get(self.cursor?)
    }

    #[must_use]
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    #[must_use]
    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
