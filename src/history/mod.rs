//! Snapshot-based undo/redo stacks for the sticker list.

use crate::sticker::Sticker;

pub type Snapshot = Vec<Sticker>;

/// Two-stack history of full sticker-list snapshots.
///
/// The undo stack always holds at least the baseline snapshot, so undo can
/// never move the board below the state it started from.
#[derive(Debug, Clone)]
pub struct StickerHistory {
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
}

impl Default for StickerHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl StickerHistory {
    /// Starts from the empty board as the baseline snapshot.
    pub fn new() -> Self {
        Self {
            undo_stack: vec![Vec::new()],
            redo_stack: Vec::new(),
        }
    }

    /// Pushes the post-mutation state and drops any redo history.
    pub fn record(&mut self, snapshot: Snapshot) {
        self.undo_stack.push(snapshot);
        self.redo_stack.clear();
    }

    /// Moves the latest snapshot to the redo stack and returns the state to restore.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if !self.can_undo() {
            return None;
        }
        let undone = self.undo_stack.pop()?;
        self.redo_stack.push(undone);
        self.undo_stack.last()
    }

    pub fn redo(&mut self) -> Option<&Snapshot> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push(next);
        self.undo_stack.last()
    }

    pub fn can_undo(&self) -> bool {
        self.undo_stack.len() > 1
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
}

#[cfg(test)]
impl StickerHistory {
    fn current(&self) -> Option<&Snapshot> {
        self.undo_stack.last()
    }

    fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }
}
