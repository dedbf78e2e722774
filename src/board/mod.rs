//! Sticker board document: the current sticker list plus its history.

use crate::history::StickerHistory;
use crate::sticker::Sticker;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardChange {
    Applied,
    Unchanged,
}

impl BoardChange {
    pub const fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryAvailability {
    pub undo: bool,
    pub redo: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Board {
    stickers: Vec<Sticker>,
    history: StickerHistory,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stickers(&self) -> &[Sticker] {
        &self.stickers
    }

    pub fn len(&self) -> usize {
        self.stickers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stickers.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history_availability(&self) -> HistoryAvailability {
        HistoryAvailability {
            undo: self.can_undo(),
            redo: self.can_redo(),
        }
    }

    /// Places a sticker on top of the others and records the new list.
    pub fn drop_sticker(&mut self, sticker: Sticker) {
        tracing::debug!(
            source = %sticker.source,
            x = sticker.x,
            y = sticker.y,
            width = sticker.width,
            height = sticker.height,
            "sticker dropped"
        );
        self.stickers.push(sticker);
        self.history.record(self.stickers.clone());
    }

    pub fn undo(&mut self) -> BoardChange {
        match self.history.undo() {
            Some(snapshot) => {
                self.stickers = snapshot.clone();
                BoardChange::Applied
            }
            None => BoardChange::Unchanged,
        }
    }

    pub fn redo(&mut self) -> BoardChange {
        match self.history.redo() {
            Some(snapshot) => {
                self.stickers = snapshot.clone();
                BoardChange::Applied
            }
            None => BoardChange::Unchanged,
        }
    }

    /// Clears every sticker. The cleared state is recorded, so reset can be undone.
    pub fn reset(&mut self) {
        tracing::debug!(discarded = self.stickers.len(), "board reset");
        self.stickers.clear();
        self.history.record(Vec::new());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::CanvasRect;
    use crate::sticker::StickerSource;

    fn sticker(index: usize) -> Sticker {
        Sticker::new(
            StickerSource::new(format!("/stickers/{index}.png")),
            CanvasRect::new(index as f64, 0.0, 32.0, 32.0),
        )
    }

    #[test]
    fn dropping_an_image_adds_one_entry() {
        let mut board = Board::new();
        board.drop_sticker(sticker(0));
        assert_eq!(board.len(), 1);
        assert!(board.can_undo());
        assert!(!board.can_redo());
    }

    #[test]
    fn undo_after_n_drops_restores_n_minus_one_entries() {
        let mut board = Board::new();
        for index in 0..4 {
            board.drop_sticker(sticker(index));
        }

        assert_eq!(board.undo(), BoardChange::Applied);
        assert_eq!(board.len(), 3);
        assert_eq!(board.stickers().last(), Some(&sticker(2)));
    }

    #[test]
    fn undo_on_fresh_board_is_a_noop() {
        let mut board = Board::new();
        assert_eq!(board.undo(), BoardChange::Unchanged);
        assert_eq!(board.redo(), BoardChange::Unchanged);
        assert!(board.is_empty());
        assert_eq!(
            board.history_availability(),
            HistoryAvailability {
                undo: false,
                redo: false
            }
        );
    }

    #[test]
    fn undo_never_goes_below_empty_baseline() {
        let mut board = Board::new();
        board.drop_sticker(sticker(0));
        assert!(board.undo().is_applied());
        assert_eq!(board.undo(), BoardChange::Unchanged);
        assert!(board.is_empty());
    }

    #[test]
    fn redo_restores_undone_drop_and_new_drop_discards_it() {
        let mut board = Board::new();
        board.drop_sticker(sticker(0));
        board.drop_sticker(sticker(1));
        let _ = board.undo();

        assert_eq!(board.redo(), BoardChange::Applied);
        assert_eq!(board.stickers(), &[sticker(0), sticker(1)]);

        let _ = board.undo();
        board.drop_sticker(sticker(7));
        assert!(!board.can_redo());
        assert_eq!(board.redo(), BoardChange::Unchanged);
        assert_eq!(board.stickers(), &[sticker(0), sticker(7)]);
    }

    #[test]
    fn reset_clears_board_and_can_be_undone() {
        let mut board = Board::new();
        board.drop_sticker(sticker(0));
        board.drop_sticker(sticker(1));
        board.reset();
        assert!(board.is_empty());
        assert!(board.can_undo());

        assert!(board.undo().is_applied());
        assert_eq!(board.len(), 2);
    }

    #[test]
    fn later_drops_paint_on_top() {
        let mut board = Board::new();
        board.drop_sticker(sticker(0));
        board.drop_sticker(sticker(1));
        assert_eq!(board.stickers()[1], sticker(1));
    }
}
