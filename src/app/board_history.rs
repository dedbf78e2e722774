use std::cell::RefCell;
use std::rc::Rc;

use crate::board::Board;
use gtk4::prelude::*;
use gtk4::{Button, DrawingArea};

#[derive(Clone, Copy)]
pub(super) enum BoardHistoryAction {
    Undo,
    Redo,
}

impl BoardHistoryAction {
    const fn applied_message(self) -> &'static str {
        match self {
            Self::Undo => "undo applied",
            Self::Redo => "redo applied",
        }
    }

    const fn empty_message(self) -> &'static str {
        match self {
            Self::Undo => "undo stack at baseline",
            Self::Redo => "redo stack empty",
        }
    }
}

#[derive(Clone)]
pub(super) struct BoardHistoryRuntime {
    pub(super) board: Rc<RefCell<Board>>,
    pub(super) undo_button: Button,
    pub(super) redo_button: Button,
    pub(super) board_canvas: DrawingArea,
}

impl BoardHistoryRuntime {
    pub(super) fn connect_button(&self, button: &Button, action: BoardHistoryAction) {
        let runtime = self.clone();
        button.connect_clicked(move |_| {
            let change = {
                let mut board = runtime.board.borrow_mut();
                match action {
                    BoardHistoryAction::Undo => board.undo(),
                    BoardHistoryAction::Redo => board.redo(),
                }
            };
            if change.is_applied() {
                tracing::debug!(
                    stickers = runtime.board.borrow().len(),
                    "{}",
                    action.applied_message()
                );
                runtime.board_canvas.queue_draw();
            } else {
                tracing::debug!("{}", action.empty_message());
            }
            runtime.sync_buttons();
        });
    }

    /// Undo stays disabled at the baseline snapshot; redo while its stack is empty.
    pub(super) fn sync_buttons(&self) {
        sync_history_buttons(&self.board.borrow(), &self.undo_button, &self.redo_button);
    }

    /// Call after any direct board mutation (drop, reset).
    pub(super) fn after_mutation(&self) {
        self.board_canvas.queue_draw();
        self.sync_buttons();
    }
}

pub(super) fn sync_history_buttons(board: &Board, undo_button: &Button, redo_button: &Button) {
    let availability = board.history_availability();
    undo_button.set_sensitive(availability.undo);
    redo_button.set_sensitive(availability.redo);
}
