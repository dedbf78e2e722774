use std::cell::RefCell;
use std::rc::Rc;

use super::board_history::{BoardHistoryAction, BoardHistoryRuntime};
use super::canvas::{configure_board_canvas_draw, BoardCanvasDrawDeps};
use super::gallery_panel::{build_gallery_panel, CurrentDrag, DragTracker};
use super::runtime_support::ToastRuntime;
use crate::board::Board;
use crate::gallery::Gallery;
use crate::geometry::{CanvasPoint, ImageBounds};
use crate::notification;
use crate::placement::{place_sticker, CanvasScale, ThumbnailMetrics};
use crate::render::{self, FileImageCache, FileStickerCache};
use crate::sticker::Sticker;
use crate::storage::ExportService;
use crate::ui::{icon_button, StyleTokens};
use gtk4::prelude::*;
use gtk4::{
    gdk, glib, Align, AspectFrame, Box as GtkBox, Button, DrawingArea, DropTarget, Label,
    Orientation, Overlay,
};

pub(super) struct BoardUiDeps<'a> {
    pub(super) style_tokens: StyleTokens,
    pub(super) gallery: &'a Gallery,
    pub(super) gallery_dir_label: &'a str,
    pub(super) canvas_size: ImageBounds,
    pub(super) export_service: ExportService,
}

#[derive(Clone)]
pub(super) struct BoardUi {
    pub(super) root: Overlay,
    pub(super) board_canvas: DrawingArea,
    pub(super) undo_button: Button,
    pub(super) redo_button: Button,
    pub(super) reset_button: Button,
    pub(super) save_button: Button,
}

pub(super) fn build_board_ui(deps: BoardUiDeps<'_>) -> BoardUi {
    let BoardUiDeps {
        style_tokens,
        gallery,
        gallery_dir_label,
        canvas_size,
        export_service,
    } = deps;

    let board = Rc::new(RefCell::new(Board::new()));
    let image_cache = Rc::new(RefCell::new(FileStickerCache::new(
        FileImageCache::new(),
    )));
    let current_drag: CurrentDrag = Rc::new(RefCell::new(DragTracker::default()));
    let control_size = i32::from(style_tokens.control_size);

    let undo_button = icon_button("edit-undo-symbolic", "Undo (Ctrl+Z)", control_size, &[]);
    let redo_button = icon_button(
        "edit-redo-symbolic",
        "Redo (Ctrl+Shift+Z)",
        control_size,
        &[],
    );
    let reset_button = icon_button(
        "edit-clear-all-symbolic",
        "Clear board (Ctrl+R)",
        control_size,
        &[],
    );
    let save_button = icon_button(
        "document-save-symbolic",
        "Save as PNG (Ctrl+S)",
        control_size,
        &["suggested-action"],
    );

    let toolbar = GtkBox::new(Orientation::Horizontal, style_tokens.spacing_4);
    toolbar.add_css_class("board-toolbar");
    toolbar.append(&undo_button);
    toolbar.append(&redo_button);
    toolbar.append(&reset_button);
    let toolbar_spacer = GtkBox::new(Orientation::Horizontal, 0);
    toolbar_spacer.set_hexpand(true);
    toolbar.append(&toolbar_spacer);
    toolbar.append(&save_button);

    let board_canvas = DrawingArea::new();
    board_canvas.add_css_class("board-canvas");
    board_canvas.set_content_width(i32::try_from(canvas_size.width).unwrap_or(i32::MAX));
    board_canvas.set_content_height(i32::try_from(canvas_size.height).unwrap_or(i32::MAX));
    board_canvas.set_hexpand(true);
    board_canvas.set_vexpand(true);
    board_canvas.set_focusable(true);
    configure_board_canvas_draw(
        &board_canvas,
        BoardCanvasDrawDeps {
            board: board.clone(),
            image_cache: image_cache.clone(),
            canvas_size,
        },
    );

    let canvas_ratio = if canvas_size.height == 0 {
        1.0
    } else {
        canvas_size.width as f32 / canvas_size.height as f32
    };
    let canvas_frame = AspectFrame::new(0.5, 0.5, canvas_ratio, false);
    canvas_frame.set_child(Some(&board_canvas));
    canvas_frame.set_hexpand(true);
    canvas_frame.set_vexpand(true);
    canvas_frame.set_margin_top(style_tokens.spacing_16);
    canvas_frame.set_margin_bottom(style_tokens.spacing_16);
    canvas_frame.set_margin_start(style_tokens.spacing_16);
    canvas_frame.set_margin_end(style_tokens.spacing_16);

    let gallery_panel =
        build_gallery_panel(style_tokens, gallery, gallery_dir_label, &current_drag);

    let workspace = GtkBox::new(Orientation::Horizontal, 0);
    workspace.append(&gallery_panel.root);
    workspace.append(&canvas_frame);
    workspace.set_vexpand(true);

    let board_column = GtkBox::new(Orientation::Vertical, 0);
    board_column.append(&toolbar);
    board_column.append(&workspace);

    let toast_label = Label::new(None);
    toast_label.add_css_class("toast-label");
    toast_label.set_halign(Align::Center);
    toast_label.set_valign(Align::End);
    toast_label.set_visible(false);
    let toast = ToastRuntime::new(&toast_label);

    let root = Overlay::new();
    root.set_child(Some(&board_column));
    root.add_overlay(&toast_label);

    let history = BoardHistoryRuntime {
        board: board.clone(),
        undo_button: undo_button.clone(),
        redo_button: redo_button.clone(),
        board_canvas: board_canvas.clone(),
    };
    history.connect_button(&undo_button, BoardHistoryAction::Undo);
    history.connect_button(&redo_button, BoardHistoryAction::Redo);

    connect_sticker_drop(&board_canvas, canvas_size, &current_drag, &history);

    {
        let history = history.clone();
        reset_button.connect_clicked(move |_| {
            history.board.borrow_mut().reset();
            history.after_mutation();
        });
    }

    {
        let board = board.clone();
        let image_cache = image_cache.clone();
        let toast = toast.clone();
        let toast_duration_ms = style_tokens.toast_duration_ms;
        save_button.connect_clicked(move |_| {
            let composed = {
                let board = board.borrow();
                let mut cache = image_cache.borrow_mut();
                render::compose(canvas_size, board.stickers(), &mut *cache)
            };
            let saved = composed
                .map_err(crate::AppError::from)
                .and_then(|image| export_service.save_png(&image).map_err(Into::into));
            match saved {
                Ok(path) => {
                    let message = format!("Saved {}", path.display());
                    toast.show(message.clone(), toast_duration_ms);
                    notification::send(message);
                }
                Err(err) => {
                    tracing::error!(?err, "export failed");
                    toast.show(format!("Save failed: {err}"), toast_duration_ms);
                }
            }
        });
    }

    history.sync_buttons();

    BoardUi {
        root,
        board_canvas,
        undo_button,
        redo_button,
        reset_button,
        save_button,
    }
}

fn connect_sticker_drop(
    board_canvas: &DrawingArea,
    canvas_size: ImageBounds,
    current_drag: &CurrentDrag,
    history: &BoardHistoryRuntime,
) {
    let drop_target = DropTarget::new(glib::Type::STRING, gdk::DragAction::COPY);
    let current_drag = current_drag.clone();
    let history = history.clone();
    let canvas = board_canvas.clone();
    drop_target.connect_drop(move |_, value, x, y| {
        let Ok(dropped_id) = value.get::<String>() else {
            tracing::debug!("ignoring drop without a sticker id");
            return false;
        };
        let Some(session) = current_drag.borrow_mut().take_matching(&dropped_id) else {
            return false;
        };

        let scale = CanvasScale::between(
            canvas_size,
            f64::from(canvas.width()),
            f64::from(canvas.height()),
        );
        let bounds = place_sticker(
            scale,
            CanvasPoint::new(x, y),
            ThumbnailMetrics {
                displayed_width: session.displayed_width,
                natural: session.item.natural,
            },
        );
        history
            .board
            .borrow_mut()
            .drop_sticker(Sticker::new(session.item.source(), bounds));
        tracing::debug!(
            sticker = session.item.id.as_str(),
            x = bounds.x,
            y = bounds.y,
            width = bounds.width,
            height = bounds.height,
            "sticker placed"
        );
        history.after_mutation();
        true
    });
    board_canvas.add_controller(drop_target);
}
