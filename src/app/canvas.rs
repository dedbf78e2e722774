use std::cell::RefCell;
use std::rc::Rc;

use gtk4::prelude::*;
use gtk4::DrawingArea;
use image::RgbaImage;

use crate::board::Board;
use crate::geometry::ImageBounds;
use crate::render::{self, FileStickerCache};

pub(super) struct BoardCanvasDrawDeps {
    pub(super) board: Rc<RefCell<Board>>,
    pub(super) image_cache: Rc<RefCell<FileStickerCache>>,
    pub(super) canvas_size: ImageBounds,
}

/// Composes the board at its internal resolution and paints it stretched
/// over the widget, the way a CSS-sized canvas element displays.
pub(super) fn configure_board_canvas_draw(canvas: &DrawingArea, deps: BoardCanvasDrawDeps) {
    let BoardCanvasDrawDeps {
        board,
        image_cache,
        canvas_size,
    } = deps;
    canvas.set_draw_func(move |_, context, width, height| {
        if width <= 0 || height <= 0 {
            return;
        }
        let composed = {
            let board = board.borrow();
            let mut cache = image_cache.borrow_mut();
            match render::compose(canvas_size, board.stickers(), &mut *cache) {
                Ok(composed) => composed,
                Err(err) => {
                    tracing::warn!(?err, "board compose failed during draw");
                    return;
                }
            }
        };
        let Some(surface) = rgba_image_to_cairo_surface(&composed) else {
            tracing::warn!("failed to convert composed board to cairo surface");
            return;
        };

        let scale_x = f64::from(width) / f64::from(canvas_size.width.max(1));
        let scale_y = f64::from(height) / f64::from(canvas_size.height.max(1));
        context.save().ok();
        context.scale(scale_x, scale_y);
        if let Err(err) = context.set_source_surface(&surface, 0.0, 0.0) {
            tracing::warn!(?err, "set board source surface failed");
        } else {
            let _ = context.paint();
        }
        context.restore().ok();
    });
}

pub(super) fn rgba_image_to_cairo_surface(
    image: &RgbaImage,
) -> Option<gtk4::cairo::ImageSurface> {
    let width = i32::try_from(image.width()).ok()?;
    let height = i32::try_from(image.height()).ok()?;
    let mut surface =
        gtk4::cairo::ImageSurface::create(gtk4::cairo::Format::ARgb32, width, height).ok()?;
    let stride = usize::try_from(surface.stride()).ok()?;

    {
        let mut data = surface.data().ok()?;
        let src_row_len = usize::try_from(image.width()).ok()?.checked_mul(4)?;
        if src_row_len == 0 {
            return None;
        }
        let src = image.as_raw();

        for (row, src_row) in src.chunks_exact(src_row_len).enumerate() {
            let dst_row_offset = row.checked_mul(stride)?;
            let dst_row_end = dst_row_offset.checked_add(src_row_len)?;
            if dst_row_end > data.len() {
                return None;
            }
            let dst_row = &mut data[dst_row_offset..dst_row_end];

            for (src_pixel, dst_pixel) in src_row.chunks_exact(4).zip(dst_row.chunks_exact_mut(4)) {
                dst_pixel.copy_from_slice(&premultiplied_bgra(
                    src_pixel[0],
                    src_pixel[1],
                    src_pixel[2],
                    src_pixel[3],
                ));
            }
        }
    }

    surface.flush();
    Some(surface)
}

// Cairo ARGB32 is premultiplied and stored little-endian as B, G, R, A.
fn premultiplied_bgra(r: u8, g: u8, b: u8, a: u8) -> [u8; 4] {
    match a {
        0 => [0, 0, 0, 0],
        255 => [b, g, r, 255],
        _ => {
            let alpha = u16::from(a);
            let premul = |channel: u8| ((u16::from(channel) * alpha + 127) / 255) as u8;
            [premul(b), premul(g), premul(r), a]
        }
    }
}
