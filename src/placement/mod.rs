//! Maps a drop on the displayed canvas widget to a sticker rectangle in
//! canvas-internal coordinates.

use crate::geometry::{CanvasPoint, CanvasRect, ImageBounds};

/// Ratio between the internal canvas resolution and its displayed size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasScale {
    pub x: f64,
    pub y: f64,
}

impl CanvasScale {
    pub fn between(internal: ImageBounds, displayed_width: f64, displayed_height: f64) -> Self {
        Self {
            x: axis_scale(f64::from(internal.width), displayed_width),
            y: axis_scale(f64::from(internal.height), displayed_height),
        }
    }

    pub fn to_internal(self, widget_point: CanvasPoint) -> CanvasPoint {
        CanvasPoint::new(widget_point.x * self.x, widget_point.y * self.y)
    }
}

fn axis_scale(internal: f64, displayed: f64) -> f64 {
    if displayed <= 0.0 || !displayed.is_finite() {
        return 1.0;
    }
    internal / displayed
}

/// The dragged thumbnail as it appeared in the gallery.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThumbnailMetrics {
    pub displayed_width: f64,
    pub natural: ImageBounds,
}

impl ThumbnailMetrics {
    pub fn aspect_ratio(&self) -> f64 {
        if self.natural.width == 0 {
            return 1.0;
        }
        f64::from(self.natural.height) / f64::from(self.natural.width)
    }
}

/// Width of an image drawn "contain"-fitted inside a thumbnail slot.
pub fn fitted_thumbnail_width(slot_width: f64, slot_height: f64, natural: ImageBounds) -> f64 {
    if natural.width == 0 || natural.height == 0 || slot_height <= 0.0 {
        return slot_width.max(0.0);
    }
    let aspect = f64::from(natural.width) / f64::from(natural.height);
    slot_width.min(slot_height * aspect).max(0.0)
}

/// Sticker rectangle centered on the drop point, sized from the thumbnail's
/// displayed width and natural aspect ratio.
pub fn place_sticker(
    scale: CanvasScale,
    widget_drop: CanvasPoint,
    thumbnail: ThumbnailMetrics,
) -> CanvasRect {
    let center = scale.to_internal(widget_drop);
    let width = thumbnail.displayed_width * scale.x;
    let height = thumbnail.displayed_width * thumbnail.aspect_ratio() * scale.y;
    CanvasRect::centered_on(center, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thumbnail(displayed_width: f64, natural_width: u32, natural_height: u32) -> ThumbnailMetrics {
        ThumbnailMetrics {
            displayed_width,
            natural: ImageBounds::new(natural_width, natural_height),
        }
    }

    #[test]
    fn scale_is_identity_when_displayed_at_internal_size() {
        let scale = CanvasScale::between(ImageBounds::new(800, 600), 800.0, 600.0);
        assert_eq!(scale, CanvasScale { x: 1.0, y: 1.0 });
    }

    #[test]
    fn zero_displayed_size_falls_back_to_unit_scale() {
        let scale = CanvasScale::between(ImageBounds::new(800, 600), 0.0, 300.0);
        assert_eq!(scale, CanvasScale { x: 1.0, y: 2.0 });
    }

    #[test]
    fn sticker_is_centered_on_drop_point() {
        let scale = CanvasScale::between(ImageBounds::new(800, 600), 800.0, 600.0);
        let rect = place_sticker(scale, CanvasPoint::new(400.0, 300.0), thumbnail(100.0, 200, 100));
        assert_eq!(rect, CanvasRect::new(350.0, 275.0, 100.0, 50.0));
    }

    #[test]
    fn non_uniform_scaling_applies_per_axis() {
        // Canvas displayed at half width and quarter height.
        let scale = CanvasScale::between(ImageBounds::new(800, 600), 400.0, 150.0);
        let rect = place_sticker(scale, CanvasPoint::new(100.0, 50.0), thumbnail(50.0, 100, 100));

        assert_eq!(rect.width, 100.0);
        assert_eq!(rect.height, 200.0);
        assert_eq!(rect.center(), CanvasPoint::new(200.0, 200.0));
    }

    #[test]
    fn zero_natural_width_uses_square_ratio() {
        let rect = place_sticker(
            CanvasScale { x: 1.0, y: 1.0 },
            CanvasPoint::new(0.0, 0.0),
            thumbnail(60.0, 0, 0),
        );
        assert_eq!(rect, CanvasRect::new(-30.0, -30.0, 60.0, 60.0));
    }

    #[test]
    fn fitted_width_shrinks_for_tall_images_only() {
        assert_eq!(fitted_thumbnail_width(96.0, 96.0, ImageBounds::new(200, 100)), 96.0);
        assert_eq!(fitted_thumbnail_width(96.0, 96.0, ImageBounds::new(50, 100)), 48.0);
        assert_eq!(fitted_thumbnail_width(96.0, 0.0, ImageBounds::new(50, 100)), 96.0);
    }

    #[test]
    fn drops_near_edges_are_not_clamped() {
        let rect = place_sticker(
            CanvasScale { x: 1.0, y: 1.0 },
            CanvasPoint::new(5.0, 795.0),
            thumbnail(40.0, 10, 10),
        );
        assert_eq!(rect.x, -15.0);
        assert_eq!(rect.y + rect.height, 815.0);
    }
}
