use std::fmt;
use std::path::{Path, PathBuf};

use crate::geometry::CanvasRect;

/// Reference to the image a sticker shows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StickerSource(PathBuf);

impl StickerSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for StickerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// A placed image instance in canvas-internal coordinates.
///
/// `x`/`y` is the top-left corner. Stickers are never mutated after
/// placement; the board only replaces whole lists of them.
#[derive(Debug, Clone, PartialEq)]
pub struct Sticker {
    pub source: StickerSource,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Sticker {
    pub fn new(source: StickerSource, bounds: CanvasRect) -> Self {
        Self {
            source,
            x: bounds.x,
            y: bounds.y,
            width: bounds.width,
            height: bounds.height,
        }
    }

    pub const fn bounds(&self) -> CanvasRect {
        CanvasRect::new(self.x, self.y, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sticker_keeps_bounds_from_placement_rect() {
        let rect = CanvasRect::new(-10.0, 4.5, 120.0, 80.0);
        let sticker = Sticker::new(StickerSource::new("/tmp/star.png"), rect);
        assert_eq!(sticker.bounds(), rect);
        assert_eq!(sticker.source.to_string(), "/tmp/star.png");
    }
}
