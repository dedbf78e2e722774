//! Raster composition of the sticker list.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use image::{imageops, ImageError, RgbaImage};
use thiserror::Error;

use crate::geometry::ImageBounds;
use crate::sticker::{Sticker, StickerSource};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("canvas has no area: {width}x{height}")]
    EmptyCanvas { width: u32, height: u32 },
    #[error("failed to decode sticker image {source_name}")]
    Decode {
        source_name: String,
        #[source]
        source: ImageError,
    },
    #[error("sticker image not available: {0}")]
    MissingImage(String),
}

pub type RenderResult<T> = std::result::Result<T, RenderError>;

/// Supplies decoded sticker images by source.
pub trait StickerImageSource {
    fn load(&mut self, source: &StickerSource) -> RenderResult<&RgbaImage>;
}

/// Decodes sticker images from disk once and keeps them for later redraws.
#[derive(Debug, Default)]
pub struct FileImageCache {
    images: HashMap<StickerSource, RgbaImage>,
}

impl FileImageCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StickerImageSource for FileImageCache {
    fn load(&mut self, source: &StickerSource) -> RenderResult<&RgbaImage> {
        match self.images.entry(source.clone()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                if !source.path().is_file() {
                    return Err(RenderError::MissingImage(source.to_string()));
                }
                let decoded = image::open(source.path())
                    .map_err(|err| RenderError::Decode {
                        source_name: source.to_string(),
                        source: err,
                    })?
                    .to_rgba8();
                tracing::debug!(
                    source = %source,
                    width = decoded.width(),
                    height = decoded.height(),
                    "decoded sticker image"
                );
                Ok(entry.insert(decoded))
            }
        }
    }
}

type ScaledKey = (StickerSource, u32, u32);

/// Sticker rasters already resized to their placed size.
///
/// Placed sizes are in canvas coordinates, so redraws at any widget size hit
/// the cache. Entries not used by the latest composition are dropped.
#[derive(Debug, Default)]
pub struct ScaledStickerCache<S> {
    images: S,
    scaled: HashMap<ScaledKey, RgbaImage>,
}

pub type FileStickerCache = ScaledStickerCache<FileImageCache>;

impl<S: StickerImageSource> ScaledStickerCache<S> {
    pub fn new(images: S) -> Self {
        Self {
            images,
            scaled: HashMap::new(),
        }
    }

    fn get_or_scale(&mut self, key: ScaledKey) -> RenderResult<&RgbaImage> {
        match self.scaled.entry(key) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let (source, width, height) = entry.key();
                let original = self.images.load(source)?;
                let scaled = if original.dimensions() == (*width, *height) {
                    original.clone()
                } else {
                    imageops::resize(original, *width, *height, imageops::FilterType::Triangle)
                };
                Ok(entry.insert(scaled))
            }
        }
    }
}

/// Paints `stickers` in order onto a transparent canvas of `canvas` size.
///
/// A sticker whose image cannot be loaded is skipped; the rest still render.
pub fn compose<S: StickerImageSource>(
    canvas: ImageBounds,
    stickers: &[Sticker],
    cache: &mut ScaledStickerCache<S>,
) -> RenderResult<RgbaImage> {
    if canvas.width == 0 || canvas.height == 0 {
        return Err(RenderError::EmptyCanvas {
            width: canvas.width,
            height: canvas.height,
        });
    }

    let mut composed = RgbaImage::new(canvas.width, canvas.height);
    let mut used = HashSet::new();
    for sticker in stickers {
        let Some((width, height)) = target_size(sticker) else {
            tracing::debug!(source = %sticker.source, "skipping sticker without area");
            continue;
        };
        let key = (sticker.source.clone(), width, height);
        used.insert(key.clone());
        let image = match cache.get_or_scale(key) {
            Ok(image) => image,
            Err(err) => {
                tracing::warn!(source = %sticker.source, ?err, "skipping sticker that failed to load");
                continue;
            }
        };
        imageops::overlay(
            &mut composed,
            image,
            sticker.x.round() as i64,
            sticker.y.round() as i64,
        );
    }
    cache.scaled.retain(|key, _| used.contains(key));

    Ok(composed)
}

fn target_size(sticker: &Sticker) -> Option<(u32, u32)> {
    let axis = |value: f64| {
        if value.is_finite() && value > 0.0 {
            Some(value.round().max(1.0) as u32)
        } else {
            None
        }
    };
    Some((axis(sticker.width)?, axis(sticker.height)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::CanvasRect;
    use image::Rgba;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);
    const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

    #[derive(Default)]
    struct MemoryImages {
        images: HashMap<StickerSource, RgbaImage>,
        loads: usize,
    }

    impl MemoryImages {
        fn with(mut self, name: &str, image: RgbaImage) -> Self {
            self.images.insert(StickerSource::new(name), image);
            self
        }

        fn cached(self) -> ScaledStickerCache<Self> {
            ScaledStickerCache::new(self)
        }
    }

    impl StickerImageSource for MemoryImages {
        fn load(&mut self, source: &StickerSource) -> RenderResult<&RgbaImage> {
            self.loads += 1;
            self.images
                .get(source)
                .ok_or_else(|| RenderError::MissingImage(source.to_string()))
        }
    }

    fn sticker(name: &str, x: f64, y: f64, width: f64, height: f64) -> Sticker {
        Sticker::new(StickerSource::new(name), CanvasRect::new(x, y, width, height))
    }

    #[test]
    fn empty_board_composes_transparent_canvas() {
        let mut images = MemoryImages::default().cached();
        let composed = compose(ImageBounds::new(32, 24), &[], &mut images).unwrap();
        assert_eq!(composed.dimensions(), (32, 24));
        assert!(composed.pixels().all(|pixel| *pixel == CLEAR));
    }

    #[test]
    fn sticker_is_painted_at_its_position() {
        let mut images = MemoryImages::default()
            .with("red", RgbaImage::from_pixel(10, 10, RED))
            .cached();
        let composed = compose(
            ImageBounds::new(40, 40),
            &[sticker("red", 5.0, 5.0, 10.0, 10.0)],
            &mut images,
        )
        .unwrap();

        assert_eq!(*composed.get_pixel(5, 5), RED);
        assert_eq!(*composed.get_pixel(14, 14), RED);
        assert_eq!(*composed.get_pixel(4, 4), CLEAR);
        assert_eq!(*composed.get_pixel(15, 15), CLEAR);
    }

    #[test]
    fn later_stickers_paint_over_earlier_ones() {
        let mut images = MemoryImages::default()
            .with("red", RgbaImage::from_pixel(10, 10, RED))
            .with("blue", RgbaImage::from_pixel(10, 10, BLUE))
            .cached();
        let composed = compose(
            ImageBounds::new(40, 40),
            &[
                sticker("red", 0.0, 0.0, 10.0, 10.0),
                sticker("blue", 5.0, 5.0, 10.0, 10.0),
            ],
            &mut images,
        )
        .unwrap();

        assert_eq!(*composed.get_pixel(2, 2), RED);
        assert_eq!(*composed.get_pixel(7, 7), BLUE);
    }

    #[test]
    fn sticker_is_scaled_to_its_size() {
        let mut images = MemoryImages::default()
            .with("red", RgbaImage::from_pixel(2, 2, RED))
            .cached();
        let composed = compose(
            ImageBounds::new(40, 40),
            &[sticker("red", 0.0, 0.0, 8.0, 4.0)],
            &mut images,
        )
        .unwrap();

        assert_eq!(composed.get_pixel(7, 3)[3], 255);
        assert_eq!(composed.get_pixel(8, 3)[3], 0);
        assert_eq!(composed.get_pixel(7, 4)[3], 0);
    }

    #[test]
    fn off_canvas_stickers_are_clipped() {
        let mut images = MemoryImages::default()
            .with("red", RgbaImage::from_pixel(10, 10, RED))
            .cached();
        let composed = compose(
            ImageBounds::new(20, 20),
            &[
                sticker("red", -5.0, -5.0, 10.0, 10.0),
                sticker("red", 15.0, 15.0, 10.0, 10.0),
            ],
            &mut images,
        )
        .unwrap();

        assert_eq!(*composed.get_pixel(0, 0), RED);
        assert_eq!(*composed.get_pixel(5, 5), CLEAR);
        assert_eq!(*composed.get_pixel(19, 19), RED);
    }

    #[test]
    fn missing_and_degenerate_stickers_are_skipped() {
        let mut images = MemoryImages::default()
            .with("red", RgbaImage::from_pixel(4, 4, RED))
            .cached();
        let composed = compose(
            ImageBounds::new(10, 10),
            &[
                sticker("missing", 0.0, 0.0, 10.0, 10.0),
                sticker("red", 0.0, 0.0, 0.0, 4.0),
                sticker("red", 6.0, 6.0, 4.0, 4.0),
            ],
            &mut images,
        )
        .unwrap();

        assert_eq!(*composed.get_pixel(0, 0), CLEAR);
        assert_eq!(*composed.get_pixel(7, 7), RED);
    }

    #[test]
    fn zero_sized_canvas_is_rejected() {
        let mut images = MemoryImages::default().cached();
        let err = compose(ImageBounds::new(0, 10), &[], &mut images).unwrap_err();
        assert!(matches!(err, RenderError::EmptyCanvas { width: 0, height: 10 }));
    }

    #[test]
    fn file_cache_decodes_once() {
        let path = std::env::temp_dir().join(format!(
            "stickerboard-render-cache-{}.png",
            std::process::id()
        ));
        RgbaImage::from_pixel(3, 2, BLUE).save(&path).unwrap();
        let source = StickerSource::new(path.clone());

        let mut cache = FileImageCache::new();
        assert_eq!(cache.load(&source).unwrap().dimensions(), (3, 2));
        assert_eq!(cache.load(&source).unwrap().dimensions(), (3, 2));
        assert_eq!(cache.images.len(), 1);

        let _ = std::fs::remove_file(path);
        let missing = StickerSource::new("/nonexistent/stickerboard.png");
        assert!(matches!(
            cache.load(&missing),
            Err(RenderError::MissingImage(name)) if name == "/nonexistent/stickerboard.png"
        ));
    }

    #[test]
    fn scaled_rasters_are_reused_until_the_sticker_leaves_the_board() {
        let mut cache = MemoryImages::default()
            .with("red", RgbaImage::from_pixel(2, 2, RED))
            .cached();
        let placed = [sticker("red", 0.0, 0.0, 8.0, 4.0)];

        let first = compose(ImageBounds::new(20, 20), &placed, &mut cache).unwrap();
        let second = compose(ImageBounds::new(20, 20), &placed, &mut cache).unwrap();
        assert_eq!(first, second);
        assert_eq!(cache.images.loads, 1);
        assert_eq!(cache.scaled.len(), 1);

        compose(ImageBounds::new(20, 20), &[], &mut cache).unwrap();
        assert!(cache.scaled.is_empty());
    }
}
