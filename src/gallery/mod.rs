//! Thumbnail gallery loaded from a sticker directory, grouped into categories.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::geometry::ImageBounds;
use crate::sticker::StickerSource;

const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif", "bmp"];

#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("gallery directory not found: {path}")]
    MissingDirectory { path: PathBuf },
    #[error("failed to read gallery directory: {path}")]
    ReadDirectory { path: PathBuf, source: io::Error },
}

pub type GalleryResult<T> = std::result::Result<T, GalleryError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryItem {
    pub id: String,
    pub path: PathBuf,
    pub category: Option<String>,
    pub natural: ImageBounds,
}

impl GalleryItem {
    pub fn source(&self) -> StickerSource {
        StickerSource::new(self.path.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(String),
}

impl CategoryFilter {
    pub fn label(&self) -> &str {
        match self {
            Self::All => "All",
            Self::Category(name) => name.as_str(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Gallery {
    items: Vec<GalleryItem>,
}

impl Gallery {
    pub fn from_items(mut items: Vec<GalleryItem>) -> Self {
        items.sort_by(|left, right| {
            left.category
                .cmp(&right.category)
                .then_with(|| left.path.file_name().cmp(&right.path.file_name()))
        });
        Self { items }
    }

    /// Scans `root` for images. Files in first-level subdirectories take the
    /// subdirectory name as their category.
    pub fn load_from_dir(root: &Path) -> GalleryResult<Self> {
        if !root.is_dir() {
            return Err(GalleryError::MissingDirectory {
                path: root.to_path_buf(),
            });
        }

        let mut items = Vec::new();
        for entry in read_dir_sorted(root)? {
            if entry.is_dir() {
                let category = entry
                    .file_name()
                    .and_then(|name| name.to_str())
                    .map(str::to_string);
                push_category_items(&mut items, &entry, category);
            } else if entry.is_file() {
                push_gallery_item(&mut items, entry, None);
            }
        }

        tracing::info!(root = %root.display(), items = items.len(), "loaded sticker gallery");
        Ok(Self::from_items(items))
    }

    pub fn items(&self) -> &[GalleryItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn categories(&self) -> Vec<String> {
        let mut categories = Vec::new();
        for category in self.items.iter().filter_map(|item| item.category.as_ref()) {
            if !categories.contains(category) {
                categories.push(category.clone());
            }
        }
        categories
    }

    pub fn filters(&self) -> Vec<CategoryFilter> {
        std::iter::once(CategoryFilter::All)
            .chain(self.categories().into_iter().map(CategoryFilter::Category))
            .collect()
    }

    pub fn is_visible(item: &GalleryItem, filter: &CategoryFilter) -> bool {
        match filter {
            CategoryFilter::All => true,
            CategoryFilter::Category(name) => item.category.as_deref() == Some(name.as_str()),
        }
    }
}

#[cfg(test)]
impl Gallery {
    fn get(&self, id: &str) -> Option<&GalleryItem> {
        self.items.iter().find(|item| item.id == id)
    }
}

fn read_dir_sorted(dir: &Path) -> GalleryResult<Vec<PathBuf>> {
    let read_error = |source| GalleryError::ReadDirectory {
        path: dir.to_path_buf(),
        source,
    };
    let mut paths = fs::read_dir(dir)
        .map_err(read_error)?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(read_error)?;
    paths.sort();
    Ok(paths)
}

/// An unreadable category directory is skipped; the rest of the gallery still loads.
fn push_category_items(items: &mut Vec<GalleryItem>, dir: &Path, category: Option<String>) {
    let entries = match read_dir_sorted(dir) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::warn!(%err, "skipping unreadable sticker category");
            return;
        }
    };
    for nested in entries {
        if nested.is_file() {
            push_gallery_item(items, nested, category.clone());
        }
    }
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
}

fn push_gallery_item(items: &mut Vec<GalleryItem>, path: PathBuf, category: Option<String>) {
    if !has_supported_extension(&path) {
        return;
    }

    let (width, height) = match image::image_dimensions(&path) {
        Ok(dimensions) => dimensions,
        Err(err) => {
            tracing::warn!(path = %path.display(), ?err, "skipping unreadable gallery image");
            return;
        }
    };

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    let id = match category.as_deref() {
        Some(category) => format!("{category}/{file_name}"),
        None => file_name.to_string(),
    };

    items.push(GalleryItem {
        id,
        path,
        category,
        natural: ImageBounds::new(width, height),
    });
}
