use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use image::{ImageError, ImageFormat, RgbaImage};
use thiserror::Error;

pub const DEFAULT_EXPORT_FILE_NAME: &str = "composition.png";
const PICTURES_SUBDIR: &str = "Pictures";
const MAX_NAME_ATTEMPTS: u32 = 10_000;
const PNG_EXTENSION: &str = "png";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("missing HOME environment variable")]
    MissingHomeDirectory,
    #[error("export file name is empty")]
    MissingFileName,
    #[error("no free export file name left in {0}")]
    NoFreeFileName(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("png encode error: {0}")]
    Encode(#[from] ImageError),
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Writes finished compositions as PNG files without clobbering earlier exports.
#[derive(Debug, Clone)]
pub struct ExportService {
    output_dir: PathBuf,
    file_name: String,
}

impl ExportService {
    pub fn with_paths(output_dir: PathBuf, file_name: impl Into<String>) -> Self {
        Self {
            output_dir,
            file_name: file_name.into(),
        }
    }

    /// Exports into `$HOME/Pictures`.
    pub fn with_default_paths(file_name: impl Into<String>) -> StorageResult<Self> {
        let home = std::env::var("HOME").map_err(|_| StorageError::MissingHomeDirectory)?;
        let mut output_dir = PathBuf::from(home);
        output_dir.push(PICTURES_SUBDIR);
        Ok(Self::with_paths(output_dir, file_name))
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// First free path of the form `name.png`, `name-1.png`, `name-2.png`, ...
    pub fn allocate_target_path(&self) -> StorageResult<PathBuf> {
        let file_name = self.file_name.trim();
        if file_name.is_empty() {
            return Err(StorageError::MissingFileName);
        }

        // The bytes are always PNG, so any configured extension is replaced.
        let stem = Path::new(file_name)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(file_name);

        let first = self.output_dir.join(format!("{stem}.{PNG_EXTENSION}"));
        if !first.exists() {
            return Ok(first);
        }
        for index in 1..MAX_NAME_ATTEMPTS {
            let candidate = self
                .output_dir
                .join(format!("{stem}-{index}.{PNG_EXTENSION}"));
            if !candidate.exists() {
                return Ok(candidate);
            }
        }
        Err(StorageError::NoFreeFileName(self.output_dir.clone()))
    }

    pub fn save_png(&self, image: &RgbaImage) -> StorageResult<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;
        let target = self.allocate_target_path()?;
        image.save_with_format(&target, ImageFormat::Png)?;
        tracing::info!(
            path = %target.display(),
            width = image.width(),
            height = image.height(),
            "exported composition"
        );
        Ok(target)
    }
}
