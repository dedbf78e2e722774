use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::storage::DEFAULT_EXPORT_FILE_NAME;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConfigPathError {
    MissingHomeDirectory,
}

const APP_DIR: &str = "stickerboard";
const APP_CONFIG_FILE: &str = "config.json";
const GALLERY_SUBDIR: &str = "stickers";
const DEFAULT_CANVAS_WIDTH: u32 = 800;
const DEFAULT_CANVAS_HEIGHT: u32 = 600;
const MAX_CANVAS_DIMENSION: u32 = 8_192;

/// Application-level settings from `config.json`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub(crate) canvas_width: u32,
    pub(crate) canvas_height: u32,
    pub(crate) gallery_dir: Option<PathBuf>,
    pub(crate) output_dir: Option<PathBuf>,
    pub(crate) export_file_name: String,
    pub(crate) show_landing: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            gallery_dir: None,
            output_dir: None,
            export_file_name: DEFAULT_EXPORT_FILE_NAME.to_string(),
            show_landing: true,
        }
    }
}

impl AppConfig {
    /// Canvas size with zero dimensions replaced by the defaults and
    /// oversized ones clamped to `MAX_CANVAS_DIMENSION`.
    pub(crate) fn canvas_size(&self) -> (u32, u32) {
        (
            canvas_dimension("canvas_width", self.canvas_width, DEFAULT_CANVAS_WIDTH),
            canvas_dimension("canvas_height", self.canvas_height, DEFAULT_CANVAS_HEIGHT),
        )
    }
}

fn canvas_dimension(field: &str, value: u32, default: u32) -> u32 {
    if value == 0 {
        return default;
    }
    if value > MAX_CANVAS_DIMENSION {
        tracing::warn!(field, value, max = MAX_CANVAS_DIMENSION, "canvas dimension clamped");
        return MAX_CANVAS_DIMENSION;
    }
    value
}

pub(crate) fn load_app_config() -> AppConfig {
    let (xdg_config_home, home) = config_env_dirs();
    load_app_config_with(xdg_config_home.as_deref(), home.as_deref())
}

fn load_app_config_with(xdg_config_home: Option<&Path>, home: Option<&Path>) -> AppConfig {
    let path = match app_config_path(APP_DIR, APP_CONFIG_FILE, xdg_config_home, home) {
        Ok(p) => p,
        Err(_) => return AppConfig::default(),
    };
    if !path.exists() {
        return AppConfig::default();
    }
    match std::fs::read_to_string(&path) {
        Ok(contents) => parse_app_config(&contents).unwrap_or_else(|err| {
            tracing::warn!(?err, ?path, "failed to parse config.json; using defaults");
            AppConfig::default()
        }),
        Err(err) => {
            tracing::warn!(?err, ?path, "failed to read config.json; using defaults");
            AppConfig::default()
        }
    }
}

fn parse_app_config(contents: &str) -> serde_json::Result<AppConfig> {
    serde_json::from_str(contents)
}

pub(crate) fn config_env_dirs() -> (Option<PathBuf>, Option<PathBuf>) {
    (
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

pub(crate) fn app_config_path(
    app_dir: &str,
    file_name: &str,
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    let mut path = config_root(xdg_config_home, home)?;
    path.push(app_dir);
    path.push(file_name);
    Ok(path)
}

fn config_root(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    if let Some(xdg) = xdg_config_home.filter(|path| !path.as_os_str().is_empty()) {
        return Ok(xdg.to_path_buf());
    }

    let home = home.ok_or(ConfigPathError::MissingHomeDirectory)?;
    Ok(home.join(".config"))
}

/// Gallery directory: explicit config value, else `$XDG_DATA_HOME/stickerboard/stickers`,
/// else `$HOME/.local/share/stickerboard/stickers`.
pub(crate) fn resolve_gallery_dir(config: &AppConfig) -> Result<PathBuf, ConfigPathError> {
    if let Some(dir) = config.gallery_dir.as_ref() {
        return Ok(dir.clone());
    }
    let xdg_data_home = std::env::var_os("XDG_DATA_HOME").map(PathBuf::from);
    let home = std::env::var_os("HOME").map(PathBuf::from);
    default_gallery_dir(xdg_data_home.as_deref(), home.as_deref())
}

fn default_gallery_dir(
    xdg_data_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    let mut path = match xdg_data_home.filter(|path| !path.as_os_str().is_empty()) {
        Some(xdg) => xdg.to_path_buf(),
        None => home
            .ok_or(ConfigPathError::MissingHomeDirectory)?
            .join(".local/share"),
    };
    path.push(APP_DIR);
    path.push(GALLERY_SUBDIR);
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_config_path_prefers_xdg_config_home() {
        let path = app_config_path(
            "stickerboard",
            "config.json",
            Some(Path::new("/tmp/config-root")),
            Some(Path::new("/tmp/home")),
        )
        .expect("path should resolve");

        assert_eq!(
            path,
            PathBuf::from("/tmp/config-root/stickerboard/config.json")
        );
    }

    #[test]
    fn app_config_path_falls_back_to_home_dot_config() {
        let path = app_config_path(
            "stickerboard",
            "config.json",
            None,
            Some(Path::new("/tmp/home")),
        )
        .expect("path should resolve");

        assert_eq!(
            path,
            PathBuf::from("/tmp/home/.config/stickerboard/config.json")
        );
    }

    #[test]
    fn app_config_path_errors_when_home_missing_and_xdg_unset() {
        let error = app_config_path("stickerboard", "config.json", None, None).unwrap_err();
        assert_eq!(error, ConfigPathError::MissingHomeDirectory);
    }

    #[test]
    fn partial_config_keeps_defaults_for_missing_fields() {
        let config = parse_app_config(r#"{ "canvas_width": 1024, "show_landing": false }"#)
            .expect("config should parse");
        assert_eq!(config.canvas_size(), (1024, DEFAULT_CANVAS_HEIGHT));
        assert!(!config.show_landing);
        assert_eq!(config.export_file_name, "composition.png");
        assert!(config.gallery_dir.is_none());
    }

    #[test]
    fn zero_canvas_dimensions_fall_back_to_defaults() {
        let config = parse_app_config(r#"{ "canvas_width": 0, "canvas_height": 0 }"#).unwrap();
        assert_eq!(
            config.canvas_size(),
            (DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT)
        );
    }

    #[test]
    fn oversized_canvas_is_clamped() {
        let config =
            parse_app_config(r#"{ "canvas_width": 100000, "canvas_height": 100000 }"#).unwrap();
        assert_eq!(
            config.canvas_size(),
            (MAX_CANVAS_DIMENSION, MAX_CANVAS_DIMENSION)
        );

        let config =
            parse_app_config(r#"{ "canvas_width": 8192, "canvas_height": 9000 }"#).unwrap();
        assert_eq!(config.canvas_size(), (8_192, MAX_CANVAS_DIMENSION));
    }

    #[test]
    fn invalid_config_file_falls_back_to_defaults() {
        let root = std::env::temp_dir().join(format!(
            "stickerboard-config-invalid-{}",
            std::process::id()
        ));
        let dir = root.join(APP_DIR);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(APP_CONFIG_FILE), b"{ not json").unwrap();

        let config = load_app_config_with(Some(&root), None);
        assert_eq!(
            config.canvas_size(),
            (DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT)
        );
        assert!(config.show_landing);

        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn default_gallery_dir_prefers_xdg_data_home() {
        let path = default_gallery_dir(Some(Path::new("/tmp/data")), Some(Path::new("/tmp/home")))
            .unwrap();
        assert_eq!(path, PathBuf::from("/tmp/data/stickerboard/stickers"));

        let path = default_gallery_dir(None, Some(Path::new("/tmp/home"))).unwrap();
        assert_eq!(
            path,
            PathBuf::from("/tmp/home/.local/share/stickerboard/stickers")
        );
    }

    #[test]
    fn configured_gallery_dir_wins() {
        let config = AppConfig {
            gallery_dir: Some(PathBuf::from("/srv/stickers")),
            ..AppConfig::default()
        };
        assert_eq!(
            resolve_gallery_dir(&config).unwrap(),
            PathBuf::from("/srv/stickers")
        );
    }
}
