use std::path::PathBuf;

use crate::config::{load_app_config, resolve_gallery_dir, AppConfig};
use crate::gallery::Gallery;
use crate::geometry::ImageBounds;
use crate::storage::ExportService;

pub(super) struct AppBootstrap {
    pub(super) show_landing: bool,
    pub(super) gallery: Gallery,
    pub(super) gallery_dir: Option<PathBuf>,
    pub(super) export_service: ExportService,
    pub(super) canvas_size: ImageBounds,
}

impl AppBootstrap {
    pub(super) fn gallery_dir_label(&self) -> String {
        self.gallery_dir
            .as_ref()
            .map(|dir| dir.display().to_string())
            .unwrap_or_else(|| String::from("(no sticker directory)"))
    }
}

pub(super) fn bootstrap_app_runtime() -> AppBootstrap {
    let config = load_app_config();
    let (canvas_width, canvas_height) = config.canvas_size();
    let canvas_size = ImageBounds::new(canvas_width, canvas_height);
    tracing::info!(
        canvas_width,
        canvas_height,
        show_landing = config.show_landing,
        "loaded app config"
    );

    let gallery_dir = match resolve_gallery_dir(&config) {
        Ok(dir) => Some(dir),
        Err(err) => {
            tracing::warn!(?err, "could not resolve sticker directory");
            None
        }
    };
    let gallery = gallery_dir
        .as_deref()
        .map(load_gallery_or_empty)
        .unwrap_or_default();

    let export_service = initialize_export_service(&config);
    tracing::info!(
        output_dir = %export_service.output_dir().display(),
        file_name = export_service.file_name(),
        "export target resolved"
    );

    AppBootstrap {
        show_landing: config.show_landing,
        gallery,
        gallery_dir,
        export_service,
        canvas_size,
    }
}

fn load_gallery_or_empty(dir: &std::path::Path) -> Gallery {
    match Gallery::load_from_dir(dir) {
        Ok(gallery) => {
            tracing::debug!(categories = ?gallery.categories(), "gallery categories");
            gallery
        }
        Err(err) => {
            tracing::warn!(%err, "sticker gallery unavailable; starting empty");
            Gallery::default()
        }
    }
}

fn initialize_export_service(config: &AppConfig) -> ExportService {
    let file_name = config.export_file_name.clone();
    if let Some(dir) = config.output_dir.clone() {
        return ExportService::with_paths(dir, file_name);
    }
    match ExportService::with_default_paths(file_name.clone()) {
        Ok(service) => service,
        Err(err) => {
            let fallback = std::env::temp_dir();
            tracing::warn!(
                ?err,
                fallback = %fallback.display(),
                "default export directory unavailable"
            );
            ExportService::with_paths(fallback, file_name)
        }
    }
}
