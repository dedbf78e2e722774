pub mod app;
pub mod board;
mod config;
pub mod error;
pub mod gallery;
pub mod geometry;
pub mod history;
pub mod input;
pub mod logging;
pub mod notification;
pub mod placement;
pub mod render;
pub mod state;
pub mod sticker;
pub mod storage;
pub mod ui;
pub use error::{AppError, AppResult};

/// Entrypoint used by the binary.
pub fn run() -> AppResult<()> {
    logging::init();
    tracing::info!("starting Stickerboard");

    let mut app = app::App::new();
    app.start()?;

    tracing::info!("shutdown complete with state={:?}", app.state());
    Ok(())
}
