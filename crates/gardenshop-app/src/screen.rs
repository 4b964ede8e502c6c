//! The screen-construction path.
//!
//! Bootstrap and invoke run on a blocking worker; the surface shows a
//! loading state until the completion delivers the fetched text. Any
//! failure aborts screen construction and surfaces to the caller; the
//! display never receives a placeholder result.

use std::sync::Arc;

use gardenshop_runtime::{InvokeError, PlatformConfig, RuntimeCell, StartupError};
use thiserror::Error;

use crate::display::DisplaySurface;

/// The embedded module the shell talks to.
pub const GARDEN_MODULE: &str = "garden";
/// The one function the shell calls on it.
pub const FETCH_ONCE: &str = "fetch_once";
/// Shown while the worker is busy.
pub const LOADING_TEXT: &str = "Loading…";

#[derive(Debug, Error)]
pub enum ScreenError {
    #[error("runtime startup failed: {0}")]
    Startup(#[from] StartupError),

    #[error("foreign call failed: {0}")]
    Invoke(#[from] InvokeError),

    #[error("worker task failed: {0}")]
    Worker(String),
}

/// Construct the screen: show the loading state, start the runtime (if
/// this is the first screen in the process), fetch, display.
///
/// Repeated calls in one process reuse the already-started runtime; the
/// expensive first-time initialization never runs twice.
pub async fn create_screen(
    surface: Arc<dyn DisplaySurface>,
    cell: &'static RuntimeCell,
    platform: PlatformConfig,
) -> Result<(), ScreenError> {
    surface.set_text(LOADING_TEXT);
    tracing::debug!(module = GARDEN_MODULE, function = FETCH_ONCE, "screen construction started");

    let text = tokio::task::spawn_blocking(move || -> Result<String, ScreenError> {
        let runtime = cell.ensure_started(&platform)?;
        Ok(runtime.invoke(GARDEN_MODULE, FETCH_ONCE)?)
    })
    .await
    .map_err(|e| ScreenError::Worker(e.to_string()))??;

    surface.set_text(&text);
    Ok(())
}
