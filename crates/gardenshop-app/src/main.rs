//! Terminal entrypoint for the GardenShop shell.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use gardenshop_app::{create_screen, TerminalSurface};
use gardenshop_runtime::{global, PlatformConfig};

/// Optional JSON config file overriding the module search path.
const ENV_CONFIG: &str = "GARDENSHOP_CONFIG";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let platform = platform_config()?;
    let surface = Arc::new(TerminalSurface);
    create_screen(surface, global(), platform)
        .await
        .context("screen construction failed")?;
    Ok(())
}

/// Config file, then env search path, then the bundled `modules/` dir.
fn platform_config() -> anyhow::Result<PlatformConfig> {
    if let Ok(path) = std::env::var(ENV_CONFIG) {
        return PlatformConfig::load(Path::new(&path))
            .with_context(|| format!("loading platform config from {}", path));
    }
    if let Some(config) = PlatformConfig::from_env() {
        return Ok(config);
    }
    Ok(PlatformConfig::single_dir("modules"))
}
