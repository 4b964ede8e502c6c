//! Platform configuration: where the embedded runtime finds its module
//! sources on the current host.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::StartupError;

/// Environment variable holding a `:`-separated module search path.
pub const ENV_MODULE_PATH: &str = "GARDENSHOP_MODULE_PATH";

/// Descriptor the host passes to `ensure_started`: the search path for
/// embedded-module sources.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformConfig {
    pub module_dirs: Vec<PathBuf>,
}

impl PlatformConfig {
    pub fn new(module_dirs: Vec<PathBuf>) -> Self {
        Self { module_dirs }
    }

    pub fn single_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            module_dirs: vec![dir.into()],
        }
    }

    /// Build from `GARDENSHOP_MODULE_PATH`, if set and non-empty.
    pub fn from_env() -> Option<Self> {
        let raw = std::env::var(ENV_MODULE_PATH).ok()?;
        let dirs: Vec<PathBuf> = raw
            .split(':')
            .filter(|part| !part.is_empty())
            .map(PathBuf::from)
            .collect();
        if dirs.is_empty() {
            None
        } else {
            Some(Self::new(dirs))
        }
    }

    /// Load from a JSON config file.
    pub fn load(path: &Path) -> Result<Self, StartupError> {
        let text = std::fs::read_to_string(path).map_err(|e| StartupError::Platform {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        serde_json::from_str(&text).map_err(|e| StartupError::Platform {
            message: format!("cannot parse {}: {}", path.display(), e),
        })
    }

    /// At least one configured directory must exist on this host.
    pub fn validate(&self) -> Result<(), StartupError> {
        if self.module_dirs.iter().any(|dir| dir.is_dir()) {
            Ok(())
        } else {
            Err(StartupError::NoModuleDir {
                searched: self.module_dirs.clone(),
            })
        }
    }
}
