//! Script engine over the sprout interpreter.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use sprout::{EvalError, Value};

use crate::engine::{ForeignCallError, ModuleHandle, ScriptEngine};
use crate::error::StartupError;
use crate::platform::PlatformConfig;

/// File extension for sprout module sources.
pub const MODULE_EXTENSION: &str = "spr";

/// Engine that resolves `<name>.spr` files from a search path and keeps
/// resolved modules cached for the life of the engine. Only module
/// resolution is cached; invocation results never are.
pub struct SproutEngine {
    module_dirs: Vec<PathBuf>,
    cache: Mutex<HashMap<String, Arc<SproutModule>>>,
}

impl SproutEngine {
    /// Build an engine from a validated platform configuration.
    pub fn from_platform(platform: &PlatformConfig) -> Result<Self, StartupError> {
        platform.validate()?;
        Ok(Self {
            module_dirs: platform.module_dirs.clone(),
            cache: Mutex::new(HashMap::new()),
        })
    }

    /// Probe the search path for the module's source file.
    fn find_source(&self, module: &str) -> Option<PathBuf> {
        self.module_dirs
            .iter()
            .map(|dir| dir.join(format!("{}.{}", module, MODULE_EXTENSION)))
            .find(|path| path.is_file())
    }

    fn load(&self, module: &str) -> Result<Arc<SproutModule>, ForeignCallError> {
        let path = self
            .find_source(module)
            .ok_or_else(|| ForeignCallError::ModuleNotFound {
                module: module.to_string(),
            })?;
        let source =
            std::fs::read_to_string(&path).map_err(|e| ForeignCallError::Load {
                module: module.to_string(),
                message: format!("cannot read {}: {}", path.display(), e),
            })?;
        let inner = sprout::Module::eval(module, &source).map_err(|e| {
            ForeignCallError::Load {
                module: module.to_string(),
                message: e.to_string(),
            }
        })?;
        tracing::debug!(module, path = %path.display(), "module loaded");
        Ok(Arc::new(SproutModule { inner }))
    }
}

impl ScriptEngine for SproutEngine {
    fn resolve(&self, module: &str) -> Result<Arc<dyn ModuleHandle>, ForeignCallError> {
        if !is_module_name(module) {
            return Err(ForeignCallError::ModuleNotFound {
                module: module.to_string(),
            });
        }
        {
            let cache = self.cache.lock().expect("module cache poisoned");
            if let Some(handle) = cache.get(module) {
                return Ok(Arc::clone(handle) as Arc<dyn ModuleHandle>);
            }
        }
        // Load without holding the lock; two threads racing on the same
        // module may both load it, and the first insert wins.
        let handle = self.load(module)?;
        let mut cache = self.cache.lock().expect("module cache poisoned");
        let handle = cache
            .entry(module.to_string())
            .or_insert(handle);
        Ok(Arc::clone(handle) as Arc<dyn ModuleHandle>)
    }
}

/// Module names are identifier-shaped; anything with path separators or
/// other punctuation never reaches the filesystem probe.
fn is_module_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

struct SproutModule {
    inner: sprout::Module,
}

impl ModuleHandle for SproutModule {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn call(&self, function: &str, args: &[Value]) -> Result<Value, ForeignCallError> {
        self.inner.call(function, args).map_err(|e| match e {
            // The entry function itself was absent; nested undefined
            // functions are script errors like any other.
            EvalError::UndefinedFunction(ref name) if name == function => {
                ForeignCallError::FunctionNotFound {
                    module: self.inner.name().to_string(),
                    function: function.to_string(),
                }
            }
            other => ForeignCallError::Script {
                message: other.to_string(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_names_are_identifier_shaped() {
        assert!(is_module_name("garden"));
        assert!(is_module_name("garden_v2"));
        assert!(!is_module_name(""));
        assert!(!is_module_name("../etc/passwd"));
        assert!(!is_module_name("a/b"));
    }
}
