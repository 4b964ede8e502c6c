//! The foreign-call seam.
//!
//! Everything the host needs from the embedded interpreter fits behind
//! two narrow traits: resolve a module by name, call a function on it.
//! The production implementation is [`crate::SproutEngine`]; tests use
//! stubs.

use std::sync::Arc;

use sprout::Value;
use thiserror::Error;

/// A resolved module inside the embedded runtime.
pub trait ModuleHandle: Send + Sync {
    fn name(&self) -> &str;

    /// Invoke a function defined by this module. Blocks until the call
    /// returns or raises; results are never cached.
    fn call(&self, function: &str, args: &[Value]) -> Result<Value, ForeignCallError>;
}

impl std::fmt::Debug for dyn ModuleHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleHandle")
            .field("name", &self.name())
            .finish()
    }
}

/// An embedded script engine capable of resolving modules by name.
pub trait ScriptEngine: Send + Sync {
    fn resolve(&self, module: &str) -> Result<Arc<dyn ModuleHandle>, ForeignCallError>;
}

/// Failure crossing the foreign-call boundary.
#[derive(Debug, Error)]
pub enum ForeignCallError {
    #[error("module not found: {module}")]
    ModuleNotFound { module: String },

    /// The module source was found but could not be parsed or evaluated.
    #[error("module {module} failed to load: {message}")]
    Load { module: String, message: String },

    #[error("function not found: {module}.{function}")]
    FunctionNotFound { module: String, function: String },

    /// The called function itself raised.
    #[error("script error: {message}")]
    Script { message: String },
}
