//! Runtime error taxonomy.
//!
//! Startup failures are fatal: there is no recovery path, they propagate
//! to the caller and abort screen construction. Invocation failures are
//! split into resolution (the module or function does not exist) and
//! invocation proper (the callee raised). No failure is ever masked with
//! a default value.

use std::path::PathBuf;

use thiserror::Error;

use crate::engine::ForeignCallError;

/// The embedded runtime could not be started, or was never started.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("runtime has not been started")]
    NotStarted,

    #[error("no module directory exists among {searched:?}")]
    NoModuleDir { searched: Vec<PathBuf> },

    #[error("invalid platform configuration: {message}")]
    Platform { message: String },
}

/// A foreign call failed.
#[derive(Debug, Error)]
pub enum InvokeError {
    /// The named module or function could not be resolved.
    #[error(transparent)]
    Resolution(ForeignCallError),

    /// The called function signalled an error.
    #[error("invocation failed: {message}")]
    Invocation { message: String },
}

impl From<ForeignCallError> for InvokeError {
    fn from(err: ForeignCallError) -> Self {
        match err {
            ForeignCallError::Script { message } => InvokeError::Invocation { message },
            other => InvokeError::Resolution(other),
        }
    }
}
