//! GardenShop runtime bootstrap.
//!
//! This crate owns the lifecycle of the embedded sprout interpreter and
//! exposes one operation to execute a named foreign call:
//!
//! ```no_run
//! use gardenshop_runtime::{global, PlatformConfig};
//!
//! let platform = PlatformConfig::single_dir("modules");
//! let runtime = global().ensure_started(&platform)?;
//! let text = runtime.invoke("garden", "fetch_once")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! The runtime is started at most once per process. `ensure_started` is
//! idempotent; `get` fails fast when the runtime was never started. The
//! embedding detail sits behind the [`ScriptEngine`] seam so tests can
//! substitute stub engines.

pub mod bootstrap;
pub mod engine;
pub mod error;
pub mod platform;
pub mod sprout_engine;

pub use bootstrap::{global, Runtime, RuntimeCell};
pub use engine::{ForeignCallError, ModuleHandle, ScriptEngine};
pub use error::{InvokeError, StartupError};
pub use platform::PlatformConfig;
pub use sprout_engine::SproutEngine;
