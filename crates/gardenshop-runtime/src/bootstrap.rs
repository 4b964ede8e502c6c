//! Runtime lifecycle: exactly-once startup and the invoke operation.

use std::time::Instant;

use once_cell::sync::OnceCell;
use uuid::Uuid;

use crate::engine::ScriptEngine;
use crate::error::{InvokeError, StartupError};
use crate::platform::PlatformConfig;
use crate::sprout_engine::SproutEngine;

/// A started embedded runtime. Lives for the rest of the process; never
/// torn down.
pub struct Runtime {
    engine: Box<dyn ScriptEngine>,
}

impl std::fmt::Debug for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime").finish_non_exhaustive()
    }
}

impl Runtime {
    pub fn new(engine: Box<dyn ScriptEngine>) -> Self {
        Self { engine }
    }

    /// Resolve `module`, call the zero-argument `function` on it, and
    /// return the result's string representation.
    ///
    /// A single synchronous round trip: no retry, no timeout, no result
    /// caching. Failures surface unchanged; no default is substituted.
    pub fn invoke(&self, module: &str, function: &str) -> Result<String, InvokeError> {
        let trace_id = Uuid::new_v4();
        let start = Instant::now();
        let handle = self.engine.resolve(module)?;
        let value = handle.call(function, &[])?;
        let text = value.to_string();
        tracing::info!(
            %trace_id,
            module,
            function,
            latency_ms = start.elapsed().as_millis() as u64,
            "foreign call completed"
        );
        Ok(text)
    }
}

/// Guarded lazy-initialization cell around a [`Runtime`].
///
/// The once-guard is the single primitive enforcing the "initialize at
/// most once" invariant; callers never check started-ness by hand. The
/// process-wide instance is [`global`]; tests create their own cells.
pub struct RuntimeCell {
    inner: OnceCell<Runtime>,
}

impl RuntimeCell {
    pub const fn new() -> Self {
        Self {
            inner: OnceCell::new(),
        }
    }

    pub fn is_started(&self) -> bool {
        self.inner.get().is_some()
    }

    /// Idempotent startup against the production sprout engine. The
    /// first call performs the one-time initialization; later calls are
    /// a cheap state check and return the existing runtime.
    pub fn ensure_started(
        &self,
        platform: &PlatformConfig,
    ) -> Result<&Runtime, StartupError> {
        self.ensure_started_with(|| {
            let engine = SproutEngine::from_platform(platform)?;
            Ok(Runtime::new(Box::new(engine)))
        })
    }

    /// Idempotent startup with a caller-supplied engine factory. The
    /// factory runs at most once even under concurrent callers; on
    /// failure nothing is stored and a later call may try again.
    pub fn ensure_started_with<F>(&self, factory: F) -> Result<&Runtime, StartupError>
    where
        F: FnOnce() -> Result<Runtime, StartupError>,
    {
        let mut first = false;
        let runtime = self.inner.get_or_try_init(|| {
            first = true;
            let start = Instant::now();
            let runtime = factory()?;
            tracing::info!(
                latency_ms = start.elapsed().as_millis() as u64,
                "embedded runtime started"
            );
            Ok(runtime)
        })?;
        if !first {
            tracing::debug!("runtime already started, reusing");
        }
        Ok(runtime)
    }

    /// The started runtime, or `StartupError::NotStarted`. Fails fast;
    /// never blocks waiting for someone else to start it.
    pub fn get(&self) -> Result<&Runtime, StartupError> {
        self.inner.get().ok_or(StartupError::NotStarted)
    }
}

impl Default for RuntimeCell {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL: RuntimeCell = RuntimeCell::new();

/// The process-wide runtime handle.
pub fn global() -> &'static RuntimeCell {
    &GLOBAL
}
