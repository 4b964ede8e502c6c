//! Screen-construction tests with a recording display surface.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use gardenshop_app::{create_screen, DisplaySurface, ScreenError, LOADING_TEXT};
use gardenshop_runtime::{
    ForeignCallError, ModuleHandle, PlatformConfig, Runtime, RuntimeCell, ScriptEngine,
};
use sprout::Value;

/// Surface that records every `set_text` call.
#[derive(Default)]
struct RecordingSurface {
    texts: Mutex<Vec<String>>,
}

impl RecordingSurface {
    fn texts(&self) -> Vec<String> {
        self.texts.lock().unwrap().clone()
    }
}

impl DisplaySurface for RecordingSurface {
    fn set_text(&self, text: &str) {
        self.texts.lock().unwrap().push(text.to_string());
    }
}

/// Stub `garden` module returning a fixed result for `fetch_once`.
struct StubGarden {
    fetch_once: Result<Value, String>,
}

impl ModuleHandle for StubGarden {
    fn name(&self) -> &str {
        "garden"
    }

    fn call(&self, function: &str, _args: &[Value]) -> Result<Value, ForeignCallError> {
        if function != "fetch_once" {
            return Err(ForeignCallError::FunctionNotFound {
                module: "garden".to_string(),
                function: function.to_string(),
            });
        }
        match &self.fetch_once {
            Ok(value) => Ok(value.clone()),
            Err(message) => Err(ForeignCallError::Script {
                message: message.clone(),
            }),
        }
    }
}

struct StubEngine {
    garden: Option<Arc<StubGarden>>,
}

impl ScriptEngine for StubEngine {
    fn resolve(&self, module: &str) -> Result<Arc<dyn ModuleHandle>, ForeignCallError> {
        match (&self.garden, module) {
            (Some(garden), "garden") => Ok(Arc::clone(garden) as Arc<dyn ModuleHandle>),
            _ => Err(ForeignCallError::ModuleNotFound {
                module: module.to_string(),
            }),
        }
    }
}

/// A leaked cell pre-started with a stubbed garden module. Leaking gives
/// the `'static` lifetime the worker closure needs, exactly like the
/// process-wide cell in production.
fn started_cell(fetch_once: Result<Value, String>) -> &'static RuntimeCell {
    let cell: &'static RuntimeCell = Box::leak(Box::new(RuntimeCell::new()));
    cell.ensure_started_with(|| {
        Ok(Runtime::new(Box::new(StubEngine {
            garden: Some(Arc::new(StubGarden { fetch_once })),
        })))
    })
    .unwrap();
    cell
}

/// Platform descriptor for tests; the stub cell is already started, so
/// the directory is never probed.
fn test_platform() -> PlatformConfig {
    PlatformConfig::single_dir(std::env::temp_dir())
}

#[tokio::test]
async fn happy_path_displays_the_fetched_value() {
    let surface = Arc::new(RecordingSurface::default());
    let cell = started_cell(Ok(Value::Int(42)));

    create_screen(surface.clone(), cell, test_platform())
        .await
        .unwrap();

    assert_eq!(surface.texts(), vec![LOADING_TEXT.to_string(), "42".to_string()]);
}

#[tokio::test]
async fn raising_fetch_once_aborts_screen_construction() {
    let surface = Arc::new(RecordingSurface::default());
    let cell = started_cell(Err("shop backend unavailable".to_string()));

    let err = create_screen(surface.clone(), cell, test_platform())
        .await
        .unwrap_err();

    assert!(matches!(err, ScreenError::Invoke(_)));
    // Only the loading state was ever shown; no placeholder result.
    assert_eq!(surface.texts(), vec![LOADING_TEXT.to_string()]);
}

#[tokio::test]
async fn missing_garden_module_aborts_screen_construction() {
    let surface = Arc::new(RecordingSurface::default());
    let cell: &'static RuntimeCell = Box::leak(Box::new(RuntimeCell::new()));
    cell.ensure_started_with(|| Ok(Runtime::new(Box::new(StubEngine { garden: None }))))
        .unwrap();

    let err = create_screen(surface.clone(), cell, test_platform())
        .await
        .unwrap_err();

    assert!(matches!(err, ScreenError::Invoke(_)));
    assert_eq!(surface.texts(), vec![LOADING_TEXT.to_string()]);
}

#[tokio::test]
async fn repeated_screens_reuse_the_started_runtime() {
    let surface = Arc::new(RecordingSurface::default());
    let cell: &'static RuntimeCell = Box::leak(Box::new(RuntimeCell::new()));
    let initializations: &'static AtomicUsize = Box::leak(Box::new(AtomicUsize::new(0)));

    cell.ensure_started_with(|| {
        initializations.fetch_add(1, Ordering::SeqCst);
        Ok(Runtime::new(Box::new(StubEngine {
            garden: Some(Arc::new(StubGarden {
                fetch_once: Ok(Value::Str("open".to_string())),
            })),
        })))
    })
    .unwrap();

    create_screen(surface.clone(), cell, test_platform())
        .await
        .unwrap();
    create_screen(surface.clone(), cell, test_platform())
        .await
        .unwrap();

    // Two screens, one initialization.
    assert_eq!(initializations.load(Ordering::SeqCst), 1);
    assert_eq!(
        surface.texts(),
        vec![
            LOADING_TEXT.to_string(),
            "open".to_string(),
            LOADING_TEXT.to_string(),
            "open".to_string(),
        ]
    );
}
