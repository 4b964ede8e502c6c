//! GardenShop host shell.
//!
//! The shell owns the display side of the application: a surface
//! exposing `set_text`, and the screen-construction path that starts
//! the embedded runtime, invokes `garden.fetch_once`,
//! and renders the result. The runtime calls run on a blocking worker
//! so screen construction never freezes on interpreter startup; the
//! surface shows a loading state until the result arrives.

pub mod display;
pub mod screen;

pub use display::{DisplaySurface, TerminalSurface};
pub use screen::{create_screen, ScreenError, FETCH_ONCE, GARDEN_MODULE, LOADING_TEXT};
