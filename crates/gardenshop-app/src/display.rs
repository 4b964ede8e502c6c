//! Display surfaces.

/// The one operation the host display exposes.
pub trait DisplaySurface: Send + Sync {
    fn set_text(&self, text: &str);
}

/// Surface that renders to stdout, one line per update.
pub struct TerminalSurface;

impl DisplaySurface for TerminalSurface {
    fn set_text(&self, text: &str) {
        println!("{}", text);
    }
}
