//! Terminal output for the CLI.

pub mod outline;
pub mod theme;

pub use outline::{render_outline, signature};
pub use theme::{THEME, Theme};
