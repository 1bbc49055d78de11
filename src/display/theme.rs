//! Terminal styling for outlines and status messages.

use crate::symbol::SymbolType;
use console::Style;
use std::io::IsTerminal;
use std::sync::LazyLock;

/// Theme for stdout, colored only when stdout is a terminal and `NO_COLOR`
/// is unset.
pub static THEME: LazyLock<Theme> = LazyLock::new(Theme::detect);

#[derive(Debug, Clone)]
pub struct Theme {
    pub success: Style,
    pub error: Style,
    /// Namespaces and type declarations
    pub container: Style,
    /// Members of a type
    pub member: Style,
    pub signature: Style,
    pub dim: Style,
    pub path: Style,
    colored: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            success: Style::new().green().bright(),
            error: Style::new().red().bright(),
            container: Style::new().blue().bold(),
            member: Style::new().cyan(),
            signature: Style::new().yellow(),
            dim: Style::new().dim(),
            path: Style::new().magenta(),
            colored: true,
        }
    }
}

impl Theme {
    pub fn detect() -> Self {
        let colored = std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal();
        Self {
            colored,
            ..Self::default()
        }
    }

    /// Theme that never emits escape codes.
    pub fn plain() -> Self {
        Self {
            colored: false,
            ..Self::default()
        }
    }

    pub fn is_colored(&self) -> bool {
        self.colored
    }

    /// Style for the kind label of `symbol_type`.
    pub fn kind_style(&self, symbol_type: SymbolType) -> &Style {
        if symbol_type.is_container() || symbol_type.is_type() {
            &self.container
        } else {
            &self.member
        }
    }

    pub fn success_with_icon(&self, text: &str) -> String {
        format!("✓ {}", self.apply(&self.success, text))
    }

    pub fn error_with_icon(&self, text: &str) -> String {
        format!("✗ {}", self.apply(&self.error, text))
    }

    pub fn apply<T: std::fmt::Display>(&self, style: &Style, text: T) -> String {
        if self.colored {
            // console re-checks the terminal unless forced
            style.clone().force_styling(true).apply_to(text).to_string()
        } else {
            text.to_string()
        }
    }
}
