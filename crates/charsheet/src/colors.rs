//! Semantic color theme for terminal output
//!
//! - `active` => blue: section headers in `rules`
//! - `success` => green: applied changes, maximum rolls
//! - `warning` => yellow: unchanged sheets, requirement notes
//! - `fail` => red: errors, downed characters, minimum rolls

use std::sync::LazyLock;

use owo_colors::Style;

/// Semantic color definitions for terminal output
pub struct SemanticColors {
    /// Blue
    pub active: Style,
    /// Green
    pub success: Style,
    /// Yellow
    pub warning: Style,
    /// Red
    pub fail: Style,
}

impl Default for SemanticColors {
    fn default() -> Self {
        Self {
            active: Style::new().blue(),
            success: Style::new().green(),
            warning: Style::new().yellow(),
            fail: Style::new().red(),
        }
    }
}

/// Global default theme
pub static COLORS: LazyLock<SemanticColors> = LazyLock::new(SemanticColors::default);
