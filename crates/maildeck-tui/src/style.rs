//! Color roles for the TUI.
//!
//! Widgets draw through named roles rather than concrete colors so a theme
//! swap never touches widget code. The role trio here is the minimum the
//! status bar needs: its own bar color, the surrounding normal text, and the
//! debug preamble.

use ratatui::style::{Color, Modifier, Style};

/// Named color roles resolved through [`Theme`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleRole {
    /// Ordinary text; also what the pen is restored to after a styled draw.
    Normal,
    /// The status bar line.
    Status,
    /// Diagnostic/debug text.
    Debug,
}

/// Maps [`StyleRole`] to concrete ratatui styles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    normal: Style,
    status: Style,
    debug: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            normal: Style::default(),
            status: Style::default().add_modifier(Modifier::REVERSED),
            debug: Style::default().fg(Color::Yellow),
        }
    }
}

impl Theme {
    pub fn style(&self, role: StyleRole) -> Style {
        match role {
            StyleRole::Normal => self.normal,
            StyleRole::Status => self.status,
            StyleRole::Debug => self.debug,
        }
    }
}
