//! Terminal chrome (title and icon text).
//!
//! "Chrome" is emulator-level state outside the drawn region: the window
//! title and the icon name. Widgets reach it through the [`TerminalChrome`]
//! seam; production code writes OSC sequences, tests record calls.

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use anyhow::{Context, Result};
use crossterm::execute;
use crossterm::style::Print;

/// Terminal title/icon side effects, guarded by a capability check.
pub trait TerminalChrome {
    /// Whether the running terminal understands title/icon sequences.
    fn supports_status_text(&self) -> bool;

    /// Sets the terminal window title.
    ///
    /// # Errors
    /// Returns an error if the escape sequence cannot be written.
    fn set_status_text(&mut self, text: &str) -> Result<()>;

    /// Sets the terminal icon name.
    ///
    /// # Errors
    /// Returns an error if the escape sequence cannot be written.
    fn set_icon_text(&mut self, text: &str) -> Result<()>;
}

/// Production chrome: OSC 2 (title) and OSC 1 (icon name) on stdout.
#[derive(Debug, Clone)]
pub struct OscChrome {
    supported: bool,
}

impl OscChrome {
    /// Detects capability from the TERM environment variable.
    pub fn new() -> Self {
        Self::from_term(std::env::var("TERM").ok().as_deref())
    }

    /// Capability check against the terminal families known to handle
    /// title sequences.
    pub fn from_term(term: Option<&str>) -> Self {
        const SUPPORTED_PREFIXES: &[&str] =
            &["xterm", "rxvt", "screen", "tmux", "alacritty", "kitty"];
        let supported = term.is_some_and(|t| {
            SUPPORTED_PREFIXES
                .iter()
                .any(|prefix| t.starts_with(prefix))
        });
        Self { supported }
    }
}

impl Default for OscChrome {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalChrome for OscChrome {
    fn supports_status_text(&self) -> bool {
        self.supported
    }

    fn set_status_text(&mut self, text: &str) -> Result<()> {
        execute!(io::stdout(), Print(format!("\x1b]2;{text}\x07")))
            .context("Failed to set terminal title")?;
        Ok(())
    }

    fn set_icon_text(&mut self, text: &str) -> Result<()> {
        execute!(io::stdout(), Print(format!("\x1b]1;{text}\x07")))
            .context("Failed to set terminal icon")?;
        Ok(())
    }
}

/// One recorded chrome side effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChromeCall {
    Status(String),
    Icon(String),
}

/// Test double that records chrome calls instead of writing escapes.
#[derive(Debug, Clone, Default)]
pub struct RecordingChrome {
    supported: bool,
    calls: Rc<RefCell<Vec<ChromeCall>>>,
}

impl RecordingChrome {
    pub fn new(supported: bool) -> Self {
        Self {
            supported,
            calls: Rc::default(),
        }
    }

    /// Handle to the recorded calls; clones share the same log.
    pub fn calls(&self) -> Rc<RefCell<Vec<ChromeCall>>> {
        Rc::clone(&self.calls)
    }
}

impl TerminalChrome for RecordingChrome {
    fn supports_status_text(&self) -> bool {
        self.supported
    }

    fn set_status_text(&mut self, text: &str) -> Result<()> {
        self.calls
            .borrow_mut()
            .push(ChromeCall::Status(text.to_string()));
        Ok(())
    }

    fn set_icon_text(&mut self, text: &str) -> Result<()> {
        self.calls.borrow_mut().push(ChromeCall::Icon(text.to_string()));
        Ok(())
    }
}
