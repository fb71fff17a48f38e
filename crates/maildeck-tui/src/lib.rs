//! TUI widget layer for maildeck.
//!
//! Provides the window/widget update cycle (recalc, then repaint) and the
//! index status bar built on it. Application data (mailbox, config,
//! notification bus) lives in `maildeck-core`; this crate turns it into
//! cells on a surface.

pub mod chrome;
pub mod features;
pub mod format;
pub mod state;
pub mod style;
pub mod surface;
pub mod window;

pub use features::statusbar;
