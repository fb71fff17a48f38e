//! Feature slices for the TUI.

pub mod statusbar;
