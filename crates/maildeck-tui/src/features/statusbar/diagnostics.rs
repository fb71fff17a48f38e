//! Update-cycle diagnostics.
//!
//! Three counters instrument the status bar's update lifecycle: change
//! events seen on the bus, recalc passes, and repaint passes. They live in
//! the shared application context rather than hidden statics so tests can
//! read and reset them deterministically. They have no effect on
//! correctness.

/// Monotonic lifecycle counters, reset at process start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Diagnostics {
    /// Bus events observed, relevant or not.
    pub events: u64,
    /// Recalc passes performed.
    pub recalcs: u64,
    /// Repaint passes performed.
    pub repaints: u64,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Debug preamble prepended to the status line.
    pub fn preamble(&self) -> String {
        format!("(E{},C{},P{}) ", self.events, self.recalcs, self.repaints)
    }
}
