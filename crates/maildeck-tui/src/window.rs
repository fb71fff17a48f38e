//! Window abstraction and redraw cycle.
//!
//! A [`Window`] is a rectangular screen region with a visibility flag; a
//! [`WindowWidget`] is the behavior attached to it. The [`WindowManager`]
//! owns the pairs and drives the two-phase update cycle:
//!
//! 1. `recalc` — recompute cached content. Never touches the surface.
//! 2. `repaint` — write content to the surface. Gated on visibility by the
//!    widget itself, so an invisible widget's repaint is a cheap no-op.
//!
//! For any pane, recalc always completes before repaint within one redraw
//! cycle. A failing phase skips that pane for the cycle and is logged; it
//! never aborts the event loop.

use anyhow::Result;
use ratatui::layout::Rect;
use tracing::warn;

use crate::surface::Surface;

/// Closed set of window roles in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowKind {
    /// The message index list.
    Index,
    /// The one-line status bar under the index.
    IndexBar,
    /// The message pager.
    Pager,
    /// The help screen.
    Help,
}

/// A rectangular screen region a widget repaints into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    pub kind: WindowKind,
    pub area: Rect,
    visible: bool,
}

impl Window {
    /// Creates a visible window covering `area`.
    pub fn new(kind: WindowKind, area: Rect) -> Self {
        Self {
            kind,
            area,
            visible: true,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

/// Behavior attached to a window, dispatched by the window manager.
pub trait WindowWidget {
    /// Recomputes any cached content needed for rendering.
    ///
    /// Idempotent between state changes and never touches the surface.
    ///
    /// # Errors
    /// No current widget fails here; the plumbing exists so future recompute
    /// work can report failure without changing the trait.
    fn recalc(&mut self) -> Result<()>;

    /// Writes content to the surface.
    ///
    /// Must tolerate an invisible window (no-op beyond bookkeeping).
    ///
    /// # Errors
    /// Returns an error if drawing side effects fail; the manager degrades
    /// this to skipping the pane for the current cycle.
    fn repaint(&mut self, win: &Window, surface: &mut Surface) -> Result<()>;
}

/// Token identifying a pane slot in the manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaneId(usize);

struct Pane {
    window: Window,
    widget: Box<dyn WindowWidget>,
}

/// Owns window/widget pairs and drives redraw cycles.
#[derive(Default)]
pub struct WindowManager {
    panes: Vec<Option<Pane>>,
}

impl WindowManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a widget to a window and returns the pane token.
    pub fn attach(&mut self, window: Window, widget: Box<dyn WindowWidget>) -> PaneId {
        self.panes.push(Some(Pane { window, widget }));
        PaneId(self.panes.len() - 1)
    }

    /// Tears down a pane, dropping its widget (which revokes observers).
    ///
    /// Destroying an already-destroyed pane is a no-op.
    pub fn destroy(&mut self, id: PaneId) {
        if let Some(slot) = self.panes.get_mut(id.0) {
            slot.take();
        }
    }

    /// The window of a live pane, for geometry and visibility changes.
    pub fn window_mut(&mut self, id: PaneId) -> Option<&mut Window> {
        self.panes
            .get_mut(id.0)
            .and_then(|slot| slot.as_mut())
            .map(|pane| &mut pane.window)
    }

    /// Runs one redraw cycle: recalc then repaint for every live pane.
    pub fn redraw(&mut self, surface: &mut Surface) {
        for pane in self.panes.iter_mut().flatten() {
            if let Err(e) = pane.widget.recalc() {
                warn!(kind = ?pane.window.kind, "recalc failed, skipping pane: {e:#}");
                continue;
            }
            if let Err(e) = pane.widget.repaint(&pane.window, surface) {
                warn!(kind = ?pane.window.kind, "repaint failed, skipping frame: {e:#}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    /// Records the phases it sees, to pin the recalc-before-repaint order.
    struct PhaseProbe {
        log: Rc<RefCell<Vec<&'static str>>>,
    }

    impl WindowWidget for PhaseProbe {
        fn recalc(&mut self) -> Result<()> {
            self.log.borrow_mut().push("recalc");
            Ok(())
        }

        fn repaint(&mut self, _win: &Window, _surface: &mut Surface) -> Result<()> {
            self.log.borrow_mut().push("repaint");
            Ok(())
        }
    }

    fn bar_window() -> Window {
        Window::new(WindowKind::IndexBar, Rect::new(0, 0, 40, 1))
    }

    #[test]
    fn test_redraw_runs_recalc_before_repaint() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut wm = WindowManager::new();
        wm.attach(
            bar_window(),
            Box::new(PhaseProbe {
                log: Rc::clone(&log),
            }),
        );

        let mut surface = Surface::new(40, 1);
        wm.redraw(&mut surface);
        wm.redraw(&mut surface);

        assert_eq!(
            *log.borrow(),
            vec!["recalc", "repaint", "recalc", "repaint"]
        );
    }

    #[test]
    fn test_destroy_is_idempotent() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut wm = WindowManager::new();
        let id = wm.attach(
            bar_window(),
            Box::new(PhaseProbe {
                log: Rc::clone(&log),
            }),
        );

        wm.destroy(id);
        wm.destroy(id); // second teardown must not fault

        let mut surface = Surface::new(40, 1);
        wm.redraw(&mut surface);
        assert!(log.borrow().is_empty());
        assert!(wm.window_mut(id).is_none());
    }

    #[test]
    fn test_failing_recalc_skips_repaint_for_the_cycle() {
        struct FailingRecalc {
            log: Rc<RefCell<Vec<&'static str>>>,
        }

        impl WindowWidget for FailingRecalc {
            fn recalc(&mut self) -> Result<()> {
                self.log.borrow_mut().push("recalc");
                anyhow::bail!("recompute failed")
            }

            fn repaint(&mut self, _win: &Window, _surface: &mut Surface) -> Result<()> {
                self.log.borrow_mut().push("repaint");
                Ok(())
            }
        }

        let log = Rc::new(RefCell::new(Vec::new()));
        let mut wm = WindowManager::new();
        wm.attach(
            bar_window(),
            Box::new(FailingRecalc {
                log: Rc::clone(&log),
            }),
        );

        let mut surface = Surface::new(40, 1);
        wm.redraw(&mut surface);
        assert_eq!(*log.borrow(), vec!["recalc"]);
    }
}
