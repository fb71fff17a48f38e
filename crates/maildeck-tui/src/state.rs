//! Shared and per-view state for the TUI.
//!
//! ## State Hierarchy
//!
//! ```text
//! SharedState            (one per application, Rc-shared across views)
//! ├── mailbox            (current mailbox, mutated by the event loop)
//! ├── status_config      (status bar config subset)
//! ├── notify             (change notification bus)
//! └── diagnostics        (update-cycle counters, resettable in tests)
//!
//! IndexViewState         (one per index view)
//! └── menu               (selection context)
//! ```
//!
//! Everything here lives on the single UI thread; interior mutability is
//! `Rc<RefCell<_>>`, never locks. Widgets hold references into this state
//! and never outlive it: a view tears its widgets down before its own state.

use std::cell::RefCell;
use std::rc::Rc;

use maildeck_core::config::StatusConfig;
use maildeck_core::mailbox::Mailbox;
use maildeck_core::notify::Notify;

use crate::features::statusbar::Diagnostics;

/// Application state shared by every view and widget.
pub struct SharedState {
    pub mailbox: Rc<RefCell<Mailbox>>,
    pub status_config: Rc<RefCell<StatusConfig>>,
    pub notify: Rc<RefCell<Notify>>,
    pub diagnostics: Rc<RefCell<Diagnostics>>,
}

impl SharedState {
    /// Builds shared state around a mailbox and config subset, with a fresh
    /// bus and zeroed diagnostics.
    pub fn new(mailbox: Mailbox, status_config: StatusConfig) -> Rc<Self> {
        Rc::new(Self {
            mailbox: Rc::new(RefCell::new(mailbox)),
            status_config: Rc::new(RefCell::new(status_config)),
            notify: Rc::new(RefCell::new(Notify::new())),
            diagnostics: Rc::new(RefCell::new(Diagnostics::new())),
        })
    }
}

/// Menu selection context inside one index view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuContext {
    /// Zero-based index of the selected entry.
    pub current: usize,
    /// Total entries in the menu.
    pub entries: usize,
}

/// State local to one index view. Owned by the view, referenced by widgets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexViewState {
    pub menu: MenuContext,
}
