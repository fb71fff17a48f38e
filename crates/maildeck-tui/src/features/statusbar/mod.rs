//! Index status bar.
//!
//! One-line widget under the message index showing mailbox state through a
//! configurable template, with a diagnostics preamble in front.
//!
//! ## Module Structure
//!
//! - `diagnostics.rs`: lifecycle counters shared through the app context
//! - `mod.rs`: the widget itself and its bus observer
//!
//! ## Update Lifecycle
//!
//! Construction registers an observer for `Index` events on the bus and
//! performs no rendering. The window manager then drives the two phases
//! each redraw cycle:
//!
//! - `recalc` recomputes the cached display text from `status_format`.
//!   Idempotent between state changes; never touches the surface.
//! - `repaint` draws preamble + cached text at the window origin, bracketed
//!   by the status style, and only when the window is visible. When
//!   `ts_enabled` is set and the terminal is capable, it also mirrors the
//!   `ts_status_format` / `ts_icon_format` templates into the terminal
//!   title and icon.
//!
//! The observer itself never renders and keeps no dirty flag: recalc is
//! cheap and runs unconditionally every cycle, so a relevant event only
//! needs to confirm the widget is still live. Teardown (`Drop`) revokes the
//! registration before the widget data is released, so the bus can never
//! call into freed state.

mod diagnostics;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use anyhow::{Result, bail};
use maildeck_core::notify::{NotifyEvent, NotifyKind, ObserverFn, ObserverId};
use tracing::debug;
use unicode_width::UnicodeWidthStr;

pub use diagnostics::Diagnostics;

use crate::chrome::TerminalChrome;
use crate::format::StatusFormatter;
use crate::state::{IndexViewState, SharedState};
use crate::style::{StyleRole, Theme};
use crate::surface::Surface;
use crate::window::{Window, WindowWidget};

/// Widget-private data: the cached display text.
///
/// Kept behind its own `Rc` so the bus observer can hold a `Weak` to it;
/// a failed upgrade is how a dangling registration announces itself.
#[derive(Debug, Default)]
struct BarData {
    cached: Option<String>,
}

/// The status bar widget.
///
/// Holds references to shared application state and the owning view's
/// state; it owns neither and never outlives either.
pub struct StatusBar {
    shared: Rc<SharedState>,
    view: Rc<RefCell<IndexViewState>>,
    data: Rc<RefCell<BarData>>,
    formatter: Box<dyn StatusFormatter>,
    chrome: Box<dyn TerminalChrome>,
    theme: Theme,
    observer: ObserverId,
}

/// Builds the bus callback bound to a widget's private data.
///
/// The event counter counts all bus traffic, relevant or not; filtering
/// happens after. A dead `data` reference is a programming error (the
/// widget was released without revoking its registration) and is reported
/// to the bus, never swallowed.
fn index_observer(
    diagnostics: Rc<RefCell<Diagnostics>>,
    data: Weak<RefCell<BarData>>,
) -> ObserverFn {
    Box::new(move |event| {
        diagnostics.borrow_mut().events += 1;

        let Some(_data) = data.upgrade() else {
            bail!("status bar observer fired after its widget was released");
        };
        if event.kind != NotifyKind::Index {
            return Ok(());
        }

        // Index changed. Recalc runs on every redraw cycle regardless, so
        // there is no dirty flag to set; the upgrade above is the only
        // lookup this callback needs.
        debug!("index changed");
        Ok(())
    })
}

impl StatusBar {
    /// Creates the widget and registers its `Index` observer.
    ///
    /// No rendering happens here; the first repaint is driven by the
    /// window manager.
    pub fn new(
        shared: Rc<SharedState>,
        view: Rc<RefCell<IndexViewState>>,
        formatter: Box<dyn StatusFormatter>,
        chrome: Box<dyn TerminalChrome>,
    ) -> Self {
        let data = Rc::new(RefCell::new(BarData::default()));
        let observer = shared.notify.borrow_mut().register(index_observer(
            Rc::clone(&shared.diagnostics),
            Rc::downgrade(&data),
        ));
        Self {
            shared,
            view,
            data,
            formatter,
            chrome,
            theme: Theme::default(),
            observer,
        }
    }

    fn render_line(&self, template: &str) -> String {
        let view = self.view.borrow();
        let mailbox = self.shared.mailbox.borrow();
        self.formatter
            .render_status_line(&view.menu, &mailbox, template)
    }
}

impl WindowWidget for StatusBar {
    fn recalc(&mut self) -> Result<()> {
        self.shared.diagnostics.borrow_mut().recalcs += 1;
        let template = self.shared.status_config.borrow().status_format.clone();
        let line = self.render_line(&template);
        self.data.borrow_mut().cached = Some(line);
        Ok(())
    }

    fn repaint(&mut self, win: &Window, surface: &mut Surface) -> Result<()> {
        self.shared.diagnostics.borrow_mut().repaints += 1;
        if !win.is_visible() {
            return Ok(());
        }

        let preamble = self.shared.diagnostics.borrow().preamble();
        let status = match self.data.borrow().cached.clone() {
            Some(line) => line,
            // First repaint can land before any recalc; render directly.
            None => {
                let template = self.shared.status_config.borrow().status_format.clone();
                self.render_line(&template)
            }
        };

        // Blank the whole row in the bar's style first, then draw the two
        // segments over it; anything the text does not cover stays a
        // status-styled blank through to the end of the line.
        let preamble_cols = preamble.width() as u16;
        surface.move_to(win.area.x, win.area.y);
        surface.set_style(self.theme.style(StyleRole::Status));
        surface.clear_to_eol();
        surface.set_style(self.theme.style(StyleRole::Debug));
        surface.draw_status_line(&preamble, preamble_cols.min(win.area.width));
        surface.set_style(self.theme.style(StyleRole::Status));
        surface.draw_status_line(&status, win.area.width.saturating_sub(preamble_cols));
        surface.set_style(self.theme.style(StyleRole::Normal));

        let (ts_enabled, ts_status_format, ts_icon_format) = {
            let cfg = self.shared.status_config.borrow();
            (
                cfg.ts_enabled,
                cfg.ts_status_format.clone(),
                cfg.ts_icon_format.clone(),
            )
        };
        if ts_enabled && self.chrome.supports_status_text() {
            let title = self.render_line(&ts_status_format);
            self.chrome.set_status_text(&title)?;
            let icon = self.render_line(&ts_icon_format);
            self.chrome.set_icon_text(&icon)?;
        }
        Ok(())
    }
}

impl Drop for StatusBar {
    fn drop(&mut self) {
        // Revoke before the widget data is released; a later bus dispatch
        // must never reach freed state. Must not run inside a dispatch.
        self.shared.notify.borrow_mut().unregister(self.observer);
    }
}

#[cfg(test)]
mod tests {
    use maildeck_core::config::StatusConfig;
    use maildeck_core::mailbox::Mailbox;
    use ratatui::layout::Rect;
    use ratatui::style::{Color, Modifier};

    use super::*;
    use crate::chrome::{ChromeCall, RecordingChrome};
    use crate::format::ExpandoFormatter;
    use crate::window::WindowKind;

    /// Formatter double that counts calls through to [`ExpandoFormatter`].
    struct CountingFormatter {
        calls: Rc<RefCell<usize>>,
    }

    impl StatusFormatter for CountingFormatter {
        fn render_status_line(
            &self,
            menu: &crate::state::MenuContext,
            mailbox: &Mailbox,
            template: &str,
        ) -> String {
            *self.calls.borrow_mut() += 1;
            ExpandoFormatter.render_status_line(menu, mailbox, template)
        }
    }

    struct Fixture {
        shared: Rc<SharedState>,
        bar: StatusBar,
        format_calls: Rc<RefCell<usize>>,
        chrome_calls: Rc<RefCell<Vec<ChromeCall>>>,
    }

    fn fixture(status_config: StatusConfig, chrome_supported: bool) -> Fixture {
        let mut mailbox = Mailbox::new("inbox");
        for _ in 0..3 {
            mailbox.add_message(false);
        }
        let shared = SharedState::new(mailbox, status_config);
        let view = Rc::new(RefCell::new(IndexViewState::default()));
        let format_calls = Rc::new(RefCell::new(0));
        let chrome = RecordingChrome::new(chrome_supported);
        let chrome_calls = chrome.calls();
        let bar = StatusBar::new(
            Rc::clone(&shared),
            view,
            Box::new(CountingFormatter {
                calls: Rc::clone(&format_calls),
            }),
            Box::new(chrome),
        );
        Fixture {
            shared,
            bar,
            format_calls,
            chrome_calls,
        }
    }

    fn msgs_config() -> StatusConfig {
        StatusConfig {
            status_format: "%m messages".to_string(),
            ..StatusConfig::default()
        }
    }

    fn bar_window() -> Window {
        Window::new(WindowKind::IndexBar, Rect::new(0, 0, 40, 1))
    }

    #[test]
    fn test_recalc_is_idempotent() {
        let mut fx = fixture(msgs_config(), false);

        fx.bar.recalc().unwrap();
        let first = fx.bar.data.borrow().cached.clone();
        fx.bar.recalc().unwrap();
        let second = fx.bar.data.borrow().cached.clone();

        assert_eq!(first, Some("3 messages".to_string()));
        assert_eq!(first, second);
        assert_eq!(fx.shared.diagnostics.borrow().recalcs, 2);
    }

    #[test]
    fn test_repaint_invisible_is_counted_noop() {
        let mut fx = fixture(msgs_config(), true);
        fx.shared.status_config.borrow_mut().ts_enabled = true;
        let mut win = bar_window();
        win.set_visible(false);
        let mut surface = Surface::new(40, 1);

        fx.bar.repaint(&win, &mut surface).unwrap();

        assert_eq!(fx.shared.diagnostics.borrow().repaints, 1);
        assert_eq!(*fx.format_calls.borrow(), 0);
        assert!(fx.chrome_calls.borrow().is_empty());
        assert_eq!(surface.row_text(0), "");
    }

    #[test]
    fn test_repaint_visible_draws_preamble_and_status() {
        let mut fx = fixture(msgs_config(), false);
        let win = bar_window();
        let mut surface = Surface::new(40, 1);

        fx.bar.recalc().unwrap();
        fx.bar.repaint(&win, &mut surface).unwrap();

        assert_eq!(surface.row_text(0), "(E0,C1,P1) 3 messages");
    }

    #[test]
    fn test_repaint_without_prior_recalc_still_renders() {
        let mut fx = fixture(msgs_config(), false);
        let win = bar_window();
        let mut surface = Surface::new(40, 1);

        fx.bar.repaint(&win, &mut surface).unwrap();

        assert_eq!(surface.row_text(0), "(E0,C0,P1) 3 messages");
    }

    #[test]
    fn test_repaint_brackets_styles_and_restores_normal() {
        let mut fx = fixture(msgs_config(), false);
        let win = bar_window();
        let mut surface = Surface::new(40, 1);

        fx.bar.recalc().unwrap();
        fx.bar.repaint(&win, &mut surface).unwrap();

        // Preamble cells carry the debug style, the status text and its
        // end-of-line padding carry the status style.
        assert_eq!(surface.cell_style(0, 0).unwrap().fg, Some(Color::Yellow));
        let status_cell = surface.cell_style(12, 0).unwrap();
        assert!(status_cell.add_modifier.contains(Modifier::REVERSED));
        let padding_cell = surface.cell_style(39, 0).unwrap();
        assert!(padding_cell.add_modifier.contains(Modifier::REVERSED));
        // Pen restored so sibling widgets draw with the normal style.
        assert_eq!(surface.style(), Theme::default().style(StyleRole::Normal));
    }

    #[test]
    fn test_ts_disabled_never_touches_chrome() {
        let mut fx = fixture(msgs_config(), true);
        let win = bar_window();
        let mut surface = Surface::new(40, 1);

        fx.bar.recalc().unwrap();
        fx.bar.repaint(&win, &mut surface).unwrap();

        assert!(fx.chrome_calls.borrow().is_empty());
    }

    #[test]
    fn test_ts_enabled_without_capability_never_touches_chrome() {
        let mut config = msgs_config();
        config.ts_enabled = true;
        let mut fx = fixture(config, false);
        let win = bar_window();
        let mut surface = Surface::new(40, 1);

        fx.bar.recalc().unwrap();
        fx.bar.repaint(&win, &mut surface).unwrap();

        assert!(fx.chrome_calls.borrow().is_empty());
    }

    #[test]
    fn test_ts_enabled_sets_title_and_icon_once_each() {
        let mut config = msgs_config();
        config.ts_enabled = true;
        config.ts_status_format = "title %m".to_string();
        config.ts_icon_format = "icon".to_string();
        let mut fx = fixture(config, true);
        let win = bar_window();
        let mut surface = Surface::new(40, 1);

        fx.bar.recalc().unwrap();
        fx.bar.repaint(&win, &mut surface).unwrap();

        assert_eq!(
            *fx.chrome_calls.borrow(),
            vec![
                ChromeCall::Status("title 3".to_string()),
                ChromeCall::Icon("icon".to_string())
            ]
        );
    }

    #[test]
    fn test_observer_counts_all_events_but_filters_kinds() {
        let fx = fixture(msgs_config(), false);

        fx.shared
            .notify
            .borrow_mut()
            .send(&NotifyEvent::new(NotifyKind::Mailbox))
            .unwrap();
        assert_eq!(fx.shared.diagnostics.borrow().events, 1);
        assert_eq!(fx.shared.diagnostics.borrow().recalcs, 0);
        assert_eq!(fx.bar.data.borrow().cached, None);

        fx.shared
            .notify
            .borrow_mut()
            .send(&NotifyEvent::new(NotifyKind::Index))
            .unwrap();
        assert_eq!(fx.shared.diagnostics.borrow().events, 2);
        assert_eq!(fx.shared.diagnostics.borrow().recalcs, 0);
        assert_eq!(fx.bar.data.borrow().cached, None);
    }

    #[test]
    fn test_observer_with_dead_context_errors_but_counts() {
        let diagnostics = Rc::new(RefCell::new(Diagnostics::new()));
        let data = Rc::new(RefCell::new(BarData::default()));
        let mut callback = index_observer(Rc::clone(&diagnostics), Rc::downgrade(&data));
        drop(data);

        let result = callback(&NotifyEvent::new(NotifyKind::Index));

        assert!(result.is_err());
        assert_eq!(diagnostics.borrow().events, 1);
    }

    #[test]
    fn test_drop_revokes_registration() {
        let fx = fixture(msgs_config(), false);
        assert_eq!(fx.shared.notify.borrow().observer_count(), 1);

        let shared = Rc::clone(&fx.shared);
        drop(fx.bar);

        assert_eq!(shared.notify.borrow().observer_count(), 0);
        // Later bus traffic reaches nothing and counts nothing.
        shared
            .notify
            .borrow_mut()
            .send(&NotifyEvent::new(NotifyKind::Index))
            .unwrap();
        assert_eq!(shared.diagnostics.borrow().events, 0);
    }
}
