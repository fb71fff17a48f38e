//! Status line formatting.
//!
//! The status bar renders through the [`StatusFormatter`] seam so the format
//! mini-language can evolve (or be swapped out) without touching widget
//! code. [`ExpandoFormatter`] implements the small `%`-expando set the
//! default templates use; anything it does not recognize passes through
//! verbatim.

use maildeck_core::mailbox::Mailbox;

use crate::state::MenuContext;

/// Renders a status line template against the current menu and mailbox.
pub trait StatusFormatter {
    fn render_status_line(&self, menu: &MenuContext, mailbox: &Mailbox, template: &str) -> String;
}

/// Default formatter.
///
/// Supported expandos:
/// - `%f` mailbox name
/// - `%m` message count
/// - `%n` unread count
/// - `%F` flagged count
/// - `%p` menu position as `current/entries`
/// - `%r` mailbox mode marker (`%` when read-only, `-` otherwise)
/// - `%%` literal percent
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpandoFormatter;

impl StatusFormatter for ExpandoFormatter {
    fn render_status_line(&self, menu: &MenuContext, mailbox: &Mailbox, template: &str) -> String {
        let mut out = String::with_capacity(template.len());
        let mut chars = template.chars();
        while let Some(ch) = chars.next() {
            if ch != '%' {
                out.push(ch);
                continue;
            }
            match chars.next() {
                Some('f') => out.push_str(&mailbox.name),
                Some('m') => out.push_str(&mailbox.msg_count.to_string()),
                Some('n') => out.push_str(&mailbox.new_count.to_string()),
                Some('F') => out.push_str(&mailbox.flagged_count.to_string()),
                Some('p') => {
                    let current = if menu.entries == 0 {
                        0
                    } else {
                        menu.current + 1
                    };
                    out.push_str(&format!("{current}/{}", menu.entries));
                }
                Some('r') => out.push_str(mailbox.mode_marker()),
                Some('%') => out.push('%'),
                // Unknown expando: keep it visible rather than guessing.
                Some(other) => {
                    out.push('%');
                    out.push(other);
                }
                None => out.push('%'),
            }
        }
        out
    }
}
