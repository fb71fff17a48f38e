//! Mailbox state shared across views.
//!
//! This is the application-level data the status bar renders: message counts
//! and the open/read-only state of the current mailbox. Other components
//! mutate it through the main event loop; widgets read it during repaint.

/// State of the currently open mailbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mailbox {
    /// Display name (usually the folder path).
    pub name: String,
    /// Total number of messages.
    pub msg_count: usize,
    /// Number of unread messages.
    pub new_count: usize,
    /// Number of flagged messages.
    pub flagged_count: usize,
    /// Whether the mailbox was opened read-only.
    pub read_only: bool,
}

impl Mailbox {
    /// Creates an empty mailbox with the given display name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            msg_count: 0,
            new_count: 0,
            flagged_count: 0,
            read_only: false,
        }
    }

    /// Records a newly arrived message.
    pub fn add_message(&mut self, unread: bool) {
        self.msg_count += 1;
        if unread {
            self.new_count += 1;
        }
    }

    /// Marks one unread message as read.
    pub fn mark_read(&mut self) {
        self.new_count = self.new_count.saturating_sub(1);
    }

    /// Marker shown in the status line when the mailbox is read-only.
    pub fn mode_marker(&self) -> &'static str {
        if self.read_only { "%" } else { "-" }
    }
}
