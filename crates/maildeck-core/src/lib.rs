//! Core maildeck library (config, mailbox model, notification bus).

pub mod config;
pub mod logging;
pub mod mailbox;
pub mod notify;
