//! Operator notifications
//!
//! `format` turns a project into an HTML message, `telegram` delivers it.

pub mod format;
pub mod telegram;

pub use format::{format_project_message, DEFAULT_DETAIL_URL_BASE, PLACEHOLDER};
pub use telegram::{MessageSink, TelegramNotifier};
