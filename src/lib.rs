//! MovePump project watcher
//!
//! One invocation performs a single pass: fetch the MovePump ranking list,
//! keep projects whose buy progress is above the threshold and that were
//! never announced, send one Telegram message per project and persist the
//! set of announced project names. Scheduling is left to cron or a timer.

pub mod arguments;
pub mod config;
pub mod errors;
pub mod filtering;
pub mod logger;
pub mod notifications;
pub mod paths;
pub mod ranking;
pub mod run;
pub mod state;

#[cfg(test)]
mod test_support;
