//! Single watcher pass
//!
//! ```text
//! LOAD_STATE → FETCH ─(no data)──────────────→ END
//!                └→ FILTER ─(nothing new)─────→ END
//!                     └→ for each: LOG → NOTIFY → MARK_SEEN
//!                          └→ SAVE_STATE → END
//! ```
//!
//! The seen-set is loaded once, threaded through the notify loop by value
//! and saved once after the loop. A crash inside the loop therefore loses
//! the marks of that run and may repeat those notifications next time.

use crate::config::Config;
use crate::errors::RunError;
use crate::filtering::filter_new_projects;
use crate::logger::{self, LogTag};
use crate::notifications::{format_project_message, MessageSink};
use crate::paths;
use crate::ranking::{Project, RankingSource};
use crate::state::SeenSet;
use std::path::{Path, PathBuf};

/// Everything a pass needs besides its I/O endpoints
#[derive(Debug, Clone)]
pub struct RunContext {
    pub state_path: PathBuf,
    pub threshold: f64,
    pub mark_seen_on_failure: bool,
    pub detail_url_base: String,
}

impl RunContext {
    pub fn from_config(config: &Config, data_dir: Option<&Path>) -> Self {
        Self {
            state_path: paths::resolve(data_dir, &config.state.path),
            threshold: config.filter.progress_threshold,
            mark_seen_on_failure: config.notifications.mark_seen_on_failure,
            detail_url_base: config.notifications.detail_url_base.clone(),
        }
    }
}

/// How a pass ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunReport {
    /// Fetch failed; state untouched
    NoData { reason: String },
    /// Nothing above threshold that was not already announced
    NothingNew,
    Processed {
        notified: usize,
        failed: usize,
        seen_total: usize,
    },
}

impl RunReport {
    /// Closing line for the run log
    ///
    /// `NoData` has none: the fetch failure was already logged where it
    /// happened.
    pub fn summary(&self) -> Option<String> {
        match self {
            RunReport::NoData { .. } => None,
            RunReport::NothingNew => Some("Run complete, nothing new to announce".to_string()),
            RunReport::Processed {
                notified,
                failed,
                seen_total,
            } => Some(format!(
                "Run complete: {} sent, {} failed, {} projects tracked",
                notified, failed, seen_total
            )),
        }
    }
}

/// Delivery counts for one notify loop
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryTally {
    pub notified: usize,
    pub failed: usize,
}

/// Run one load → fetch → filter → notify → save pass
pub async fn run_once(
    ctx: &RunContext,
    source: &dyn RankingSource,
    sink: &dyn MessageSink,
) -> Result<RunReport, RunError> {
    let seen = SeenSet::load(&ctx.state_path)?;
    logger::info(
        LogTag::State,
        &format!("Loaded {} previously announced projects", seen.len()),
    );

    let payload = match source.fetch().await {
        Ok(payload) => payload,
        Err(e) => {
            logger::error(
                LogTag::Fetcher,
                &format!("Ranking fetch failed ({}): {}", e.kind(), e),
            );
            return Ok(RunReport::NoData {
                reason: e.to_string(),
            });
        }
    };

    let new_projects = filter_new_projects(Some(&payload), &seen, ctx.threshold);
    if new_projects.is_empty() {
        logger::info(LogTag::Filter, "No new projects above threshold");
        return Ok(RunReport::NothingNew);
    }

    logger::info(
        LogTag::Filter,
        &format!("Found {} new projects", new_projects.len()),
    );

    let (seen, tally) = notify_projects(ctx, &new_projects, seen, sink).await;

    seen.save(&ctx.state_path)?;
    logger::info(
        LogTag::State,
        &format!(
            "Saved seen-set ({} projects) to '{}'",
            seen.len(),
            ctx.state_path.display()
        ),
    );

    Ok(RunReport::Processed {
        notified: tally.notified,
        failed: tally.failed,
        seen_total: seen.len(),
    })
}

/// Announce each project and return the updated seen-set
///
/// Delivery failures are logged and counted, never propagated.
pub async fn notify_projects(
    ctx: &RunContext,
    projects: &[Project],
    mut seen: SeenSet,
    sink: &dyn MessageSink,
) -> (SeenSet, DeliveryTally) {
    let mut tally = DeliveryTally::default();

    for project in projects {
        match serde_json::to_string_pretty(project) {
            Ok(json) => logger::info(LogTag::Filter, &json),
            Err(_) => logger::info(LogTag::Filter, &project.token_name),
        }

        let message = format_project_message(project, &ctx.detail_url_base);
        let delivered = match sink.deliver(&message).await {
            Ok(()) => {
                logger::info(
                    LogTag::Notifier,
                    &format!("Telegram message sent for '{}'", project.token_name),
                );
                tally.notified += 1;
                true
            }
            Err(e) => {
                logger::error(
                    LogTag::Notifier,
                    &format!(
                        "Telegram message for '{}' failed: {}",
                        project.token_name, e
                    ),
                );
                tally.failed += 1;
                false
            }
        };

        if delivered || ctx.mark_seen_on_failure {
            seen.insert(project.token_name.clone());
        }
    }

    (seen, tally)
}
