//! Project filter - selects projects worth announcing
//!
//! A project qualifies when its buy progress is strictly above the
//! threshold and its name is not in the seen-set. Upstream order is kept.

use crate::logger::{self, LogTag};
use crate::ranking::{Project, RankingPayload};
use crate::state::SeenSet;
use std::collections::HashSet;

/// Return the new projects from `payload`, in upstream order
///
/// An absent payload or one without a `data` list yields an empty result and
/// a warning. A name repeated within one payload is returned once.
pub fn filter_new_projects(
    payload: Option<&RankingPayload>,
    seen: &SeenSet,
    threshold: f64,
) -> Vec<Project> {
    let projects = match payload.and_then(|p| p.projects()) {
        Some(projects) => projects,
        None => {
            logger::warning(LogTag::Filter, "No valid data in ranking payload");
            return Vec::new();
        }
    };

    let total = projects.len();
    let mut batch_names = HashSet::new();
    let selected: Vec<Project> = projects
        .into_iter()
        .filter(|p| p.progress() > threshold)
        .filter(|p| !seen.contains(&p.token_name))
        .filter(|p| batch_names.insert(p.token_name.clone()))
        .collect();

    logger::debug(
        LogTag::Filter,
        &format!(
            "{} of {} projects above {:.2}% and not yet seen",
            selected.len(),
            total,
            threshold
        ),
    );

    selected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(name: &str, progress: Option<f64>) -> Project {
        let mut p = Project::named(name);
        p.progress_buy = progress;
        p
    }

    fn names(projects: &[Project]) -> Vec<&str> {
        projects.iter().map(|p| p.token_name.as_str()).collect()
    }

    #[test]
    fn test_threshold_is_strict() {
        let payload = RankingPayload::from_projects(&[
            project("AT", Some(80.0)),
            project("ABOVE", Some(80.01)),
            project("BELOW", Some(79.99)),
        ]);

        let selected = filter_new_projects(Some(&payload), &SeenSet::new(), 80.0);
        assert_eq!(names(&selected), vec!["ABOVE"]);
    }

    #[test]
    fn test_missing_progress_counts_as_zero() {
        let payload =
            RankingPayload::from_projects(&[project("NONE", None), project("HIGH", Some(95.0))]);

        let selected = filter_new_projects(Some(&payload), &SeenSet::new(), 0.0);
        assert_eq!(names(&selected), vec!["HIGH"]);
    }

    #[test]
    fn test_seen_projects_are_excluded() {
        let payload = RankingPayload::from_projects(&[
            project("OLD", Some(99.0)),
            project("NEW", Some(99.0)),
        ]);
        let mut seen = SeenSet::new();
        seen.insert("OLD");

        let selected = filter_new_projects(Some(&payload), &seen, 80.0);
        assert_eq!(names(&selected), vec!["NEW"]);
    }

    #[test]
    fn test_upstream_order_is_kept() {
        let payload = RankingPayload::from_projects(&[
            project("C", Some(81.0)),
            project("A", Some(99.0)),
            project("B", Some(90.0)),
        ]);

        let selected = filter_new_projects(Some(&payload), &SeenSet::new(), 80.0);
        assert_eq!(names(&selected), vec!["C", "A", "B"]);
    }

    #[test]
    fn test_duplicate_names_reported_once() {
        let payload = RankingPayload::from_projects(&[
            project("DUP", Some(85.0)),
            project("DUP", Some(95.0)),
        ]);

        let selected = filter_new_projects(Some(&payload), &SeenSet::new(), 80.0);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].progress_buy, Some(85.0));
    }

    #[test]
    fn test_absent_or_malformed_payload() {
        assert!(filter_new_projects(None, &SeenSet::new(), 80.0).is_empty());

        let no_data = RankingPayload::default();
        assert!(filter_new_projects(Some(&no_data), &SeenSet::new(), 80.0).is_empty());
    }

    #[test]
    fn test_configurable_threshold() {
        let payload = RankingPayload::from_projects(&[project("MID", Some(60.0))]);

        assert!(filter_new_projects(Some(&payload), &SeenSet::new(), 80.0).is_empty());
        assert_eq!(
            filter_new_projects(Some(&payload), &SeenSet::new(), 50.0).len(),
            1
        );
    }
}
