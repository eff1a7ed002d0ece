//! Filter and sort stages applied to the fetched projects.

use chrono::{DateTime, Duration, Utc};

use crate::types::Project;

#[derive(Debug, Clone, Copy, Default)]
pub struct FilterOptions {
    /// Keep only started, planned and paused projects.
    pub in_progress_only: bool,
    /// Keep only projects updated within this many weeks.
    pub weeks_back: Option<u32>,
}

/// Apply the active filters conjunctively. `now` anchors the recency window.
pub fn filter(
    projects: Vec<Project>,
    options: &FilterOptions,
    now: DateTime<Utc>,
) -> Vec<Project> {
    // A window reaching past the earliest representable date keeps every dated update.
    let cutoff = options.weeks_back.map(|weeks| {
        now.checked_sub_signed(Duration::days(i64::from(weeks) * 7))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    });

    projects
        .into_iter()
        .filter(|project| !options.in_progress_only || project.status.is_active())
        .filter(|project| match cutoff {
            None => true,
            Some(cutoff) => project.updated_at().is_some_and(|t| t >= cutoff),
        })
        .collect()
}

/// Order by priority, urgent first and unprioritized last.
///
/// The sort is stable so equal priorities keep the API response order.
pub fn sort(projects: &mut [Project]) {
    projects.sort_by_key(|project| project.priority.rank());
}
