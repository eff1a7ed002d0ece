use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::types::{Priority, Project, ProjectStatus};

/// Body shown for a project with no update, or an update with no text.
pub const NO_UPDATE_PLACEHOLDER: &str = "No update text available";

/// Header shown in place of a timestamp when a project was never updated.
const NEVER_UPDATED: &str = "never";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Markdown,
    Json,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FormatOptions {
    pub include_updated: bool,
    pub bold_headers: bool,
}

/// Render projects as Markdown blocks separated by a blank line.
///
/// Returns an empty string for an empty list, otherwise the text ends with a newline.
pub fn render_markdown(projects: &[Project], options: &FormatOptions) -> String {
    if projects.is_empty() {
        return String::new();
    }

    let blocks: Vec<String> = projects
        .iter()
        .map(|project| format!("{}\n{}", header(project, options), body(project)))
        .collect();

    format!("{}\n", blocks.join("\n\n"))
}

/// Header line for a project: `## name` or `**name**`, optionally with its timestamp.
pub fn header(project: &Project, options: &FormatOptions) -> String {
    let title = if options.include_updated {
        let stamp = project
            .updated_at()
            .map(format_timestamp)
            .unwrap_or_else(|| NEVER_UPDATED.to_string());
        format!("{} ({stamp})", project.name)
    } else {
        project.name.clone()
    };

    if options.bold_headers {
        format!("**{title}**")
    } else {
        format!("## {title}")
    }
}

fn body(project: &Project) -> &str {
    project
        .update
        .as_ref()
        .map(|u| u.body.trim())
        .filter(|b| !b.is_empty())
        .unwrap_or(NO_UPDATE_PLACEHOLDER)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectJson<'a> {
    id: &'a str,
    name: &'a str,
    status: ProjectStatus,
    priority: Priority,
    priority_label: &'static str,
    updated_at: Option<String>,
    body: Option<&'a str>,
}

impl<'a> From<&'a Project> for ProjectJson<'a> {
    fn from(project: &'a Project) -> Self {
        Self {
            id: &project.id,
            name: &project.name,
            status: project.status,
            priority: project.priority,
            priority_label: project.priority.label(),
            updated_at: project.updated_at().map(|t| t.to_rfc3339()),
            body: project.update.as_ref().map(|u| u.body.as_str()),
        }
    }
}

/// Render projects as a pretty-printed JSON array for scripting.
pub fn render_json(projects: &[Project]) -> serde_json::Result<String> {
    let rows: Vec<ProjectJson> = projects.iter().map(ProjectJson::from).collect();
    serde_json::to_string_pretty(&rows).map(|json| format!("{json}\n"))
}

/// Format a timestamp as `YYYY-MM-DD HH:MM:SS` in UTC.
pub fn format_timestamp(dt: DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Truncate a string with ellipsis, counting characters rather than bytes.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
