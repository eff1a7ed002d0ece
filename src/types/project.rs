use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Priority;

/// Lifecycle state of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Backlog,
    Planned,
    Started,
    Paused,
    Completed,
    Canceled,
    Unknown,
}

impl ProjectStatus {
    fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "backlog" => ProjectStatus::Backlog,
            "planned" => ProjectStatus::Planned,
            "started" | "inprogress" | "in progress" => ProjectStatus::Started,
            "paused" => ProjectStatus::Paused,
            "completed" => ProjectStatus::Completed,
            "canceled" | "cancelled" => ProjectStatus::Canceled,
            _ => ProjectStatus::Unknown,
        }
    }

    /// Resolve the status from the custom `status` object, falling back to the
    /// legacy `state` string.
    ///
    /// Older workspaces have no `paused` status type and report paused
    /// projects as type `planned` with a status named "Paused".
    pub fn resolve(state: Option<&str>, status: Option<&StatusNode>) -> Self {
        let from_status = status.map_or(ProjectStatus::Unknown, |node| {
            let kind = node.kind.as_deref().map_or(ProjectStatus::Unknown, Self::parse);
            let name = node.name.as_deref().map_or(ProjectStatus::Unknown, Self::parse);
            match (kind, name) {
                (ProjectStatus::Planned, ProjectStatus::Paused) => ProjectStatus::Paused,
                (ProjectStatus::Unknown, name) => name,
                (kind, _) => kind,
            }
        });

        if from_status != ProjectStatus::Unknown {
            return from_status;
        }
        state.map_or(ProjectStatus::Unknown, Self::parse)
    }

    /// Whether the project counts as in progress: started, planned or paused.
    pub fn is_active(self) -> bool {
        matches!(
            self,
            ProjectStatus::Started | ProjectStatus::Planned | ProjectStatus::Paused
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            ProjectStatus::Backlog => "backlog",
            ProjectStatus::Planned => "planned",
            ProjectStatus::Started => "started",
            ProjectStatus::Paused => "paused",
            ProjectStatus::Completed => "completed",
            ProjectStatus::Canceled => "canceled",
            ProjectStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The latest update posted on a project.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectUpdate {
    pub updated_at: Option<DateTime<Utc>>,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub status: ProjectStatus,
    pub priority: Priority,
    pub update: Option<ProjectUpdate>,
}

impl Project {
    /// Timestamp of the latest update, if there is one.
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.update.as_ref().and_then(|u| u.updated_at)
    }
}

/// Project node as returned by the projects query.
#[derive(Deserialize, Debug)]
pub struct ProjectNode {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub status: Option<StatusNode>,
    #[serde(rename = "lastUpdate", default)]
    pub last_update: Option<UpdateNode>,
}

#[derive(Deserialize, Debug)]
pub struct StatusNode {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct UpdateNode {
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

impl From<UpdateNode> for ProjectUpdate {
    fn from(node: UpdateNode) -> Self {
        let updated_at = node
            .updated_at
            .as_deref()
            .or(node.created_at.as_deref())
            .and_then(|s| s.parse::<DateTime<Utc>>().ok());

        Self {
            updated_at,
            body: node.body.unwrap_or_default(),
        }
    }
}

impl From<ProjectNode> for Project {
    fn from(node: ProjectNode) -> Self {
        Self {
            status: ProjectStatus::resolve(node.state.as_deref(), node.status.as_ref()),
            id: node.id,
            name: node.name,
            priority: node.priority,
            update: node.last_update.map(ProjectUpdate::from),
        }
    }
}
