//! GraphQL response shapes for the project updates query.

use serde::Deserialize;

use crate::types::ProjectNode;

/// Connection wrapper Linear uses for list fields.
#[derive(Deserialize)]
pub struct Connection<T> {
    pub nodes: Vec<T>,
}

/// `data` payload of the projects query. `projects` is required.
#[derive(Deserialize)]
pub struct ProjectsResponse {
    pub projects: Connection<ProjectNode>,
}
