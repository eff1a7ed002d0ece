mod priority;
mod project;

pub use priority::Priority;
pub use project::{Project, ProjectNode, ProjectStatus};

#[cfg(test)]
pub use project::ProjectUpdate;
