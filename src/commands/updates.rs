use std::io::Write;

use chrono::Utc;
use serde_json::json;

use crate::cli::UpdatesArgs;
use crate::client::LinearClient;
use crate::error::{ApiError, Result};
use crate::output::{self, OutputFormat};
use crate::pipeline;
use crate::responses::ProjectsResponse;
use crate::types::Project;

const PROJECT_UPDATES_QUERY: &str = r#"
query ProjectUpdates {
    projects(first: 250) {
        nodes {
            id
            name
            state
            priority
            status {
                name
                type
            }
            lastUpdate {
                id
                createdAt
                updatedAt
                body
            }
        }
    }
}
"#;

/// Fetch every project along with its most recent update.
pub async fn fetch_projects(client: &LinearClient) -> std::result::Result<Vec<Project>, ApiError> {
    let response: ProjectsResponse = client.query(PROJECT_UPDATES_QUERY, json!({})).await?;

    tracing::debug!(count = response.projects.nodes.len(), "fetched projects");

    Ok(response
        .projects
        .nodes
        .into_iter()
        .map(Project::from)
        .collect())
}

/// Fetch, filter, sort and render project updates into `out`.
///
/// Output is rendered in full before anything is written, so a failure leaves `out` untouched.
pub async fn run(
    client: &LinearClient,
    args: &UpdatesArgs,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    let projects = fetch_projects(client).await?;

    let filter = args.filter_options();
    let mut projects = pipeline::filter(projects, &filter, Utc::now());
    pipeline::sort(&mut projects);

    tracing::debug!(
        retained = projects.len(),
        in_progress_only = filter.in_progress_only,
        weeks_back = ?filter.weeks_back,
        "filtered projects"
    );

    let rendered = match format {
        OutputFormat::Markdown => output::render_markdown(&projects, &args.format_options()),
        OutputFormat::Json => output::render_json(&projects).map_err(std::io::Error::from)?,
    };

    out.write_all(rendered.as_bytes())?;
    out.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::config::Config;
    use crate::error::Error;
    use crate::test_support::serve_once;

    fn days_ago(days: i64) -> String {
        (Utc::now() - Duration::days(days)).to_rfc3339()
    }

    fn fixture() -> String {
        json!({
            "data": {
                "projects": {
                    "nodes": [
                        {
                            "id": "c",
                            "name": "Charlie",
                            "state": "planned",
                            "priority": 0,
                            "status": { "name": "Paused", "type": "paused" },
                            "lastUpdate": { "updatedAt": days_ago(20), "body": "Waiting on vendor" }
                        },
                        {
                            "id": "b",
                            "name": "Bravo",
                            "state": "backlog",
                            "priority": 2,
                            "status": { "name": "Backlog", "type": "backlog" },
                            "lastUpdate": { "updatedAt": days_ago(1), "body": "Scoping" }
                        },
                        {
                            "id": "a",
                            "name": "Alpha",
                            "state": "started",
                            "priority": 1,
                            "status": { "name": "In Progress", "type": "started" },
                            "lastUpdate": { "updatedAt": days_ago(3), "body": "On track" }
                        }
                    ]
                }
            }
        })
        .to_string()
    }

    async fn run_against(
        status: u16,
        body: &str,
        args: UpdatesArgs,
        format: OutputFormat,
    ) -> (Result<()>, String) {
        let server = serve_once(status, body);
        let client = LinearClient::new(&Config::new("key", server.url.clone())).unwrap();
        let mut out = Vec::new();
        let result = run(&client, &args, format, &mut out).await;
        (result, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn test_in_progress_recent_scenario() {
        let args = UpdatesArgs {
            in_progress_only: true,
            weeks_back: Some(2),
            ..Default::default()
        };
        let (result, out) = run_against(200, &fixture(), args, OutputFormat::Markdown).await;
        result.unwrap();
        assert_eq!(out, "## Alpha\nOn track\n");
    }

    #[tokio::test]
    async fn test_unfiltered_sorted_by_priority() {
        let (result, out) =
            run_against(200, &fixture(), UpdatesArgs::default(), OutputFormat::Markdown).await;
        result.unwrap();
        assert_eq!(
            out,
            "## Alpha\nOn track\n\n## Bravo\nScoping\n\n## Charlie\nWaiting on vendor\n"
        );
    }

    #[tokio::test]
    async fn test_json_output() {
        let (result, out) =
            run_against(200, &fixture(), UpdatesArgs::default(), OutputFormat::Json).await;
        result.unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        let names: Vec<&str> = value
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Alpha", "Bravo", "Charlie"]);
    }

    #[tokio::test]
    async fn test_unauthorized_writes_nothing() {
        let (result, out) = run_against(
            401,
            r#"{"errors":[{"message":"Authentication required, not authenticated"}]}"#,
            UpdatesArgs::default(),
            OutputFormat::Markdown,
        )
        .await;
        let err = result.unwrap_err();
        assert!(matches!(err, Error::Api(ApiError::Status { status: 401, .. })));
        assert!(err.to_string().contains("401"));
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_graphql_error_surfaces_message() {
        let (result, out) = run_against(
            200,
            r#"{"errors":[{"message":"Query too complex"}],"data":null}"#,
            UpdatesArgs::default(),
            OutputFormat::Markdown,
        )
        .await;
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Query too complex"));
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_missing_projects_is_fatal() {
        let (result, out) = run_against(
            200,
            r#"{"data":{"teams":{"nodes":[]}}}"#,
            UpdatesArgs::default(),
            OutputFormat::Markdown,
        )
        .await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Api(ApiError::MalformedResponse(_))
        ));
        assert!(out.is_empty());
    }
}
