use std::time::Duration;

use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use url::Url;

use crate::config::Config;
use crate::error::ApiError;
use crate::output::truncate;

pub const API_ENDPOINT: &str = "https://api.linear.app/graphql";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const ERROR_BODY_LIMIT: usize = 500;

pub struct LinearClient {
    http: Client,
    endpoint: Url,
    api_key: String,
}

#[derive(Serialize)]
struct GraphQLRequest<'a> {
    query: &'a str,
    variables: serde_json::Value,
}

#[derive(Deserialize)]
struct GraphQLResponse {
    data: Option<serde_json::Value>,
    errors: Option<Vec<GraphQLError>>,
}

#[derive(Deserialize, Debug)]
struct GraphQLError {
    #[serde(default)]
    message: String,
}

impl LinearClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint().clone(),
            api_key: config.api_key().to_string(),
        })
    }

    /// Send one GraphQL request and decode its `data` payload into `T`.
    pub async fn query<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T, ApiError> {
        let request = GraphQLRequest { query, variables };

        tracing::debug!(endpoint = %self.endpoint, "sending GraphQL request");

        let response = self
            .http
            .post(self.endpoint.clone())
            .header("Authorization", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        tracing::debug!(status = status.as_u16(), bytes = body.len(), "received response");

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: truncate(body.trim(), ERROR_BODY_LIMIT),
            });
        }

        decode_response(&body)
    }
}

/// Decode a successful HTTP body: GraphQL errors first, then the typed `data`.
fn decode_response<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    let response: GraphQLResponse = serde_json::from_str(body)
        .map_err(|e| ApiError::MalformedResponse(format!("invalid JSON: {e}")))?;

    if let Some(errors) = response.errors.filter(|errors| !errors.is_empty()) {
        let additional = errors.len() - 1;
        let message = errors
            .into_iter()
            .next()
            .map(|e| e.message)
            .unwrap_or_default();
        return Err(ApiError::GraphQl {
            message,
            additional,
        });
    }

    let data = response
        .data
        .filter(|data| !data.is_null())
        .ok_or_else(|| ApiError::MalformedResponse("missing `data`".to_string()))?;

    serde_json::from_value(data).map_err(|e| ApiError::MalformedResponse(e.to_string()))
}
