use std::path::PathBuf;
use thiserror::Error;

/// Failures while resolving or writing local configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "No API key found. Either:\n  1. Set the environment variable: export {env_var}='your_api_key_here'\n  2. Create a config file at {} containing your API key",
        .path.display()
    )]
    MissingApiKey { env_var: &'static str, path: PathBuf },

    #[error("Could not determine home directory")]
    NoHomeDir,

    #[error("Failed to read config file at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write config file at {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read input: {0}")]
    Prompt(#[source] std::io::Error),

    #[error("Invalid API endpoint: {0}")]
    InvalidEndpoint(String),
}

/// Failures talking to the Linear API.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error (status {status}): {body}")]
    Status { status: u16, body: String },

    #[error("GraphQL error: {message}{}", additional_suffix(.additional))]
    GraphQl { message: String, additional: usize },

    #[error("Unexpected response format: {0}")]
    MalformedResponse(String),
}

fn additional_suffix(additional: &usize) -> String {
    match *additional {
        0 => String::new(),
        1 => " (and 1 more error)".to_string(),
        n => format!(" (and {n} more errors)"),
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
