//! Error handling and custom error types
//!
//! Provides unified error handling across the service using thiserror, and
//! maps errors onto the HTTP responses the storybook viewer expects.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Message returned to callers for any failure that is not a validation or
/// configuration problem.
pub const GENERIC_FAILURE: &str = "Failed to generate story";

#[derive(Error, Debug)]
pub enum Error {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("AI provider error: {0}")]
    AiProvider(String),

    #[error("Story generation error: {0}")]
    StoryGeneration(String),

    #[error("Prompt is required")]
    MissingPrompt,

    #[error("{0} not configured")]
    NotConfigured(&'static str),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Error::MissingPrompt => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to the caller. Provider details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            Error::MissingPrompt | Error::NotConfigured(_) => self.to_string(),
            _ => GENERIC_FAILURE.to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        if !matches!(self, Error::MissingPrompt | Error::NotConfigured(_)) {
            tracing::error!(error = %self, "Error generating story");
        }

        (self.status(), Json(json!({ "error": self.public_message() }))).into_response()
    }
}
