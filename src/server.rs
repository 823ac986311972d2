//! HTTP surface consumed by the storybook viewer.

use crate::app::App;
use crate::models::{GenerateStoryRequest, Story};
use crate::{Error, Result};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the service router around a shared [`App`].
pub fn router(app: Arc<App>) -> Router {
    Router::new()
        .route("/api/generate-story", post(generate_story))
        .route("/api/test-fal", get(test_fal))
        .route("/health", get(health_check))
        .with_state(app)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}

async fn generate_story(State(app): State<Arc<App>>, body: Bytes) -> Result<Json<Story>> {
    // Parsed by hand so a missing content type is not a rejection.
    let request = GenerateStoryRequest::from_body(&body)?;

    let story = app.generate_story(request.prompt.as_deref()).await?;
    Ok(Json(story))
}

async fn test_fal(State(app): State<Arc<App>>) -> Response {
    match app.test_illustration().await {
        Ok(image_url) => Json(json!({
            "success": true,
            "imageUrl": image_url,
            "message": "Fal AI image generation test successful",
        }))
        .into_response(),
        Err(e @ Error::NotConfigured(_)) => e.into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "Fal AI test failed",
                "details": e.to_string(),
            })),
        )
            .into_response(),
    }
}
