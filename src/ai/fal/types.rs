//! fal.ai text-to-image payloads.

use serde::{Deserialize, Serialize};

/// Model input for text-to-image endpoints.
#[derive(Debug, Serialize)]
pub struct TextToImageRequest {
    pub prompt: String,
}

/// Result of a synchronous model run.
#[derive(Debug, Deserialize)]
pub struct TextToImageResponse {
    #[serde(default)]
    pub images: Vec<GeneratedImage>,
}

/// One rendered image hosted by fal.
#[derive(Debug, Deserialize)]
pub struct GeneratedImage {
    pub url: Option<String>,
}
