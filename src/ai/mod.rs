//! AI service integration for story writing and illustration
//!
//! Provides the service traits the orchestrator depends on, with OpenAI chat
//! completions writing stories and fal.ai models drawing the pages.

pub mod fal;
pub mod fallback;
pub mod mock;
pub mod openai;

pub use fal::FalImageClient;
pub use fallback::stock_photo_url;
pub use mock::{MockImageGenerationClient, MockStoryClient};
pub use openai::OpenAiStoryClient;

use crate::models::Story;
use crate::Result;
use async_trait::async_trait;

/// Writes a story skeleton: pages carry text and illustration prompts but no
/// image URLs.
#[async_trait]
pub trait StoryService: Send + Sync {
    async fn generate_story(&self, prompt: &str) -> Result<Story>;
}

/// Turns one illustration prompt into an image URL.
#[async_trait]
pub trait ImageGenerationService: Send + Sync {
    async fn generate_image(&self, prompt: &str) -> Result<String>;
}
