//! Story orchestration: write the story once, then illustrate every page
//! concurrently.

use crate::ai::{
    stock_photo_url, FalImageClient, ImageGenerationService, OpenAiStoryClient, StoryService,
};
use crate::config::Config;
use crate::models::Story;
use crate::{Error, Result};
use futures_util::future::join_all;
use std::sync::Arc;
use tracing::{error, info, Instrument};
use uuid::Uuid;

/// Prompt used by the illustration self-test.
pub const TEST_ILLUSTRATION_PROMPT: &str =
    "A magical forest with glowing mushrooms and fairy lights";

/// Provider credentials as seen by the running process.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub openai_api_key: Option<String>,
    pub fal_key: Option<String>,
}

impl Credentials {
    pub fn new(openai_api_key: Option<String>, fal_key: Option<String>) -> Self {
        Self {
            openai_api_key,
            fal_key,
        }
    }

    fn require_openai(&self) -> Result<()> {
        match self.openai_api_key.as_deref() {
            Some(key) if !key.is_empty() => Ok(()),
            _ => Err(Error::NotConfigured("OpenAI API key")),
        }
    }

    fn require_fal(&self) -> Result<()> {
        match self.fal_key.as_deref() {
            Some(key) if !key.is_empty() => Ok(()),
            _ => Err(Error::NotConfigured("Fal AI key")),
        }
    }
}

/// Coordinates story writing and page illustration for one request at a time.
pub struct App {
    story: Arc<dyn StoryService>,
    image_gen: Arc<dyn ImageGenerationService>,
    credentials: Credentials,
}

/// Injectable service bundle used to construct [`App`] in tests/harnesses.
pub struct AppServices {
    pub story: Arc<dyn StoryService>,
    pub image_gen: Arc<dyn ImageGenerationService>,
}

impl App {
    /// Build an app from concrete service dependencies.
    pub fn with_services(services: AppServices, credentials: Credentials) -> Self {
        Self {
            story: services.story,
            image_gen: services.image_gen,
            credentials,
        }
    }

    /// Construct the provider clients described by `config`.
    ///
    /// Missing keys do not fail here; requests report them instead.
    pub fn from_config(config: &Config) -> Self {
        // Reuse one HTTP connection pool across provider clients.
        let http_client = reqwest::Client::new();

        info!("Story provider: OpenAI (model: {})", config.story_model);
        let story = OpenAiStoryClient::new_with_client(
            config.openai_api_key.clone().unwrap_or_default(),
            config.story_model.clone(),
            config.openai_timeout,
            http_client.clone(),
        )
        .with_base_url(config.openai_base_url.clone());

        info!(
            "Image provider: fal (models: {}, then {})",
            config.fal_primary_model, config.fal_alternate_model
        );
        let image_gen = FalImageClient::new_with_client(
            config.fal_key.clone().unwrap_or_default(),
            config.fal_primary_model.clone(),
            config.fal_alternate_model.clone(),
            config.fal_timeout,
            http_client,
        )
        .with_base_url(config.fal_base_url.clone());

        Self::with_services(
            AppServices {
                story: Arc::new(story),
                image_gen: Arc::new(image_gen),
            },
            Credentials::new(config.openai_api_key.clone(), config.fal_key.clone()),
        )
    }

    /// Validate the request, write the story and illustrate every page.
    ///
    /// Validation and configuration problems are reported before any provider
    /// is called. Illustration problems never fail the request.
    pub async fn generate_story(&self, prompt: Option<&str>) -> Result<Story> {
        let prompt = prompt
            .filter(|prompt| !prompt.is_empty())
            .ok_or(Error::MissingPrompt)?;
        self.credentials.require_openai()?;
        self.credentials.require_fal()?;

        let request_id = Uuid::new_v4();
        let span = tracing::info_span!("story", %request_id);

        async move {
            info!("Generating story for prompt: {}", prompt);
            let skeleton = self.story.generate_story(prompt).await?;
            let story = self.illustrate(skeleton).await;
            info!("Story \"{}\" ready with {} pages", story.title, story.pages.len());
            Ok(story)
        }
        .instrument(span)
        .await
    }

    /// Attach an image URL to every page, in page order.
    pub async fn illustrate(&self, mut story: Story) -> Story {
        let tasks = story.pages.iter().map(|page| {
            let image_gen = Arc::clone(&self.image_gen);
            let image_prompt = page.image_prompt.clone();
            tokio::spawn(
                async move { image_gen.generate_image(&image_prompt).await }
                    .in_current_span(),
            )
        });

        let results = join_all(tasks).await;

        for (page, result) in story.pages.iter_mut().zip(results) {
            let url = match result {
                Ok(Ok(url)) if !url.is_empty() => url,
                Ok(Ok(_)) => {
                    error!("Empty image URL for page {}", page.page_number);
                    stock_photo_url(&page.image_prompt)
                }
                Ok(Err(e)) => {
                    error!("Error generating image for page {}: {}", page.page_number, e);
                    stock_photo_url(&page.image_prompt)
                }
                Err(e) => {
                    error!("Image task for page {} aborted: {}", page.page_number, e);
                    stock_photo_url(&page.image_prompt)
                }
            };
            page.image_url = Some(url);
        }

        story
    }

    /// Illustrate a fixed prompt to check the image provider end to end.
    pub async fn test_illustration(&self) -> Result<String> {
        self.credentials.require_fal()?;

        info!("Testing fal image generation...");
        self.image_gen
            .generate_image(TEST_ILLUSTRATION_PROMPT)
            .await
            .map_err(|e| {
                error!("fal test failed: {}", e);
                e
            })
    }
}
