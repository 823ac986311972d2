//! Story writing over OpenAI chat completions.
//!
//! The model is asked for a JSON document and its reply is scanned for the
//! outermost brace-delimited object, since models sometimes wrap JSON in prose
//! or code fences.

use super::client::OpenAiHttpClient;
use super::types::{ChatCompletionRequest, ChatMessage};
use crate::ai::StoryService;
use crate::error::GENERIC_FAILURE;
use crate::models::{Story, StoryPage};
use crate::{prompts, Error, Result};
use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;
use std::time::Duration;

const TEMPERATURE: f32 = 0.8;
const MAX_TOKENS: u32 = 2000;

/// First `{` through the last `}` in the reply.
static JSON_OBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("JSON object pattern is valid"));

/// Story document as written by the model. The user prompt is attached
/// afterwards, not trusted from model output.
#[derive(Debug, Deserialize)]
struct StoryDraft {
    title: String,
    pages: Vec<StoryPage>,
}

pub struct OpenAiStoryClient {
    http: OpenAiHttpClient,
    model: String,
}

impl OpenAiStoryClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_client(api_key, model, Duration::from_secs(60), reqwest::Client::new())
    }

    pub fn new_with_client(
        api_key: String,
        model: String,
        timeout: Duration,
        client: reqwest::Client,
    ) -> Self {
        Self {
            http: OpenAiHttpClient::new_with_client(api_key, timeout, client),
            model,
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }

    async fn write_story(&self, prompt: &str) -> Result<Story> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(prompts::STORY_SYSTEM),
                ChatMessage::user(prompts::render(prompts::STORY_USER, &[("prompt", prompt)])),
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let response = self.http.chat_completion(&request).await?;

        let text = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| Error::StoryGeneration("No response from OpenAI".to_string()))?;

        parse_story(text, prompt)
    }
}

/// Locate the outermost JSON object in a model reply.
pub fn extract_json_object(text: &str) -> Option<&str> {
    JSON_OBJECT.find(text).map(|m| m.as_str())
}

/// Parse a model reply into a story skeleton for `prompt`.
pub fn parse_story(text: &str, prompt: &str) -> Result<Story> {
    let json = extract_json_object(text)
        .ok_or_else(|| Error::StoryGeneration("Failed to parse story JSON".to_string()))?;

    let draft: StoryDraft = serde_json::from_str(json)?;

    if draft.pages.is_empty() {
        return Err(Error::StoryGeneration("Story has no pages".to_string()));
    }

    Ok(Story {
        title: draft.title,
        prompt: prompt.to_string(),
        pages: draft
            .pages
            .into_iter()
            .map(|page| StoryPage {
                image_url: None,
                ..page
            })
            .collect(),
    })
}

#[async_trait]
impl StoryService for OpenAiStoryClient {
    async fn generate_story(&self, prompt: &str) -> Result<Story> {
        tracing::debug!("Requesting story from model {}", self.model);

        match self.write_story(prompt).await {
            Ok(story) => {
                tracing::info!(
                    "Generated story \"{}\" with {} pages",
                    story.title,
                    story.pages.len()
                );
                Ok(story)
            }
            Err(e) => {
                tracing::error!("Error generating story: {}", e);
                Err(Error::StoryGeneration(GENERIC_FAILURE.to_string()))
            }
        }
    }
}
