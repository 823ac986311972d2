//! Data models and structures
//!
//! Defines the story document exchanged with the storybook viewer. Field names
//! are camelCase on the wire.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One page of the storybook.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoryPage {
    pub page_number: u32,
    pub text: String,
    pub image_prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl StoryPage {
    pub fn new(page_number: u32, text: String, image_prompt: String) -> Self {
        Self {
            page_number,
            text,
            image_prompt,
            image_url: None,
        }
    }
}

/// A complete story. Before illustration it is a skeleton with no image URLs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Story {
    pub title: String,
    pub prompt: String,
    pub pages: Vec<StoryPage>,
}

impl Story {
    /// True once every page carries an image URL.
    pub fn is_illustrated(&self) -> bool {
        self.pages
            .iter()
            .all(|page| page.image_url.as_deref().is_some_and(|url| !url.is_empty()))
    }
}

/// Body of `POST /api/generate-story`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerateStoryRequest {
    pub prompt: Option<String>,
}

impl GenerateStoryRequest {
    /// Read a request body leniently.
    ///
    /// Any JSON value other than `null` is accepted. Only a string `prompt`
    /// member counts; scalars, arrays and non-string prompts yield `None`.
    pub fn from_body(body: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(body)?;
        if value.is_null() {
            return Err(Error::InvalidRequest("request body is null".to_string()));
        }

        Ok(Self {
            prompt: value
                .get("prompt")
                .and_then(Value::as_str)
                .map(str::to_string),
        })
    }
}
