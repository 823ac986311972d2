use super::{ImageGenerationService, StoryService};
use crate::models::{Story, StoryPage};
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Story writer returning canned stories. Clones share state, so a clone kept
/// by a test can observe calls made through the orchestrator.
#[derive(Clone)]
pub struct MockStoryClient {
    story_responses: Arc<Mutex<Vec<Story>>>,
    failure: Arc<Mutex<Option<String>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockStoryClient {
    pub fn new() -> Self {
        Self {
            story_responses: Arc::new(Mutex::new(Vec::new())),
            failure: Arc::new(Mutex::new(None)),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_story_response(self, story: Story) -> Self {
        self.story_responses.lock().unwrap().push(story);
        self
    }

    /// Every call fails with the given provider detail.
    pub fn with_failure(self, detail: &str) -> Self {
        *self.failure.lock().unwrap() = Some(detail.to_string());
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    fn default_story(prompt: &str) -> Story {
        Story {
            title: "The Little Adventure".to_string(),
            prompt: prompt.to_string(),
            pages: vec![
                StoryPage::new(
                    1,
                    format!("Once upon a time: {}.", prompt),
                    "A cozy village at sunrise".to_string(),
                ),
                StoryPage::new(
                    2,
                    "And everyone lived happily ever after.".to_string(),
                    "Friends waving goodbye under a rainbow".to_string(),
                ),
            ],
        }
    }
}

impl Default for MockStoryClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StoryService for MockStoryClient {
    async fn generate_story(&self, prompt: &str) -> Result<Story> {
        let count = {
            let mut count = self.call_count.lock().unwrap();
            *count += 1;
            *count
        };

        if let Some(detail) = self.failure.lock().unwrap().clone() {
            return Err(Error::StoryGeneration(detail));
        }

        let responses = self.story_responses.lock().unwrap();
        let mut story = if responses.is_empty() {
            Self::default_story(prompt)
        } else {
            responses[(count - 1) % responses.len()].clone()
        };
        story.prompt = prompt.to_string();
        Ok(story)
    }
}

#[derive(Clone, Copy, PartialEq)]
enum ImageBehavior {
    Succeed,
    Fail,
    Panic,
}

/// Illustrator returning canned URLs, or failing on demand.
#[derive(Clone)]
pub struct MockImageGenerationClient {
    image_responses: Arc<Mutex<Vec<String>>>,
    behavior: Arc<Mutex<ImageBehavior>>,
    requested_prompts: Arc<Mutex<Vec<String>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockImageGenerationClient {
    pub fn new() -> Self {
        Self {
            image_responses: Arc::new(Mutex::new(Vec::new())),
            behavior: Arc::new(Mutex::new(ImageBehavior::Succeed)),
            requested_prompts: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_image_response(self, url: String) -> Self {
        self.image_responses.lock().unwrap().push(url);
        self
    }

    /// Every call returns an error.
    pub fn failing(self) -> Self {
        *self.behavior.lock().unwrap() = ImageBehavior::Fail;
        self
    }

    /// Every call panics, as an unexpected bug inside a provider client would.
    pub fn panicking(self) -> Self {
        *self.behavior.lock().unwrap() = ImageBehavior::Panic;
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Prompts received so far, in call order.
    pub fn requested_prompts(&self) -> Vec<String> {
        self.requested_prompts.lock().unwrap().clone()
    }
}

impl Default for MockImageGenerationClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageGenerationService for MockImageGenerationClient {
    async fn generate_image(&self, prompt: &str) -> Result<String> {
        let count = {
            let mut count = self.call_count.lock().unwrap();
            *count += 1;
            *count
        };
        self.requested_prompts
            .lock()
            .unwrap()
            .push(prompt.to_string());

        let behavior = *self.behavior.lock().unwrap();
        match behavior {
            ImageBehavior::Fail => Err(Error::AiProvider(
                "mock image generation failure".to_string(),
            )),
            ImageBehavior::Panic => panic!("mock image generation panic"),
            ImageBehavior::Succeed => {
                let responses = self.image_responses.lock().unwrap();
                if responses.is_empty() {
                    Ok(format!("https://images.test/{}.png", count))
                } else {
                    Ok(responses[(count - 1) % responses.len()].clone())
                }
            }
        }
    }
}
