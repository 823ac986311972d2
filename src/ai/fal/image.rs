use super::client::FalHttpClient;
use super::types::{TextToImageRequest, TextToImageResponse};
use crate::ai::{fallback, ImageGenerationService};
use crate::config::{DEFAULT_FAL_ALTERNATE_MODEL, DEFAULT_FAL_PRIMARY_MODEL};
use crate::{prompts, Error, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{error, info};

/// Page illustrator backed by fal.ai.
///
/// Tries the primary model, then the alternate model, and finally settles for
/// a stock-photo search URL, so [`FalImageClient::illustrate`] always yields a
/// usable link.
pub struct FalImageClient {
    http: FalHttpClient,
    primary_model: String,
    alternate_model: String,
}

impl FalImageClient {
    pub fn new(api_key: String) -> Self {
        Self::new_with_client(
            api_key,
            DEFAULT_FAL_PRIMARY_MODEL.to_string(),
            DEFAULT_FAL_ALTERNATE_MODEL.to_string(),
            Duration::from_secs(120),
            reqwest::Client::new(),
        )
    }

    pub fn new_with_client(
        api_key: String,
        primary_model: String,
        alternate_model: String,
        timeout: Duration,
        client: reqwest::Client,
    ) -> Self {
        Self {
            http: FalHttpClient::new_with_client(api_key, timeout, client),
            primary_model,
            alternate_model,
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }

    /// Illustrate a page. Never fails: provider errors degrade to a fallback URL.
    pub async fn illustrate(&self, prompt: &str) -> String {
        info!("Generating image with fal for prompt: {}", prompt);
        let styled = prompts::render(prompts::ILLUSTRATION_STYLE, &[("prompt", prompt)]);

        match self.run_model(&self.primary_model, &styled).await {
            Ok(url) => {
                info!("Generated image URL: {}", url);
                return url;
            }
            Err(e) => error!("Error generating image with {}: {}", self.primary_model, e),
        }

        info!("Trying alternate fal model {}", self.alternate_model);
        match self.run_model(&self.alternate_model, &styled).await {
            Ok(url) => {
                info!("Generated image URL (alternate): {}", url);
                return url;
            }
            Err(e) => error!("Alternate model {} also failed: {}", self.alternate_model, e),
        }

        let url = fallback::stock_photo_url(prompt);
        info!("Using fallback URL: {}", url);
        url
    }

    async fn run_model(&self, model: &str, prompt: &str) -> Result<String> {
        let request = TextToImageRequest {
            prompt: prompt.to_string(),
        };

        let response: TextToImageResponse = self.http.run(model, &request).await?;

        response
            .images
            .into_iter()
            .next()
            .and_then(|image| image.url)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| Error::AiProvider("No image generated".to_string()))
    }
}

#[async_trait]
impl ImageGenerationService for FalImageClient {
    async fn generate_image(&self, prompt: &str) -> Result<String> {
        Ok(self.illustrate(prompt).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::fal::test_support::{self, ALTERNATE_MODEL, PRIMARY_MODEL};
    use wiremock::matchers::{body_string_contains, header};
    use wiremock::{MockServer, ResponseTemplate};

    fn make_client(server: &MockServer) -> FalImageClient {
        FalImageClient::new("test-key".to_string()).with_base_url(server.uri())
    }

    #[tokio::test]
    async fn test_primary_model_url_is_returned() {
        let server = MockServer::start().await;

        test_support::run(PRIMARY_MODEL)
            .and(header("Authorization", "Key test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(test_support::images(&[
                "https://fal.media/first.png",
                "https://fal.media/second.png",
            ])))
            .expect(1)
            .mount(&server)
            .await;
        test_support::run(ALTERNATE_MODEL)
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let url = make_client(&server).illustrate("a fox in a teacup").await;
        assert_eq!(url, "https://fal.media/first.png");
    }

    #[tokio::test]
    async fn test_prompt_is_wrapped_in_style_template() {
        let server = MockServer::start().await;

        test_support::run(PRIMARY_MODEL)
            .and(body_string_contains(
                "children's book illustration: a fox in a teacup. Style: whimsical",
            ))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(test_support::images(&["https://fal.media/fox.png"])),
            )
            .expect(1)
            .mount(&server)
            .await;

        make_client(&server).illustrate("a fox in a teacup").await;
    }

    #[tokio::test]
    async fn test_alternate_model_after_primary_error() {
        let server = MockServer::start().await;

        test_support::run(PRIMARY_MODEL)
            .respond_with(ResponseTemplate::new(500).set_body_string("overloaded"))
            .expect(1)
            .mount(&server)
            .await;
        test_support::run(ALTERNATE_MODEL)
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(test_support::images(&["https://fal.media/alt.png"])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let url = make_client(&server).illustrate("a fox").await;
        assert_eq!(url, "https://fal.media/alt.png");
    }

    #[tokio::test]
    async fn test_alternate_model_after_empty_images() {
        let server = MockServer::start().await;

        test_support::run(PRIMARY_MODEL)
            .respond_with(ResponseTemplate::new(200).set_body_json(test_support::images(&[])))
            .mount(&server)
            .await;
        test_support::run(ALTERNATE_MODEL)
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(test_support::images(&["https://fal.media/alt.png"])),
            )
            .mount(&server)
            .await;

        let url = make_client(&server).illustrate("a fox").await;
        assert_eq!(url, "https://fal.media/alt.png");
    }

    #[tokio::test]
    async fn test_stock_photo_after_both_models_fail() {
        let server = MockServer::start().await;

        test_support::run(PRIMARY_MODEL)
            .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
            .expect(1)
            .mount(&server)
            .await;
        test_support::run(ALTERNATE_MODEL)
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .expect(1)
            .mount(&server)
            .await;

        let url = make_client(&server).illustrate("a fox & a hen").await;
        assert_eq!(
            url,
            "https://source.unsplash.com/1024x1024/?a%20fox%20%26%20a%20hen"
        );
    }

    #[tokio::test]
    async fn test_unreachable_provider_falls_back() {
        let client = FalImageClient::new("test-key".to_string())
            .with_base_url("http://127.0.0.1:1".to_string());

        let url = client.generate_image("a fox").await.unwrap();
        assert_eq!(url, fallback::stock_photo_url("a fox"));
    }

    #[tokio::test]
    async fn test_configured_models_are_used() {
        let server = MockServer::start().await;

        test_support::run("custom/primary")
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;
        test_support::run("custom/alternate")
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(test_support::images(&["https://fal.media/custom.png"])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = FalImageClient::new_with_client(
            "key".to_string(),
            "custom/primary".to_string(),
            "custom/alternate".to_string(),
            Duration::from_secs(5),
            reqwest::Client::new(),
        )
        .with_base_url(server.uri());

        assert_eq!(client.illustrate("x").await, "https://fal.media/custom.png");
    }
}
