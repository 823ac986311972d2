use crate::{Error, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://fal.run";

/// Minimal client for fal's synchronous run endpoint, `POST {base}/{model}`.
pub struct FalHttpClient {
    pub(crate) client: Client,
    pub(crate) api_key: String,
    pub(crate) base_url: String,
    timeout: Duration,
}

impl FalHttpClient {
    pub fn new_with_client(api_key: String, timeout: Duration, client: Client) -> Self {
        Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout,
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Run `model` with `input` and wait for its result.
    pub async fn run<Req: Serialize, Resp: DeserializeOwned>(
        &self,
        model: &str,
        input: &Req,
    ) -> Result<Resp> {
        let url = format!("{}/{}", self.base_url, model.trim_start_matches('/'));
        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .header("Authorization", format!("Key {}", self.api_key))
            .json(input)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send request to fal ({}): {}", model, e);
                e
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            tracing::error!("fal API error for {} (status {}): {}", model, status, error_text);
            return Err(Error::AiProvider(format!(
                "fal API error (status {}): {}",
                status, error_text
            )));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse fal response: {}\nBody: {}", e, body);
            Error::AiProvider(format!("Failed to parse fal response: {}", e))
        })
    }
}
