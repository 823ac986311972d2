pub mod client;
pub mod story;
pub mod types;

pub use client::OpenAiHttpClient;
pub use story::OpenAiStoryClient;

pub const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";

#[cfg(test)]
pub(crate) mod test_support {
    use wiremock::matchers::{method, path};
    use wiremock::MockBuilder;

    pub use super::CHAT_COMPLETIONS_PATH;

    pub fn post(endpoint: &str) -> MockBuilder {
        wiremock::Mock::given(method("POST")).and(path(endpoint))
    }

    /// Chat completion body whose single choice carries `content`.
    pub fn completion(content: &str) -> serde_json::Value {
        serde_json::json!({
            "choices": [{
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }]
        })
    }
}
