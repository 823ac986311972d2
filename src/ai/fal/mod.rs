pub mod client;
pub mod image;
pub mod types;

pub use client::FalHttpClient;
pub use image::FalImageClient;

#[cfg(test)]
pub(crate) mod test_support {
    use wiremock::matchers::{method, path};
    use wiremock::MockBuilder;

    pub const PRIMARY_MODEL: &str = "fal-ai/ideogram/v2a/turbo";
    pub const ALTERNATE_MODEL: &str = "fal-ai/ideogram/v2a";

    pub fn run(model: &str) -> MockBuilder {
        wiremock::Mock::given(method("POST")).and(path(format!("/{}", model)))
    }

    /// Response body listing the given image URLs.
    pub fn images(urls: &[&str]) -> serde_json::Value {
        let images: Vec<serde_json::Value> = urls
            .iter()
            .map(|url| serde_json::json!({ "url": url, "content_type": "image/png" }))
            .collect();
        serde_json::json!({ "images": images, "seed": 42 })
    }
}
