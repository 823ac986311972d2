//! Stock-photo links used when no illustration could be generated.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

pub const STOCK_PHOTO_BASE_URL: &str = "https://source.unsplash.com/1024x1024/";

/// Characters left alone by JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Deterministic stock-photo search URL for an illustration prompt.
pub fn stock_photo_url(prompt: &str) -> String {
    format!(
        "{}?{}",
        STOCK_PHOTO_BASE_URL,
        utf8_percent_encode(prompt, URI_COMPONENT)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encodes_spaces_and_punctuation() {
        assert_eq!(
            stock_photo_url("a boy, a portal & stars"),
            "https://source.unsplash.com/1024x1024/?a%20boy%2C%20a%20portal%20%26%20stars"
        );
    }

    #[test]
    fn test_keeps_uri_component_marks() {
        assert_eq!(
            stock_photo_url("it's (very) bright!*~_.-"),
            "https://source.unsplash.com/1024x1024/?it's%20(very)%20bright!*~_.-"
        );
    }

    #[test]
    fn test_encodes_utf8() {
        assert_eq!(
            stock_photo_url("café"),
            "https://source.unsplash.com/1024x1024/?caf%C3%A9"
        );
    }

    #[test]
    fn test_is_deterministic() {
        assert_eq!(stock_photo_url("owl"), stock_photo_url("owl"));
    }
}
