//! # Response Normalizer & Image Reference Extractor
//!
//! Turns a provider's raw completion text into the canonical [`ChatResult`]:
//! image URLs are pulled out of the text (markdown syntax, bare links, and
//! extension-less Hugging Face Space URLs), de-duplicated in first-seen
//! order, and every markdown-image span is stripped from the visible text.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Markdown image syntax `![alt](URL)` with an http(s) URL — captures the URL.
static MARKDOWN_IMAGE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)!\[[^\]]*\]\((https?://[^\s)]+)\)").unwrap());

/// Bare http(s) URL ending in a common image extension, optional query string.
static BARE_IMAGE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)https?://[^\s)]+\.(?:jpg|jpeg|png|gif|webp|svg)(?:\?[^\s)]*)?").unwrap()
});

/// Hugging Face Space URL — dynamically generated images carry no extension.
static HOSTED_IMAGE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)https?://[^\s)]*\.hf\.space[^\s)]*").unwrap());

/// Any markdown-image span, regardless of URL scheme. Stripped from the text.
static MARKDOWN_IMAGE_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[[^\]]*\]\([^)]*\)").unwrap());

/// Canonical chat result, identical regardless of which provider answered.
///
/// `is_error == true` implies `error_message` is present and `text_content`
/// is empty; `image_urls` is empty unless the raw text contained at least
/// one image reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResult {
    pub text_content: String,
    pub image_urls: Vec<String>,
    pub is_error: bool,
    pub error_message: Option<String>,
}

impl ChatResult {
    /// Builds an error result with no content.
    pub fn error(message: impl Into<String>) -> Self {
        ChatResult {
            text_content: String::new(),
            image_urls: Vec::new(),
            is_error: true,
            error_message: Some(message.into()),
        }
    }
}

/// Normalizes raw completion text into the canonical result.
///
/// Extraction runs all three patterns over the full text and merges the
/// matches into one ordered, de-duplicated sequence. Every markdown-image
/// span is then deleted from the visible text (not only the spans whose URL
/// matched an image pattern) and the remainder is trimmed.
pub fn normalize(raw_text: &str) -> ChatResult {
    let image_urls = extract_image_urls(raw_text);
    let text_content = MARKDOWN_IMAGE_SPAN
        .replace_all(raw_text, "")
        .trim()
        .to_string();

    ChatResult {
        text_content,
        image_urls,
        is_error: false,
        error_message: None,
    }
}

/// Collects image URLs from the text: markdown captures first, then bare
/// extension URLs, then hosted-service URLs. First occurrence wins.
fn extract_image_urls(text: &str) -> Vec<String> {
    let mut urls = Vec::new();
    let mut seen = HashSet::new();

    for capture in MARKDOWN_IMAGE_URL.captures_iter(text) {
        push_unique(&mut urls, &mut seen, capture[1].to_string());
    }
    for m in BARE_IMAGE_URL.find_iter(text) {
        push_unique(&mut urls, &mut seen, m.as_str().to_string());
    }
    for m in HOSTED_IMAGE_URL.find_iter(text) {
        push_unique(&mut urls, &mut seen, m.as_str().to_string());
    }

    urls
}

fn push_unique(urls: &mut Vec<String>, seen: &mut HashSet<String>, url: String) {
    if seen.insert(url.clone()) {
        urls.push(url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_passes_through_trimmed() {
        let result = normalize("  Hello there.  ");
        assert_eq!(result.text_content, "Hello there.");
        assert!(result.image_urls.is_empty());
        assert!(!result.is_error);
        assert!(result.error_message.is_none());
    }

    #[test]
    fn test_empty_input_yields_empty_result() {
        let result = normalize("");
        assert_eq!(result.text_content, "");
        assert!(result.image_urls.is_empty());
    }

    #[test]
    fn test_markdown_round_trip() {
        let result =
            normalize("![pic](https://x.test/a.png) hello ![p2](https://x.test/b.png)");
        assert_eq!(
            result.image_urls,
            vec!["https://x.test/a.png", "https://x.test/b.png"]
        );
        assert_eq!(result.text_content, "hello");
    }

    #[test]
    fn test_extractor_is_idempotent() {
        let first = normalize("![pic](https://x.test/a.png) hello");
        let second = normalize(&first.text_content);
        assert_eq!(second.text_content, first.text_content);
        assert!(second.image_urls.is_empty());
    }

    #[test]
    fn test_dedup_markdown_and_bare_same_url() {
        let result = normalize(
            "![cat](https://x.test/cat.png) see also https://x.test/cat.png for the original",
        );
        assert_eq!(result.image_urls, vec!["https://x.test/cat.png"]);
    }

    #[test]
    fn test_bare_url_with_query_string() {
        let result = normalize("image at https://cdn.test/photo.jpeg?size=large here");
        assert_eq!(result.image_urls, vec!["https://cdn.test/photo.jpeg?size=large"]);
        assert_eq!(
            result.text_content,
            "image at https://cdn.test/photo.jpeg?size=large here"
        );
    }

    #[test]
    fn test_extension_matching_is_case_insensitive() {
        let result = normalize("https://x.test/IMG.PNG");
        assert_eq!(result.image_urls, vec!["https://x.test/IMG.PNG"]);
    }

    #[test]
    fn test_hosted_url_without_extension() {
        let result = normalize("generated: https://user-flux.hf.space/gradio/file=img");
        assert_eq!(
            result.image_urls,
            vec!["https://user-flux.hf.space/gradio/file=img"]
        );
    }

    #[test]
    fn test_markdown_without_image_extension_still_extracted() {
        // Markdown capture does not require a file extension.
        let result = normalize("![dyn](https://x.test/render?id=7)");
        assert_eq!(result.image_urls, vec!["https://x.test/render?id=7"]);
        assert_eq!(result.text_content, "");
    }

    #[test]
    fn test_non_http_markdown_span_is_stripped_but_not_extracted() {
        let result = normalize("before ![local](/relative/pic.png) after");
        assert!(result.image_urls.is_empty());
        assert_eq!(result.text_content, "before  after");
    }

    #[test]
    fn test_non_image_url_is_left_alone() {
        let result = normalize("read https://example.test/article.html today");
        assert!(result.image_urls.is_empty());
        assert_eq!(result.text_content, "read https://example.test/article.html today");
    }

    #[test]
    fn test_first_seen_order_preserved() {
        let result = normalize(
            "https://x.test/z.png then ![a](https://x.test/a.png) then https://x.test/m.gif",
        );
        // Markdown captures are collected before bare matches.
        assert_eq!(
            result.image_urls,
            vec![
                "https://x.test/a.png",
                "https://x.test/z.png",
                "https://x.test/m.gif"
            ]
        );
    }

    #[test]
    fn test_error_result_shape() {
        let result = ChatResult::error("boom");
        assert!(result.is_error);
        assert_eq!(result.error_message.as_deref(), Some("boom"));
        assert!(result.text_content.is_empty());
        assert!(result.image_urls.is_empty());
    }
}
