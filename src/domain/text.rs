use html2text::from_read;
use regex::Regex;

/// Prepares pasted text for synthesis.
///
/// Users paste from web pages and feed readers; markup and bare URLs read
/// terribly when spoken, so the sanitizer strips HTML, drops URLs and
/// collapses whitespace before the text is chunked.
pub struct TextSanitizer {
    url_pattern: Regex,
    whitespace_pattern: Regex,
}

impl TextSanitizer {
    pub fn new() -> Self {
        Self {
            url_pattern: Regex::new(r"https?://[^\s]+").unwrap(),
            whitespace_pattern: Regex::new(r"\s+").unwrap(),
        }
    }

    /// Clean text by removing HTML markup and URLs and normalizing
    /// whitespace. May return an empty string for all-markup input.
    pub fn clean(&self, text: &str) -> String {
        // Convert HTML to plain text
        let plain_text = from_read(text.as_bytes(), usize::MAX);

        // Remove URLs (both http and https)
        let without_urls = self.url_pattern.replace_all(&plain_text, "");

        // Normalize whitespace (replace multiple spaces/newlines with single space)
        let normalized = self.whitespace_pattern.replace_all(&without_urls, " ");

        normalized.trim().to_string()
    }
}

impl Default for TextSanitizer {
    fn default() -> Self {
        Self::new()
    }
}
