//! HTML body sanitizer backed by `ammonia`.

use ammonia::Builder;

use quill_core::ports::BodySanitizer;

/// Keeps a safe formatting subset of HTML and drops everything else:
/// `<script>`/`<style>` contents, event handler attributes, `javascript:` URLs.
pub struct HtmlSanitizer {
    builder: Builder<'static>,
}

impl HtmlSanitizer {
    pub fn new() -> Self {
        let mut builder = Builder::default();
        builder.link_rel(Some("noopener noreferrer nofollow"));
        Self { builder }
    }
}

impl Default for HtmlSanitizer {
    fn default() -> Self {
        Self::new()
    }
}

impl BodySanitizer for HtmlSanitizer {
    fn sanitize(&self, body: &str) -> String {
        self.builder.clean(body).to_string()
    }
}

/// Drop every tag from `html`, keeping its text. Entities stay encoded.
pub fn strip_tags(html: &str) -> String {
    Builder::empty().clean(html).to_string()
}
