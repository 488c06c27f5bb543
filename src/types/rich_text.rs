use serde::{Deserialize, Serialize};

/// Inline formatting carried by a span of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Annotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub code: bool,
}

impl Annotations {
    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }
}

/// A run of text with uniform styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSpan {
    pub content: String,
    pub annotations: Annotations,
    pub link: Option<String>,
}

impl TextSpan {
    /// Create an unstyled span.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            content: text.into(),
            annotations: Annotations::default(),
            link: None,
        }
    }

    pub fn styled(text: impl Into<String>, annotations: Annotations, link: Option<String>) -> Self {
        Self {
            content: text.into(),
            annotations,
            link,
        }
    }

    fn same_style(&self, other: &TextSpan) -> bool {
        self.annotations == other.annotations && self.link == other.link
    }
}

/// Ordered text spans making up the text of one block.
///
/// Adjacent spans with identical styling are merged on insertion, so
/// `[("a", bold), ("b", bold)]` is stored as a single `"ab"` span.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RichText(Vec<TextSpan>);

impl RichText {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Rich text consisting of one unstyled span.
    pub fn plain(text: impl Into<String>) -> Self {
        let mut rich = Self::new();
        rich.push(TextSpan::plain(text));
        rich
    }

    pub fn push(&mut self, span: TextSpan) {
        if span.content.is_empty() {
            return;
        }
        match self.0.last_mut() {
            Some(last) if last.same_style(&span) => last.content.push_str(&span.content),
            _ => self.0.push(span),
        }
    }

    pub fn push_plain(&mut self, text: &str) {
        self.push(TextSpan::plain(text));
    }

    /// Appends every span of `other`, merging at the seam.
    pub fn extend(&mut self, other: RichText) {
        for span in other.0 {
            self.push(span);
        }
    }

    pub fn spans(&self) -> &[TextSpan] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when there is no visible content.
    pub fn is_blank(&self) -> bool {
        self.0.iter().all(|span| span.content.trim().is_empty())
    }

    /// Concatenated content without styling.
    pub fn plain_text(&self) -> String {
        self.0.iter().map(|span| span.content.as_str()).collect()
    }

    /// Removes leading whitespace of the first span and trailing whitespace of the last.
    pub fn trimmed(mut self) -> Self {
        if let Some(first) = self.0.first_mut() {
            first.content = first.content.trim_start().to_string();
        }
        if let Some(last) = self.0.last_mut() {
            last.content = last.content.trim_end().to_string();
        }
        self.0.retain(|span| !span.content.is_empty());
        self
    }
}

impl From<&str> for RichText {
    fn from(text: &str) -> Self {
        RichText::plain(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bold() -> Annotations {
        Annotations {
            bold: true,
            ..Annotations::default()
        }
    }

    #[test]
    fn merges_adjacent_spans_with_same_style() {
        let mut text = RichText::new();
        text.push(TextSpan::plain("Hello, "));
        text.push(TextSpan::plain("world"));
        text.push(TextSpan::styled("!", bold(), None));
        text.push(TextSpan::styled("!", bold(), None));

        assert_eq!(text.spans().len(), 2);
        assert_eq!(text.spans()[0].content, "Hello, world");
        assert_eq!(text.spans()[1].content, "!!");
        assert_eq!(text.plain_text(), "Hello, world!!");
    }

    #[test]
    fn links_split_spans() {
        let mut text = RichText::new();
        text.push(TextSpan::plain("see "));
        text.push(TextSpan::styled(
            "docs",
            Annotations::default(),
            Some("https://example.com".to_string()),
        ));
        assert_eq!(text.spans().len(), 2);
    }

    #[test]
    fn empty_spans_are_dropped_and_trim_cleans_edges() {
        let mut text = RichText::new();
        text.push(TextSpan::plain(""));
        assert!(text.is_empty());

        text.push(TextSpan::plain("  padded "));
        text.push(TextSpan::styled("  ", bold(), None));
        let trimmed = text.trimmed();
        assert_eq!(trimmed.plain_text(), "padded ");
        assert_eq!(trimmed.spans().len(), 1);
    }
}
