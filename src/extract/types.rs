use chrono::{DateTime, Utc};

/// Publication date of an article.
///
/// `Unknown` means the page had no `<time datetime>` element. What an unknown
/// date looks like in a rendered feed is decided by the feed writers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishDate {
    Known(DateTime<Utc>),
    Unknown,
}

impl PublishDate {
    pub fn known(&self) -> Option<DateTime<Utc>> {
        match self {
            PublishDate::Known(date) => Some(*date),
            PublishDate::Unknown => None,
        }
    }
}

/// One article link found on a blog index page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogLink {
    /// Link text; may be empty.
    pub title: String,
    /// Base URL joined with the link's href.
    pub url: String,
}

/// Everything extracted from one article page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRecord {
    pub url: String,
    pub title: String,
    pub date: PublishDate,
    /// `<meta name="description">` content, when present and non-blank.
    pub description: Option<String>,
    /// First paragraph text followed by `" […]"`.
    pub snippet: String,
    /// Normalized article body markup.
    pub content: String,
}

impl ArticleRecord {
    /// The description when there is one, otherwise the snippet.
    pub fn summary(&self) -> &str {
        self.description.as_deref().unwrap_or(&self.snippet)
    }
}
