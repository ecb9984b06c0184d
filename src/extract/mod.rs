//! Blog and article extraction.
//!
//! - [`blog`] - reads a blog index page into an ordered list of article links
//! - [`article`] - reads one article page into an [`ArticleRecord`]
//! - [`date`] - the ISO-8601 reading used for `<time datetime>` values
//!
//! Each extractor is split into an async `extract_*` function that fetches
//! through a [`Transport`](crate::fetch::Transport) and a synchronous
//! `parse_*` function that works on bytes already in hand. The parsed
//! document never lives across an `.await`.

pub mod article;
pub mod blog;
pub mod date;
mod types;

pub use article::{extract_article, parse_article};
pub use blog::{extract_blog, parse_blog, BlogIndex};
pub use types::{ArticleRecord, BlogLink, PublishDate};

use thiserror::Error;

use crate::fetch::FetchError;

/// Errors raised while turning pages into records.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The page could not be fetched.
    #[error("Failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: FetchError,
    },
    /// The page lacks an element the blog/article layout requires.
    #[error("Unexpected page structure at {url}: {reason}")]
    Structure { url: String, reason: &'static str },
    /// A `<time datetime>` value is present but is not an ISO-8601 date.
    #[error("Invalid publication date {value:?} at {url}: {source}")]
    Date {
        url: String,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
    /// A CSS selector failed to parse.
    #[error("Invalid CSS selector {0}")]
    Selector(String),
}

impl ExtractError {
    pub(crate) fn structure(url: &str, reason: &'static str) -> Self {
        Self::Structure {
            url: url.to_string(),
            reason,
        }
    }

    pub(crate) fn fetch(url: &str, source: FetchError) -> Self {
        Self::Fetch {
            url: url.to_string(),
            source,
        }
    }
}
