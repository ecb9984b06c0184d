//! Feed synthesis: article records in, Atom and RSS documents out.
//!
//! [`FeedSynthesizer`] holds the feed-level [`FeedMetadata`] and an
//! append-only list of entries. It starts `Empty` when no title is
//! configured and becomes `Populated` once a title is known, either from the
//! metadata or from the first blog index it reads. Entries are only accepted
//! in the `Populated` state and are rendered in the order they were added.
//!
//! # Entry mapping
//!
//! | Entry field          | Source                                         |
//! |----------------------|------------------------------------------------|
//! | id / link / guid     | `record.url`                                   |
//! | title                | `record.title`                                 |
//! | author / contributor | feed name and email                            |
//! | summary              | `record.description`, else `record.snippet`    |
//! | content (HTML)       | `record.content`                               |
//! | published / updated  | `record.date`, else 1970-01-01T00:00:00Z       |

mod atom;
mod metadata;
mod rss;

pub use metadata::FeedMetadata;

use chrono::{DateTime, Utc};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::extract::{extract_article, extract_blog, ArticleRecord, ExtractError, PublishDate};
use crate::fetch::Transport;
use crate::util::atomic_write;

/// Indentation width of pretty-printed documents.
const INDENT_SIZE: usize = 2;

/// Errors that can occur while building or rendering a feed.
#[derive(Debug, Error)]
pub enum FeedError {
    /// A blog or article page could not be read.
    #[error(transparent)]
    Extract(#[from] ExtractError),
    /// No title was configured and none could be taken from a blog index.
    #[error("Feed has no title: set one explicitly or add entries from a blog page with a <title>")]
    MissingTitle,
    #[error("Failed to render Atom feed: {0}")]
    Atom(#[from] atom_syndication::Error),
    #[error("Failed to render RSS feed: {0}")]
    Rss(#[from] ::rss::Error),
    #[error("Failed to write feed file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Output document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedFormat {
    Atom,
    Rss,
}

impl FeedFormat {
    /// File name used when the caller does not pick one.
    pub fn default_file_name(self) -> &'static str {
        match self {
            FeedFormat::Atom => "feed.atom",
            FeedFormat::Rss => "feed.xml",
        }
    }
}

impl fmt::Display for FeedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedFormat::Atom => f.write_str("atom"),
            FeedFormat::Rss => f.write_str("rss"),
        }
    }
}

/// One feed entry, mapped from an [`ArticleRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub id: String,
    pub link: String,
    pub title: String,
    pub summary: String,
    /// HTML markup.
    pub content: String,
    pub date: PublishDate,
}

impl From<ArticleRecord> for FeedEntry {
    fn from(record: ArticleRecord) -> Self {
        let summary = record.summary().to_string();
        Self {
            id: record.url.clone(),
            link: record.url,
            title: record.title,
            summary,
            content: record.content,
            date: record.date,
        }
    }
}

/// Timestamp written for an entry: its date, or the Unix epoch when unknown.
pub fn entry_timestamp(date: PublishDate) -> DateTime<Utc> {
    // Default for DateTime<Utc> is 1970-01-01T00:00:00Z
    date.known().unwrap_or_default()
}

/// Feed-level `updated` instant: the latest entry timestamp.
///
/// Derived from the entries rather than the clock so rendering the same
/// entries always produces the same bytes.
fn feed_updated(entries: &[FeedEntry]) -> DateTime<Utc> {
    entries
        .iter()
        .map(|entry| entry_timestamp(entry.date))
        .max()
        .unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum FeedState {
    Empty,
    Populated {
        title: String,
        entries: Vec<FeedEntry>,
    },
}

/// Accumulates entries and renders them as Atom or RSS.
#[derive(Debug, Clone)]
pub struct FeedSynthesizer {
    metadata: FeedMetadata,
    state: FeedState,
}

impl FeedSynthesizer {
    pub fn new(metadata: FeedMetadata) -> Self {
        let state = match metadata.title.as_deref().map(str::trim) {
            Some(title) if !title.is_empty() => FeedState::Populated {
                title: title.to_string(),
                entries: Vec::new(),
            },
            _ => FeedState::Empty,
        };
        Self { metadata, state }
    }

    /// Settings the feed was created with.
    pub fn metadata(&self) -> &FeedMetadata {
        &self.metadata
    }

    /// Current feed title; `None` while still empty.
    pub fn title(&self) -> Option<&str> {
        match &self.state {
            FeedState::Empty => None,
            FeedState::Populated { title, .. } => Some(title),
        }
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[FeedEntry] {
        match &self.state {
            FeedState::Empty => &[],
            FeedState::Populated { entries, .. } => entries,
        }
    }

    /// Sets the title if none is set yet. Returns whether it was applied.
    fn fill_title(&mut self, title: &str) -> bool {
        if let FeedState::Empty = self.state {
            self.state = FeedState::Populated {
                title: title.to_string(),
                entries: Vec::new(),
            };
            return true;
        }
        false
    }

    /// Appends one article as an entry.
    ///
    /// # Errors
    ///
    /// [`FeedError::MissingTitle`] while the feed has no title.
    pub fn add(&mut self, record: ArticleRecord) -> Result<(), FeedError> {
        match &mut self.state {
            FeedState::Empty => Err(FeedError::MissingTitle),
            FeedState::Populated { entries, .. } => {
                entries.push(FeedEntry::from(record));
                Ok(())
            }
        }
    }

    /// Reads the blog index at `url` and adds every linked article, in
    /// index order.
    ///
    /// The index `<title>` becomes the feed title if none is set. Articles are
    /// fetched one after another; if any of them fails, nothing from this call
    /// is added and the error is returned. Returns the number of entries added.
    pub async fn add_from_blog<T: Transport>(
        &mut self,
        transport: &T,
        url: &str,
    ) -> Result<usize, FeedError> {
        let index = extract_blog(transport, url).await?;

        if let Some(title) = index.title.as_deref() {
            if self.fill_title(title) {
                tracing::info!(title = %title, "Using blog page title as feed title");
            }
        }
        if self.title().is_none() {
            return Err(FeedError::MissingTitle);
        }

        let mut records = Vec::with_capacity(index.links.len());
        for link in &index.links {
            let record = extract_article(transport, &link.title, &link.url).await?;
            records.push(record);
        }

        let added = records.len();
        for record in records {
            self.add(record)?;
        }

        tracing::info!(url = %url, added = added, "Added blog articles to feed");
        Ok(added)
    }

    /// Serializes the current entries as a pretty-printed document.
    ///
    /// Rendering does not touch the entry list, so repeated calls with no
    /// `add` in between return identical bytes.
    pub fn render(&self, format: FeedFormat) -> Result<Vec<u8>, FeedError> {
        let FeedState::Populated { title, entries } = &self.state else {
            return Err(FeedError::MissingTitle);
        };

        let bytes = match format {
            FeedFormat::Atom => atom::render(&self.metadata, title, entries)?,
            FeedFormat::Rss => rss::render(&self.metadata, title, entries)?,
        };
        Ok(bytes)
    }

    pub fn atom(&self) -> Result<Vec<u8>, FeedError> {
        self.render(FeedFormat::Atom)
    }

    pub fn rss(&self) -> Result<Vec<u8>, FeedError> {
        self.render(FeedFormat::Rss)
    }

    /// Renders `format` and writes it atomically to `path`.
    pub fn write(&self, format: FeedFormat, path: &Path) -> Result<(), FeedError> {
        let bytes = self.render(format)?;
        atomic_write(path, &bytes).map_err(|source| FeedError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(format = %format, path = %path.display(), entries = self.entries().len(), "Wrote feed");
        Ok(())
    }

    /// Writes the Atom document, to `feed.atom` unless a path is given.
    pub fn write_atom(&self, path: Option<&Path>) -> Result<(), FeedError> {
        let path = path.unwrap_or(Path::new(FeedFormat::Atom.default_file_name()));
        self.write(FeedFormat::Atom, path)
    }

    /// Writes the RSS document, to `feed.xml` unless a path is given.
    pub fn write_rss(&self, path: Option<&Path>) -> Result<(), FeedError> {
        let path = path.unwrap_or(Path::new(FeedFormat::Rss.default_file_name()));
        self.write(FeedFormat::Rss, path)
    }
}
