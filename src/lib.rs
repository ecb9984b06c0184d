//! Builds Atom and RSS feeds from a blog's HTML pages.
//!
//! The pipeline reads a blog index page, follows each linked article,
//! extracts a record per article, and renders the records as feeds:
//!
//! ```ignore
//! use blogfeed::{FeedMetadata, FeedSynthesizer, HttpTransport};
//!
//! let transport = HttpTransport::new(reqwest::Client::new());
//! let mut feed = FeedSynthesizer::new(FeedMetadata::new(
//!     "https://www.example.com/blog/",
//!     "Fionn",
//!     "email@example.com",
//! ));
//! feed.add_from_blog(&transport, "https://www.example.com/blog/").await?;
//! let atom = feed.atom()?;
//! let rss = feed.rss()?;
//! ```

pub mod config;
pub mod content;
pub mod document;
pub mod extract;
pub mod feed;
pub mod fetch;
pub mod util;

pub use extract::{ArticleRecord, BlogLink, ExtractError, PublishDate};
pub use feed::{FeedEntry, FeedError, FeedFormat, FeedMetadata, FeedSynthesizer};
pub use fetch::{FetchError, HttpTransport, Transport};
