use serde::Deserialize;

use crate::util::join_relative;

/// Feed-level settings fixed when a [`FeedSynthesizer`](super::FeedSynthesizer)
/// is created.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FeedMetadata {
    /// Blog base URL, with trailing slash. Also the feed's alternate link.
    pub url: String,
    /// Author name used for the feed and every entry.
    pub name: String,
    /// Author email used for the feed and every entry.
    pub email: String,
    /// Feed title. When unset, the blog index `<title>` is used.
    pub title: Option<String>,
    pub generator: Option<String>,
    pub generator_version: Option<String>,
    pub logo: Option<String>,
    pub icon: Option<String>,
    pub description: Option<String>,
    /// Language code such as `en`.
    pub language: Option<String>,
}

impl FeedMetadata {
    pub fn new(url: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            name: name.into(),
            email: email.into(),
            ..Self::default()
        }
    }

    /// Atom feed identifier.
    pub fn feed_id(&self) -> String {
        join_relative(&self.url, "feed.atom")
    }

    /// `rel="self"` link advertised by both formats.
    pub fn self_link(&self) -> String {
        join_relative(&self.url, "feed.xml")
    }

    /// Generator name with its version appended, when both are known.
    pub fn generator_label(&self) -> Option<String> {
        let name = self.generator.as_deref()?;
        Some(match self.generator_version.as_deref() {
            Some(version) => format!("{name} {version}"),
            None => name.to_string(),
        })
    }

    /// RSS author form: `email (name)`.
    pub fn rss_author(&self) -> String {
        format!("{} ({})", self.email, self.name)
    }
}
