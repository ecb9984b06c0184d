use crate::content::normalize;
use crate::document::{find_first_in, text_of, Document};
use crate::fetch::Transport;

use super::date::parse_datetime;
use super::{ArticleRecord, ExtractError, PublishDate};

/// Appended to the first paragraph to form a snippet.
pub const SNIPPET_SUFFIX: &str = " […]";

/// Fetches `url` and reads it into an [`ArticleRecord`].
///
/// # Errors
///
/// - [`ExtractError::Fetch`] if the page cannot be fetched
/// - [`ExtractError::Structure`] if the page has no paragraph inside
///   `<body><article>`
/// - [`ExtractError::Date`] if a `<time datetime>` value cannot be parsed
pub async fn extract_article<T: Transport>(
    transport: &T,
    title: &str,
    url: &str,
) -> Result<ArticleRecord, ExtractError> {
    let bytes = transport
        .fetch(url)
        .await
        .map_err(|e| ExtractError::fetch(url, e))?;
    parse_article(title, url, &bytes)
}

/// Reads an already fetched article page.
///
/// A page without any `<time datetime>` element has an unknown date; a page
/// whose `datetime` value is not a date is rejected.
pub fn parse_article(title: &str, url: &str, html: &[u8]) -> Result<ArticleRecord, ExtractError> {
    let document = Document::parse(html);

    let date = match document
        .find_first("time[datetime]")?
        .and_then(|el| el.value().attr("datetime"))
    {
        Some(value) => {
            let parsed = parse_datetime(value).map_err(|source| ExtractError::Date {
                url: url.to_string(),
                value: value.to_string(),
                source,
            })?;
            PublishDate::Known(parsed)
        }
        None => PublishDate::Unknown,
    };

    let description = document
        .find_first(r#"meta[name="description"]"#)?
        .and_then(|el| el.value().attr("content"))
        .map(str::trim)
        .filter(|content| !content.is_empty())
        .map(str::to_string);

    let body = document
        .find_first("body")?
        .ok_or_else(|| ExtractError::structure(url, "no <body> element"))?;
    let article = find_first_in(&body, "article")?
        .ok_or_else(|| ExtractError::structure(url, "no <article> inside <body>"))?;
    let first_paragraph = find_first_in(&article, "p")?
        .ok_or_else(|| ExtractError::structure(url, "no paragraph inside <article>"))?;

    let snippet = format!("{}{}", text_of(&first_paragraph).trim(), SNIPPET_SUFFIX);
    let content = normalize(&first_paragraph);

    tracing::debug!(
        url = %url,
        dated = date.known().is_some(),
        described = description.is_some(),
        "Read article"
    );

    Ok(ArticleRecord {
        url: url.to_string(),
        title: title.to_string(),
        date,
        description,
        snippet,
        content,
    })
}
