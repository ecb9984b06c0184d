use crate::document::{find_all_in, find_first_in, text_of, Document};
use crate::fetch::Transport;
use crate::util::join_relative;

use super::{BlogLink, ExtractError};

/// Contents of a blog index page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogIndex {
    /// `<title>` of the index page, used as a fallback feed title.
    pub title: Option<String>,
    /// Article links in the order they appear on the page.
    pub links: Vec<BlogLink>,
}

/// Fetches `base_url` and reads its article list.
///
/// # Errors
///
/// - [`ExtractError::Fetch`] if the index page cannot be fetched
/// - [`ExtractError::Structure`] if the page has no `<main>` containing a `<ul>`,
///   or a list item has no `<a href>`
pub async fn extract_blog<T: Transport>(
    transport: &T,
    base_url: &str,
) -> Result<BlogIndex, ExtractError> {
    let bytes = transport
        .fetch(base_url)
        .await
        .map_err(|e| ExtractError::fetch(base_url, e))?;
    parse_blog(base_url, &bytes)
}

/// Reads the article list from an already fetched index page.
///
/// Articles are the `<li>` elements of the first `<ul>` inside `<main>`.
/// Each item's first `<a>` supplies the link text and an href that is
/// appended to `base_url` as-is (see [`join_relative`]).
pub fn parse_blog(base_url: &str, html: &[u8]) -> Result<BlogIndex, ExtractError> {
    let document = Document::parse(html);

    let main = document
        .find_first("main")?
        .ok_or_else(|| ExtractError::structure(base_url, "no <main> element"))?;
    let list = find_first_in(&main, "ul")?
        .ok_or_else(|| ExtractError::structure(base_url, "no <ul> inside <main>"))?;

    let mut links = Vec::new();
    for item in find_all_in(&list, "li")? {
        let anchor = find_first_in(&item, "a")?
            .ok_or_else(|| ExtractError::structure(base_url, "list item without a link"))?;
        let href = anchor
            .value()
            .attr("href")
            .ok_or_else(|| ExtractError::structure(base_url, "list link without href"))?;

        links.push(BlogLink {
            title: text_of(&anchor).trim().to_string(),
            url: join_relative(base_url, href),
        });
    }

    let title = document.title()?;
    tracing::info!(url = %base_url, articles = links.len(), "Read blog index");

    Ok(BlogIndex { title, links })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::test_support::StaticTransport;
    use crate::fetch::FetchError;
    use pretty_assertions::assert_eq;

    const INDEX: &str = r#"<!DOCTYPE html>
<html>
  <head><title>Example Blog</title></head>
  <body>
    <nav><ul><li><a href="about/">About</a></li></ul></nav>
    <main>
      <h1>Posts</h1>
      <ul>
        <li><time>2024</time> <a href="second-post/">Second post</a></li>
        <li><a href="first-post/"> First post </a></li>
      </ul>
      <ul><li><a href="archive/">Not an article</a></li></ul>
    </main>
  </body>
</html>"#;

    #[test]
    fn test_links_in_page_order() {
        let index = parse_blog("https://ex.com/blog/", INDEX.as_bytes()).unwrap();

        assert_eq!(index.title.as_deref(), Some("Example Blog"));
        assert_eq!(
            index.links,
            vec![
                BlogLink {
                    title: "Second post".to_string(),
                    url: "https://ex.com/blog/second-post/".to_string(),
                },
                BlogLink {
                    title: "First post".to_string(),
                    url: "https://ex.com/blog/first-post/".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_href_concatenated_verbatim() {
        let html = r#"<main><ul><li><a href="/a">A</a></li></ul></main>"#;
        let index = parse_blog("https://ex.com/", html.as_bytes()).unwrap();
        assert_eq!(index.links[0].url, "https://ex.com//a");
        assert_eq!(index.title, None);
    }

    #[test]
    fn test_empty_link_text_allowed() {
        let html = r#"<main><ul><li><a href="x/"></a></li></ul></main>"#;
        let index = parse_blog("https://ex.com/", html.as_bytes()).unwrap();
        assert_eq!(index.links[0].title, "");
    }

    #[test]
    fn test_empty_list_yields_no_links() {
        let html = r#"<main><ul></ul></main>"#;
        let index = parse_blog("https://ex.com/", html.as_bytes()).unwrap();
        assert!(index.links.is_empty());
    }

    #[test]
    fn test_missing_main_is_structure_error() {
        let html = r#"<body><ul><li><a href="a/">A</a></li></ul></body>"#;
        let err = parse_blog("https://ex.com/", html.as_bytes()).unwrap_err();
        assert!(matches!(err, ExtractError::Structure { reason: "no <main> element", .. }));
    }

    #[test]
    fn test_missing_list_is_structure_error() {
        let html = r#"<main><p>No posts yet</p></main>"#;
        let err = parse_blog("https://ex.com/", html.as_bytes()).unwrap_err();
        assert!(matches!(err, ExtractError::Structure { .. }));
        assert!(err.to_string().contains("https://ex.com/"));
    }

    #[test]
    fn test_item_without_href_is_structure_error() {
        let html = r#"<main><ul><li><a>A</a></li></ul></main>"#;
        let err = parse_blog("https://ex.com/", html.as_bytes()).unwrap_err();
        assert!(matches!(err, ExtractError::Structure { reason: "list link without href", .. }));
    }

    #[tokio::test]
    async fn test_extract_fetches_base_url() {
        let transport = StaticTransport::default().with_page("https://ex.com/", INDEX);
        let index = extract_blog(&transport, "https://ex.com/").await.unwrap();

        assert_eq!(index.links.len(), 2);
        assert_eq!(transport.requested(), vec!["https://ex.com/".to_string()]);
    }

    #[tokio::test]
    async fn test_extract_fetch_failure() {
        let transport = StaticTransport::default();
        let err = extract_blog(&transport, "https://ex.com/").await.unwrap_err();
        assert!(matches!(
            err,
            ExtractError::Fetch {
                source: FetchError::HttpStatus(404),
                ..
            }
        ));
    }
}
