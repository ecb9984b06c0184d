//! Navigable view over a fetched HTML page.
//!
//! Lookups return `Option` for "not there"; errors are reserved for selectors
//! that fail to parse.

use scraper::{ElementRef, Html, Selector};

use crate::extract::ExtractError;

/// A parsed HTML document.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses raw page bytes. Invalid UTF-8 is replaced rather than rejected.
    pub fn parse(bytes: &[u8]) -> Self {
        let text = String::from_utf8_lossy(bytes);
        Self {
            html: Html::parse_document(&text),
        }
    }

    /// First element matching `css` anywhere in the document.
    pub fn find_first(&self, css: &str) -> Result<Option<ElementRef<'_>>, ExtractError> {
        let selector = selector(css)?;
        Ok(self.html.select(&selector).next())
    }

    /// Text of the document's `<title>`, trimmed. `None` when absent or blank.
    pub fn title(&self) -> Result<Option<String>, ExtractError> {
        Ok(self
            .find_first("title")?
            .map(|el| text_of(&el).trim().to_string())
            .filter(|t| !t.is_empty()))
    }
}

/// First descendant of `scope` matching `css`.
pub fn find_first_in<'a>(
    scope: &ElementRef<'a>,
    css: &str,
) -> Result<Option<ElementRef<'a>>, ExtractError> {
    let selector = selector(css)?;
    Ok(scope.select(&selector).next())
}

/// All descendants of `scope` matching `css`, in document order.
pub fn find_all_in<'a>(scope: &ElementRef<'a>, css: &str) -> Result<Vec<ElementRef<'a>>, ExtractError> {
    let selector = selector(css)?;
    Ok(scope.select(&selector).collect())
}

/// Element siblings after `el`, skipping text and comment nodes.
pub fn following_elements<'a>(el: &ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    el.next_siblings().filter_map(ElementRef::wrap)
}

/// Concatenated text content of an element.
pub fn text_of(el: &ElementRef<'_>) -> String {
    el.text().collect()
}

fn selector(css: &str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|e| ExtractError::Selector(format!("{css}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_first_missing_is_none() {
        let doc = Document::parse(b"<html><body><p>hi</p></body></html>");
        assert!(doc.find_first("main").unwrap().is_none());
        assert!(doc.find_first("p").unwrap().is_some());
    }

    #[test]
    fn test_invalid_selector_is_error() {
        let doc = Document::parse(b"<p>hi</p>");
        let result = doc.find_first("p[");
        assert!(matches!(result, Err(ExtractError::Selector(_))));
    }

    #[test]
    fn test_title_trimmed_and_blank_is_none() {
        let doc = Document::parse(b"<html><head><title>  My Blog \n</title></head></html>");
        assert_eq!(doc.title().unwrap().as_deref(), Some("My Blog"));

        let blank = Document::parse(b"<html><head><title>   </title></head></html>");
        assert_eq!(blank.title().unwrap(), None);

        let missing = Document::parse(b"<html><body></body></html>");
        assert_eq!(missing.title().unwrap(), None);
    }

    #[test]
    fn test_following_elements_skip_text_and_comments() {
        let doc = Document::parse(
            b"<article><p>one</p> text <!-- note --><div>two</div>\n<pre>three</pre></article>",
        );
        let first = doc.find_first("article p").unwrap().unwrap();
        let names: Vec<&str> = following_elements(&first)
            .map(|el| el.value().name())
            .collect();
        assert_eq!(names, vec!["div", "pre"]);
    }

    #[test]
    fn test_lossy_utf8_still_parses() {
        let doc = Document::parse(b"<p>caf\xe9</p>");
        let p = doc.find_first("p").unwrap().unwrap();
        assert!(text_of(&p).starts_with("caf"));
    }
}
