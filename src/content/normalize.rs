use scraper::ElementRef;

use crate::document::following_elements;
use crate::util::wrap_line;

/// Column width prose lines are wrapped to.
pub const WRAP_WIDTH: usize = 80;

/// Joins wrapped lines and consecutive elements: a newline plus six spaces.
pub const SEPARATOR: &str = "\n      ";

/// Elements dropped from the body entirely.
const SKIPPED: [&str; 3] = ["link", "script", "object"];

/// Elements whose markup is kept byte-for-byte.
const VERBATIM: [&str; 2] = ["pre", "code"];

/// Flattens an article body into wrapped markup, starting at its first paragraph.
///
/// The paragraph and each element sibling after it are serialized in
/// document order. `<pre>` and `<code>` blocks are emitted unchanged; every
/// other element is split on its own newlines and each line is word-wrapped
/// to [`WRAP_WIDTH`] columns. Lines and elements are joined with
/// [`SEPARATOR`], and one more separator ends the output.
///
/// The result is markup, not text: entities are left as serialized, and
/// callers must embed it as HTML content.
pub fn normalize(first_paragraph: &ElementRef<'_>) -> String {
    let fragments: Vec<String> = std::iter::once(*first_paragraph)
        .chain(following_elements(first_paragraph))
        .filter(|el| !SKIPPED.contains(&el.value().name()))
        .map(|el| fragment(&el))
        .collect();

    let mut content = fragments.join(SEPARATOR);
    content.push_str(SEPARATOR);
    content
}

fn fragment(el: &ElementRef<'_>) -> String {
    let markup = el.html();
    if VERBATIM.contains(&el.value().name()) {
        return markup;
    }

    markup
        .split('\n')
        .flat_map(|line| wrap_line(line, WRAP_WIDTH))
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}
