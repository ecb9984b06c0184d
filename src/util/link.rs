/// Joins a blog base URL and an href taken from the blog index.
///
/// This is plain concatenation, not URL resolution: the href is assumed to be
/// a suffix relative to `base`. `..` segments, absolute hrefs and scheme
/// changes are not handled, and `base` must carry its trailing slash for the
/// result to be the intended page.
///
/// ```
/// use blogfeed::util::join_relative;
///
/// assert_eq!(join_relative("https://ex.com/blog/", "post-1/"), "https://ex.com/blog/post-1/");
/// // A leading slash is kept verbatim
/// assert_eq!(join_relative("https://ex.com/", "/a"), "https://ex.com//a");
/// ```
pub fn join_relative(base: &str, href: &str) -> String {
    let mut joined = String::with_capacity(base.len() + href.len());
    joined.push_str(base);
    joined.push_str(href);
    joined
}
