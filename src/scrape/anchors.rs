//! Anchor extraction from HTML documents

use scraper::{Html, Selector};

/// Returns every anchor `href` in document order
///
/// Parsing is lenient: malformed markup yields whatever anchors the HTML5
/// parser recovers.
pub fn anchors(html: &str) -> Vec<String> {
    let selector = Selector::parse("a[href]").expect("Anchor selector is valid");
    let document = Html::parse_document(html);

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(|href| href.trim().to_string())
        .collect()
}
