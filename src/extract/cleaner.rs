//! Markup stripping for free-text fields

use scraper::Html;

/// Strips markup from a text field and collapses whitespace
///
/// Absent or empty input yields `None`. Anything else is parsed as an HTML
/// fragment; its text nodes are joined with single spaces, every run of
/// whitespace becomes one space, and the result is trimmed. Malformed
/// markup is handled by the HTML parser's error recovery.
///
/// # Examples
///
/// ```
/// use review_harvest::extract::clean_markup;
///
/// let cleaned = clean_markup(Some("<p>Thanks for\n your <b>review</b>!</p>"));
/// assert_eq!(cleaned.as_deref(), Some("Thanks for your review !"));
/// assert_eq!(clean_markup(None), None);
/// ```
pub fn clean_markup(text: Option<&str>) -> Option<String> {
    let text = text.filter(|t| !t.is_empty())?;
    let fragment = Html::parse_fragment(text);

    let joined = fragment.root_element().text().collect::<Vec<_>>().join(" ");
    Some(joined.split_whitespace().collect::<Vec<_>>().join(" "))
}
