//! Field extraction from a book page
//!
//! Every field lives at a fixed structural path in the archive's markup. The
//! markup is hand-edited and inconsistently omits optional sections, so a
//! missing node yields an empty value instead of an error.

use super::Book;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Main content container of a page
pub const MAIN_CONTENT: &str = "#main";

/// Label some author blocks carry in front of the name
pub const AUTHOR_LABEL: &str = "Author:";

const TITLE: &str = "#main > h1";
const AUTHOR: &str = ".node.node-book > div:nth-of-type(3) > div:nth-of-type(1) > div > div";
const ANNOTATION: &str =
    ".node.node-book > div:nth-of-type(3) > div:nth-of-type(2) > div > div > p";
const TAGS: &str = ".node.node-book > div:nth-of-type(2) > ul > li > a";
const CONTENT: &str = ".node.node-book > div:nth-of-type(3) > p";

/// Extracts a book record from a parsed leaf page
///
/// Never fails: each field is looked up independently and left empty when
/// its node is absent. All text is trimmed.
///
/// # Example
///
/// ```
/// use lorekeeper::book::extract;
/// use scraper::Html;
/// use url::Url;
///
/// let html = Html::parse_document(r#"<div id="main"><h1> Nerevar </h1></div>"#);
/// let source = Url::parse("https://www.example.com/books/nerevar").unwrap();
/// let book = extract(&html, &source);
/// assert_eq!(book.title, "Nerevar");
/// assert!(book.author.is_empty());
/// ```
pub fn extract(document: &Html, source: &Url) -> Book {
    Book {
        title: first_text(document, TITLE).unwrap_or_default(),
        author: first_text(document, AUTHOR)
            .map(|text| strip_author_label(&text).to_string())
            .unwrap_or_default(),
        annotation: first_text(document, ANNOTATION).unwrap_or_default(),
        tags: all_text(document, TAGS),
        content: all_text(document, CONTENT),
        source: source.to_string(),
    }
}

/// Removes a leading "Author:" label and surrounding whitespace
pub fn strip_author_label(text: &str) -> &str {
    let text = text.trim();
    text.strip_prefix(AUTHOR_LABEL).unwrap_or(text).trim()
}

/// Trimmed text of the first element matching `css`
fn first_text(document: &Html, css: &str) -> Option<String> {
    let selector = Selector::parse(css).ok()?;
    document.select(&selector).next().map(element_text)
}

/// Trimmed text of every element matching `css`, in document order
fn all_text(document: &Html, css: &str) -> Vec<String> {
    match Selector::parse(css) {
        Ok(selector) => document.select(&selector).map(element_text).collect(),
        Err(_) => Vec::new(),
    }
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
