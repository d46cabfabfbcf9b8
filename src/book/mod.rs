//! Book records and their extraction from leaf pages

mod fields;

pub use fields::{extract, strip_author_label, AUTHOR_LABEL, MAIN_CONTENT};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Structured record extracted from one leaf page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub title: String,

    /// Author with the "Author:" label removed
    pub author: String,

    /// Librarian's note on the book
    pub annotation: String,

    /// Category labels in document order, duplicates kept
    pub tags: Vec<String>,

    /// One entry per paragraph in document order
    pub content: Vec<String>,

    /// Absolute URL the record was extracted from
    pub source: String,
}

/// Plain-text rendering: a `%`-prefixed title block followed by the paragraphs
impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "% {}", self.title)?;
        writeln!(f, "% {}", self.author)?;
        writeln!(f, "% {}", self.annotation)?;
        writeln!(f, "% {}", self.tags.join(", "))?;
        writeln!(f, "% {}", self.source)?;
        writeln!(f)?;

        for paragraph in &self.content {
            writeln!(f, "{}", paragraph)?;
            writeln!(f)?;
        }

        Ok(())
    }
}
