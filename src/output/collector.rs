use crate::book::{extract, Book};
use crate::output::traits::Visitor;
use crate::Result;
use scraper::Html;
use url::Url;

/// Visitor that extracts a book record from every leaf
#[derive(Debug, Default)]
pub struct RecordCollector {
    books: Vec<Book>,
}

impl RecordCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records collected so far, in visit order
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn into_books(self) -> Vec<Book> {
        self.books
    }
}

impl Visitor for RecordCollector {
    fn visit(&mut self, document: &Html, url: &Url) -> Result<()> {
        let book = extract(document, url);
        tracing::debug!("Extracted '{}' from {}", book.title, url);
        self.books.push(book);
        Ok(())
    }
}
