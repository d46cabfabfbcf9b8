use crate::book::Book;
use crate::Result;
use std::io::Write;

/// Serialization format for collected records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON array
    #[default]
    Json,
    /// Indented JSON array
    JsonPretty,
    /// Plain-text title block and paragraphs per book
    Text,
}

/// Writes the records to `writer` in the given format
///
/// # Example
///
/// ```
/// use lorekeeper::book::Book;
/// use lorekeeper::output::{write_books, OutputFormat};
///
/// let books = vec![Book { title: "Nerevar".to_string(), ..Book::default() }];
/// let mut out = Vec::new();
/// write_books(&books, OutputFormat::Json, &mut out).unwrap();
/// assert!(String::from_utf8(out).unwrap().starts_with(r#"[{"title":"Nerevar""#));
/// ```
pub fn write_books<W: Write>(books: &[Book], format: OutputFormat, mut writer: W) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer(&mut writer, books)?;
            writeln!(writer)?;
        }
        OutputFormat::JsonPretty => {
            serde_json::to_writer_pretty(&mut writer, books)?;
            writeln!(writer)?;
        }
        OutputFormat::Text => {
            for book in books {
                write!(writer, "{}", book)?;
            }
        }
    }

    writer.flush()?;
    Ok(())
}
