//! Catalog records and their derived display values

pub mod author;
pub mod book;
pub mod book_instance;
pub mod genre;

use chrono::NaiveDate;
use serde::{de::DeserializeOwned, Serialize};

use crate::store::RecordId;

// Re-export commonly used types
pub use author::Author;
pub use book::Book;
pub use book_instance::{BookInstance, BookStatus};
pub use genre::Genre;

/// A record stored as one document of a named collection
pub trait Document: Serialize + DeserializeOwned + Send + Sync + 'static {
    const COLLECTION: &'static str;

    fn id(&self) -> &RecordId;
}

/// `YYYY-MM-DD`, or an empty string when there is no date
pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
