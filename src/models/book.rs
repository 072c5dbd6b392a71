//! Book model

use serde::{Deserialize, Serialize};

use super::Document;
use crate::store::RecordId;

/// A title in the catalog. `author` and `genre` hold ids, resolved on demand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Book {
    #[serde(rename = "_id")]
    pub id: RecordId,
    pub title: String,
    pub author: RecordId,
    pub summary: String,
    pub isbn: String,
    pub genre: Vec<RecordId>,
}

impl Book {
    pub fn url(&self) -> String {
        format!("/catalog/book/{}", self.id)
    }
}

impl Document for Book {
    const COLLECTION: &'static str = "books";

    fn id(&self) -> &RecordId {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_projected_document_fills_defaults() {
        let book: Book =
            serde_json::from_value(json!({"_id": "b1", "title": "Dune", "author": "a1"})).unwrap();
        assert_eq!(book.url(), "/catalog/book/b1");
        assert_eq!(book.author, RecordId::from("a1"));
        assert!(book.summary.is_empty());
        assert!(book.genre.is_empty());
    }
}
