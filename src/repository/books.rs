//! Book domain methods on Repository

use super::Repository;
use crate::{
    error::AppResult,
    models::{Book, BookInstance},
    store::{Filter, Query, RecordId},
};

impl Repository {
    /// All books, title and author only
    pub async fn books_list(&self) -> AppResult<Vec<Book>> {
        self.find_all(Query::all().project(&["title", "author"])).await
    }

    /// Titles for the copy form's book selector
    pub async fn books_titles(&self) -> AppResult<Vec<Book>> {
        self.find_all(Query::all().project(&["title"])).await
    }

    pub async fn books_get_by_id(&self, id: &RecordId) -> AppResult<Option<Book>> {
        self.find_by_id(id).await
    }

    /// Copies of the book
    pub async fn books_instances(&self, id: &RecordId) -> AppResult<Vec<BookInstance>> {
        self.find_all(Query::filter(Filter::new().eq("book", id.as_str())))
            .await
    }
}
