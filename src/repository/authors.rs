//! Author domain methods on Repository

use super::Repository;
use crate::{
    error::AppResult,
    models::{Author, Book},
    store::{Filter, Query, RecordId, Sort},
};

impl Repository {
    /// List all authors by family name
    pub async fn authors_list(&self) -> AppResult<Vec<Author>> {
        self.find_all(Query::all().sorted_by(Sort::ascending("family_name")))
            .await
    }

    pub async fn authors_get_by_id(&self, id: &RecordId) -> AppResult<Option<Author>> {
        self.find_by_id(id).await
    }

    /// Books written by the author, title and summary only
    pub async fn authors_books(&self, id: &RecordId) -> AppResult<Vec<Book>> {
        self.find_all(
            Query::filter(Filter::new().eq("author", id.as_str())).project(&["title", "summary"]),
        )
        .await
    }
}
