//! Genre domain methods on Repository

use super::Repository;
use crate::{
    error::AppResult,
    models::{Book, Genre},
    store::{Filter, Query, RecordId, Sort},
};

impl Repository {
    /// List all genres by name
    pub async fn genres_list(&self) -> AppResult<Vec<Genre>> {
        self.find_all(Query::all().sorted_by(Sort::ascending("name")))
            .await
    }

    pub async fn genres_get_by_id(&self, id: &RecordId) -> AppResult<Option<Genre>> {
        self.find_by_id(id).await
    }

    pub async fn genres_find_by_name(&self, name: &str) -> AppResult<Option<Genre>> {
        self.find_one(Filter::new().eq("name", name)).await
    }

    /// Books listing the genre among their genres
    pub async fn genres_books(&self, id: &RecordId) -> AppResult<Vec<Book>> {
        self.find_all(Query::filter(Filter::new().eq("genre", id.as_str())))
            .await
    }
}
