//! Book instance domain methods on Repository

use super::Repository;
use crate::{
    error::AppResult,
    models::{BookInstance, BookStatus},
    store::{Filter, Query, RecordId},
};

impl Repository {
    pub async fn book_instances_list(&self) -> AppResult<Vec<BookInstance>> {
        self.find_all(Query::all()).await
    }

    pub async fn book_instances_get_by_id(&self, id: &RecordId) -> AppResult<Option<BookInstance>> {
        self.find_by_id(id).await
    }

    pub async fn book_instances_count_with_status(&self, status: BookStatus) -> AppResult<u64> {
        self.count::<BookInstance>(Filter::new().eq("status", status.as_str()))
            .await
    }
}
