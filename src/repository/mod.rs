//! Repository layer: typed access to the document store

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod genres;

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::try_join_all;

use crate::{
    error::AppResult,
    models::Document,
    store::{Filter, Query, RecordId, Store},
};

/// Main repository struct holding the store handle
#[derive(Clone)]
pub struct Repository {
    store: Arc<dyn Store>,
}

impl Repository {
    /// Create a new repository over the given store
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn find_all<T: Document>(&self, query: Query) -> AppResult<Vec<T>> {
        let docs = self.store.find_all(T::COLLECTION, query).await?;
        docs.into_iter()
            .map(|doc| serde_json::from_value(doc).map_err(Into::into))
            .collect()
    }

    pub async fn find_by_id<T: Document>(&self, id: &RecordId) -> AppResult<Option<T>> {
        match self.store.find_by_id(T::COLLECTION, id).await? {
            Some(doc) => Ok(Some(serde_json::from_value(doc)?)),
            None => Ok(None),
        }
    }

    pub async fn find_one<T: Document>(&self, filter: Filter) -> AppResult<Option<T>> {
        match self.store.find_one(T::COLLECTION, filter).await? {
            Some(doc) => Ok(Some(serde_json::from_value(doc)?)),
            None => Ok(None),
        }
    }

    /// Fetch several records concurrently, keyed by id; missing ids are skipped
    pub async fn find_many<'a, T, I>(&self, ids: I) -> AppResult<HashMap<RecordId, T>>
    where
        T: Document,
        I: IntoIterator<Item = &'a RecordId>,
    {
        let mut wanted: Vec<&RecordId> = ids.into_iter().collect();
        wanted.sort();
        wanted.dedup();

        let found = try_join_all(wanted.into_iter().map(|id| self.find_by_id::<T>(id))).await?;
        Ok(found
            .into_iter()
            .flatten()
            .map(|record| (record.id().clone(), record))
            .collect())
    }

    pub async fn insert<T: Document>(&self, record: &T) -> AppResult<()> {
        let doc = serde_json::to_value(record)?;
        self.store.insert(T::COLLECTION, record.id(), doc).await
    }

    /// Full replace of the stored record; `false` when it no longer exists
    pub async fn replace<T: Document>(&self, record: &T) -> AppResult<bool> {
        let doc = serde_json::to_value(record)?;
        self.store.replace_by_id(T::COLLECTION, record.id(), doc).await
    }

    pub async fn delete<T: Document>(&self, id: &RecordId) -> AppResult<bool> {
        self.store.delete_by_id(T::COLLECTION, id).await
    }

    pub async fn count<T: Document>(&self, filter: Filter) -> AppResult<u64> {
        self.store.count(T::COLLECTION, filter).await
    }
}
