//! In-process document store

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::{project, Filter, Order, Query, RecordId, Store};
use crate::error::AppResult;

/// Collections kept in insertion order. Clones share the same data.
#[derive(Clone, Default)]
pub struct MemoryStore {
    collections: Arc<RwLock<HashMap<String, Vec<(RecordId, Value)>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn compare_field(a: &Value, b: &Value, field: &str) -> Ordering {
    match (a.get(field), b.get(field)) {
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(x), Some(y)) => x.to_string().cmp(&y.to_string()),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn find_all(&self, collection: &str, query: Query) -> AppResult<Vec<Value>> {
        let collections = self.collections.read().await;
        let mut docs: Vec<Value> = collections
            .get(collection)
            .map(|records| {
                records
                    .iter()
                    .filter(|(_, doc)| query.filter.matches(doc))
                    .map(|(_, doc)| doc.clone())
                    .collect()
            })
            .unwrap_or_default();

        if let Some(sort) = &query.sort {
            docs.sort_by(|a, b| {
                let ord = compare_field(a, b, &sort.field);
                match sort.order {
                    Order::Ascending => ord,
                    Order::Descending => ord.reverse(),
                }
            });
        }

        Ok(docs
            .into_iter()
            .map(|doc| project(doc, query.projection.as_deref()))
            .collect())
    }

    async fn find_by_id(&self, collection: &str, id: &RecordId) -> AppResult<Option<Value>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|records| records.iter().find(|(key, _)| key == id))
            .map(|(_, doc)| doc.clone()))
    }

    async fn find_one(&self, collection: &str, filter: Filter) -> AppResult<Option<Value>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|records| records.iter().find(|(_, doc)| filter.matches(doc)))
            .map(|(_, doc)| doc.clone()))
    }

    async fn insert(&self, collection: &str, id: &RecordId, doc: Value) -> AppResult<()> {
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .push((id.clone(), doc));
        Ok(())
    }

    async fn replace_by_id(&self, collection: &str, id: &RecordId, doc: Value) -> AppResult<bool> {
        let mut collections = self.collections.write().await;
        let slot = collections
            .get_mut(collection)
            .and_then(|records| records.iter_mut().find(|(key, _)| key == id));
        match slot {
            Some((_, stored)) => {
                *stored = doc;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_by_id(&self, collection: &str, id: &RecordId) -> AppResult<bool> {
        let mut collections = self.collections.write().await;
        let Some(records) = collections.get_mut(collection) else {
            return Ok(false);
        };
        let before = records.len();
        records.retain(|(key, _)| key != id);
        Ok(records.len() != before)
    }

    async fn count(&self, collection: &str, filter: Filter) -> AppResult<u64> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|records| records.iter().filter(|(_, doc)| filter.matches(doc)).count() as u64)
            .unwrap_or(0))
    }
}
