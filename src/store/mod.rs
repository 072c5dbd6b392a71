//! Document store seam.
//!
//! Records are JSON objects grouped in named collections and keyed by an
//! opaque [`RecordId`], stored in the document under `_id`. Two backends are
//! provided: [`postgres::PgStore`] (JSONB rows) and [`memory::MemoryStore`].

pub mod memory;
pub mod postgres;

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::AppResult;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Key under which every document carries its id
pub const ID_FIELD: &str = "_id";

/// Opaque identifier assigned to a record at creation
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Conjunction of field equality conditions.
///
/// When the stored field is an array, the condition holds if the array
/// contains the value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<(String, Value)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.conditions.push((field.to_string(), value.into()));
        self
    }

    pub fn conditions(&self) -> &[(String, Value)] {
        &self.conditions
    }

    pub fn matches(&self, doc: &Value) -> bool {
        self.conditions.iter().all(|(field, expected)| match doc.get(field) {
            Some(Value::Array(items)) => items.contains(expected) || expected == &doc[field],
            Some(actual) => actual == expected,
            None => false,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub field: String,
    pub order: Order,
}

impl Sort {
    pub fn ascending(field: &str) -> Self {
        Self {
            field: field.to_string(),
            order: Order::Ascending,
        }
    }
}

/// Parameters of a `find_all` call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub filter: Filter,
    pub sort: Option<Sort>,
    /// Fields to keep besides `_id`; `None` keeps the whole document
    pub projection: Option<Vec<String>>,
}

impl Query {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn filter(filter: Filter) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    pub fn sorted_by(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn project(mut self, fields: &[&str]) -> Self {
        self.projection = Some(fields.iter().map(|f| f.to_string()).collect());
        self
    }
}

/// Persistence operations consumed by the repository
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Store: Send + Sync {
    async fn find_all(&self, collection: &str, query: Query) -> AppResult<Vec<Value>>;

    async fn find_by_id(&self, collection: &str, id: &RecordId) -> AppResult<Option<Value>>;

    async fn find_one(&self, collection: &str, filter: Filter) -> AppResult<Option<Value>>;

    async fn insert(&self, collection: &str, id: &RecordId, doc: Value) -> AppResult<()>;

    /// Replace the whole document; `false` when no record has this id
    async fn replace_by_id(&self, collection: &str, id: &RecordId, doc: Value) -> AppResult<bool>;

    /// `false` when no record has this id
    async fn delete_by_id(&self, collection: &str, id: &RecordId) -> AppResult<bool>;

    async fn count(&self, collection: &str, filter: Filter) -> AppResult<u64>;
}

/// Keep `_id` and the projected fields of a document
pub(crate) fn project(doc: Value, projection: Option<&[String]>) -> Value {
    let Some(fields) = projection else {
        return doc;
    };
    match doc {
        Value::Object(map) => {
            let kept: Map<String, Value> = map
                .into_iter()
                .filter(|(key, _)| key == ID_FIELD || fields.iter().any(|f| f == key))
                .collect();
            Value::Object(kept)
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_filter_scalar_and_array() {
        let doc = json!({"_id": "b1", "author": "a1", "genre": ["g1", "g2"]});
        assert!(Filter::new().eq("author", "a1").matches(&doc));
        assert!(Filter::new().eq("genre", "g2").matches(&doc));
        assert!(!Filter::new().eq("genre", "g3").matches(&doc));
        assert!(!Filter::new().eq("isbn", "x").matches(&doc));
        assert!(Filter::new().matches(&doc));
    }

    #[test]
    fn test_project_keeps_id() {
        let doc = json!({"_id": "b1", "title": "T", "summary": "S", "author": "a1"});
        let fields = vec!["title".to_string(), "author".to_string()];
        let projected = project(doc, Some(&fields));
        assert_eq!(projected, json!({"_id": "b1", "title": "T", "author": "a1"}));
    }

    #[test]
    fn test_generated_ids_are_distinct() {
        let a = RecordId::generate();
        let b = RecordId::generate();
        assert_ne!(a, b);
        assert!(!a.is_empty());
    }
}
