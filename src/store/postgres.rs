//! PostgreSQL document store: one JSONB row per record in `documents`

use async_trait::async_trait;
use serde_json::Value;
use sqlx::{Pool, Postgres, QueryBuilder};

use super::{project, Filter, Order, Query, RecordId, Store};
use crate::error::AppResult;

#[derive(Clone)]
pub struct PgStore {
    pool: Pool<Postgres>,
}

impl PgStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Apply the embedded schema migrations
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }
}

fn select_from<'a>(columns: &str, collection: &str) -> QueryBuilder<'a, Postgres> {
    let mut builder = QueryBuilder::new(format!(
        "SELECT {} FROM documents WHERE collection = ",
        columns
    ));
    builder.push_bind(collection.to_string());
    builder
}

/// Scalar fields compare with `=`, array fields match when they contain the value
fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &Filter) {
    for (field, value) in filter.conditions() {
        builder.push(" AND ((body -> ");
        builder.push_bind(field.clone());
        builder.push(") = ");
        builder.push_bind(value.clone());
        builder.push(" OR (body -> ");
        builder.push_bind(field.clone());
        builder.push(") @> jsonb_build_array(");
        builder.push_bind(value.clone());
        builder.push("))");
    }
}

#[async_trait]
impl Store for PgStore {
    async fn find_all(&self, collection: &str, query: Query) -> AppResult<Vec<Value>> {
        let mut builder = select_from("body", collection);
        push_filter(&mut builder, &query.filter);
        match &query.sort {
            Some(sort) => {
                builder.push(" ORDER BY body ->> ");
                builder.push_bind(sort.field.clone());
                builder.push(match sort.order {
                    Order::Ascending => " ASC",
                    Order::Descending => " DESC",
                });
            }
            None => {
                builder.push(" ORDER BY seq");
            }
        }

        let rows: Vec<Value> = builder.build_query_scalar().fetch_all(&self.pool).await?;
        Ok(rows
            .into_iter()
            .map(|doc| project(doc, query.projection.as_deref()))
            .collect())
    }

    async fn find_by_id(&self, collection: &str, id: &RecordId) -> AppResult<Option<Value>> {
        let doc = sqlx::query_scalar::<_, Value>(
            "SELECT body FROM documents WHERE collection = $1 AND id = $2",
        )
        .bind(collection)
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await?;
        Ok(doc)
    }

    async fn find_one(&self, collection: &str, filter: Filter) -> AppResult<Option<Value>> {
        let mut builder = select_from("body", collection);
        push_filter(&mut builder, &filter);
        builder.push(" ORDER BY seq LIMIT 1");
        let doc: Option<Value> = builder
            .build_query_scalar()
            .fetch_optional(&self.pool)
            .await?;
        Ok(doc)
    }

    async fn insert(&self, collection: &str, id: &RecordId, doc: Value) -> AppResult<()> {
        sqlx::query("INSERT INTO documents (collection, id, body) VALUES ($1, $2, $3)")
            .bind(collection)
            .bind(id.as_str())
            .bind(doc)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn replace_by_id(&self, collection: &str, id: &RecordId, doc: Value) -> AppResult<bool> {
        let result =
            sqlx::query("UPDATE documents SET body = $3 WHERE collection = $1 AND id = $2")
                .bind(collection)
                .bind(id.as_str())
                .bind(doc)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_id(&self, collection: &str, id: &RecordId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id.as_str())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self, collection: &str, filter: Filter) -> AppResult<u64> {
        let mut builder = select_from("COUNT(*)", collection);
        push_filter(&mut builder, &filter);
        let count: i64 = builder.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(count.max(0) as u64)
    }
}
