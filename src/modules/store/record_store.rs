use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use std::marker::PhantomData;

use crate::core::error::{AppError, Result};
use crate::modules::store::{Entity, Fields, Filter, Value};
use crate::shared::types::PaginationQuery;

/// CRUD over a single entity type. Every write is one committed statement.
#[async_trait]
pub trait RecordStore<E: Entity>: Send + Sync {
    /// First row (in `id` order) matching the filter
    async fn get(&self, filter: &Filter) -> Result<Option<E>>;

    /// Matching rows in `id` order; without pagination the whole set is returned
    async fn list(
        &self,
        filter: Option<&Filter>,
        page: Option<&PaginationQuery>,
    ) -> Result<Vec<E>>;

    async fn count(&self, filter: Option<&Filter>) -> Result<i64>;

    /// Insert a row and return it with its generated `id`
    async fn create(&self, fields: &Fields) -> Result<E>;

    /// Merge `patch` over `existing` and return the refreshed row.
    ///
    /// Returns `None` when `existing` is `None` or the row vanished before the
    /// write. Patch keys outside the entity's columns are ignored.
    async fn update(&self, existing: Option<E>, patch: &Fields) -> Result<Option<E>>;

    /// Delete by id, returning the number of rows removed (0 is not an error)
    async fn delete(&self, id: i64) -> Result<u64>;
}

/// SQLite-backed [`RecordStore`]
pub struct SqlRecordStore<E> {
    pool: SqlitePool,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> SqlRecordStore<E> {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }

    fn column_list() -> String {
        std::iter::once("id")
            .chain(E::COLUMNS.iter().copied())
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn select() -> QueryBuilder<'static, Sqlite> {
        QueryBuilder::new(format!("SELECT {} FROM {}", Self::column_list(), E::TABLE))
    }

    fn push_filter(
        builder: &mut QueryBuilder<'static, Sqlite>,
        filter: Option<&Filter>,
    ) -> Result<()> {
        let Some(filter) = filter else {
            return Ok(());
        };

        for (i, (column, value)) in filter.conditions().iter().enumerate() {
            // Column names are interpolated, so they must come from the schema
            if !E::has_column(column) {
                return Err(AppError::Internal(format!(
                    "Unknown column `{}` for table `{}`",
                    column,
                    E::TABLE
                )));
            }
            builder.push(if i == 0 { " WHERE " } else { " AND " });
            builder.push(*column).push(" = ");
            push_value(builder, value);
        }

        Ok(())
    }

    fn db_error(action: &str, e: sqlx::Error) -> AppError {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_unique_violation() {
                tracing::warn!(
                    "Unique constraint rejected {} on {}: {}",
                    action,
                    E::TABLE,
                    db_err
                );
                return AppError::Conflict(format!(
                    "{} violates a uniqueness constraint on {}",
                    action,
                    E::TABLE
                ));
            }
        }

        tracing::error!("Failed to {} {}: {:?}", action, E::TABLE, e);
        AppError::Database(e)
    }
}

fn push_value(builder: &mut QueryBuilder<'static, Sqlite>, value: &Value) {
    match value {
        Value::Integer(v) => builder.push_bind(*v),
        Value::Real(v) => builder.push_bind(*v),
        Value::Text(v) => builder.push_bind(v.clone()),
    };
}

#[async_trait]
impl<E: Entity> RecordStore<E> for SqlRecordStore<E> {
    async fn get(&self, filter: &Filter) -> Result<Option<E>> {
        let mut builder = Self::select();
        Self::push_filter(&mut builder, Some(filter))?;
        builder.push(" ORDER BY id LIMIT 1");

        builder
            .build_query_as::<E>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Self::db_error("get", e))
    }

    async fn list(
        &self,
        filter: Option<&Filter>,
        page: Option<&PaginationQuery>,
    ) -> Result<Vec<E>> {
        let mut builder = Self::select();
        Self::push_filter(&mut builder, filter)?;
        builder.push(" ORDER BY id");

        if let Some(page) = page {
            builder.push(" LIMIT ").push_bind(page.limit());
            builder.push(" OFFSET ").push_bind(page.offset());
        }

        builder
            .build_query_as::<E>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| Self::db_error("list", e))
    }

    async fn count(&self, filter: Option<&Filter>) -> Result<i64> {
        let mut builder = QueryBuilder::new(format!("SELECT COUNT(*) FROM {}", E::TABLE));
        Self::push_filter(&mut builder, filter)?;

        builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| Self::db_error("count", e))
    }

    async fn create(&self, fields: &Fields) -> Result<E> {
        let columns = fields.writable::<E>();
        if columns.is_empty() {
            return Err(AppError::BadRequest(format!(
                "No writable fields supplied for {}",
                E::TABLE
            )));
        }

        let mut builder = QueryBuilder::new(format!("INSERT INTO {} (", E::TABLE));
        let names: Vec<&str> = columns.iter().map(|(c, _)| *c).collect();
        builder.push(names.join(", ")).push(") VALUES (");
        for (i, (_, value)) in columns.iter().enumerate() {
            if i > 0 {
                builder.push(", ");
            }
            push_value(&mut builder, value);
        }
        builder.push(format!(") RETURNING {}", Self::column_list()));

        let created = builder
            .build_query_as::<E>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| Self::db_error("create", e))?;

        tracing::debug!("Created {} row id={}", E::TABLE, created.id());
        Ok(created)
    }

    async fn update(&self, existing: Option<E>, patch: &Fields) -> Result<Option<E>> {
        let Some(existing) = existing else {
            return Ok(None);
        };

        let columns = patch.writable::<E>();
        if columns.is_empty() {
            return Ok(Some(existing));
        }

        let mut builder = QueryBuilder::new(format!("UPDATE {} SET ", E::TABLE));
        for (i, (column, value)) in columns.iter().enumerate() {
            if i > 0 {
                builder.push(", ");
            }
            builder.push(*column).push(" = ");
            push_value(&mut builder, value);
        }
        builder.push(" WHERE id = ").push_bind(existing.id());
        builder.push(format!(" RETURNING {}", Self::column_list()));

        let updated = builder
            .build_query_as::<E>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Self::db_error("update", e))?;

        tracing::debug!("Updated {} row id={}", E::TABLE, existing.id());
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> Result<u64> {
        let sql = format!("DELETE FROM {} WHERE id = ?", E::TABLE);
        let result = sqlx::query(&sql)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| Self::db_error("delete", e))?;

        Ok(result.rows_affected())
    }
}
