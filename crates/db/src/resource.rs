//! Schema-driven description of a flat content table.
//!
//! Every content entity on the site is one table with an id, some text
//! columns and timestamps. A [`Resource`] names the table, its column list
//! and natural ordering; the read and delete queries are derived from those
//! constants, so each repository only spells out its own insert and update
//! bindings.

use async_trait::async_trait;
use jambakan_core::content::STATUS_PUBLISHED;
use jambakan_core::types::DbId;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};
use validator::Validate;

#[async_trait]
pub trait Resource: Send + Sync + 'static {
    /// Row type returned by every query.
    type Row: for<'r> FromRow<'r, PgRow> + Serialize + Send + Unpin + 'static;

    /// Request body accepted by create and full-replace update.
    type Input: DeserializeOwned + Validate + Send + Sync + 'static;

    /// Entity name used in not-found errors and logs.
    const ENTITY: &'static str;

    const TABLE: &'static str;

    /// Comma-separated column list for `SELECT` / `RETURNING`.
    const COLUMNS: &'static str;

    /// `ORDER BY` expression for collection reads.
    const ORDER_BY: &'static str;

    /// Whether the table has a `status` column gating public visibility.
    const PUBLISHABLE: bool = false;

    /// `WHERE` fragment restricting reads to published rows, or empty.
    fn visibility_filter(include_drafts: bool) -> String {
        if Self::PUBLISHABLE && !include_drafts {
            format!("status = '{STATUS_PUBLISHED}'")
        } else {
            String::new()
        }
    }

    /// List the whole collection in natural order.
    async fn list(pool: &PgPool, include_drafts: bool) -> Result<Vec<Self::Row>, sqlx::Error> {
        let filter = Self::visibility_filter(include_drafts);
        let where_clause = if filter.is_empty() {
            String::new()
        } else {
            format!("WHERE {filter} ")
        };
        let query = format!(
            "SELECT {} FROM {} {where_clause}ORDER BY {}",
            Self::COLUMNS,
            Self::TABLE,
            Self::ORDER_BY,
        );
        sqlx::query_as::<_, Self::Row>(&query)
            .fetch_all(pool)
            .await
    }

    /// Find one row. Unpublished rows are hidden unless `include_drafts`.
    async fn find_by_id(
        pool: &PgPool,
        id: DbId,
        include_drafts: bool,
    ) -> Result<Option<Self::Row>, sqlx::Error> {
        let filter = Self::visibility_filter(include_drafts);
        let extra = if filter.is_empty() {
            String::new()
        } else {
            format!(" AND {filter}")
        };
        let query = format!(
            "SELECT {} FROM {} WHERE id = $1{extra}",
            Self::COLUMNS,
            Self::TABLE,
        );
        sqlx::query_as::<_, Self::Row>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a row from a validated input.
    async fn create(pool: &PgPool, input: &Self::Input) -> Result<Self::Row, sqlx::Error>;

    /// Replace every mutable column. Returns `None` if the id does not exist.
    async fn update(
        pool: &PgPool,
        id: DbId,
        input: &Self::Input,
    ) -> Result<Option<Self::Row>, sqlx::Error>;

    /// Delete by id. Returns `true` if a row was removed.
    async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let query = format!("DELETE FROM {} WHERE id = $1", Self::TABLE);
        let result = sqlx::query(&query).bind(id).execute(pool).await?;
        Ok(result.rows_affected() > 0)
    }
}
