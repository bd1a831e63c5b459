//! Repository for the `activities` table.

use async_trait::async_trait;
use jambakan_core::content::{resolve_status, DEFAULT_NEWS_CATEGORY};
use jambakan_core::types::DbId;
use sqlx::PgPool;

use crate::models::activity::{Activity, ActivityInput};
use crate::resource::Resource;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, content, category, image_url, event_date, \
                       status, created_at, updated_at";

/// Provides CRUD operations for news items.
pub struct ActivityRepo;

/// Stored as sent unless blank, which falls back to the default category.
fn category(input: &ActivityInput) -> &str {
    input
        .category
        .as_deref()
        .filter(|c| !c.trim().is_empty())
        .unwrap_or(DEFAULT_NEWS_CATEGORY)
}

/// Status name to store; input is already validated.
fn status(input: &ActivityInput) -> &'static str {
    resolve_status(input.status.as_deref())
        .unwrap_or_default()
        .name()
}

#[async_trait]
impl Resource for ActivityRepo {
    type Row = Activity;
    type Input = ActivityInput;

    const ENTITY: &'static str = "Activity";
    const TABLE: &'static str = "activities";
    const COLUMNS: &'static str = COLUMNS;
    const ORDER_BY: &'static str = "event_date DESC NULLS LAST, created_at DESC";
    const PUBLISHABLE: bool = true;

    async fn create(pool: &PgPool, input: &ActivityInput) -> Result<Activity, sqlx::Error> {
        let query = format!(
            "INSERT INTO activities (title, description, content, category, image_url, event_date, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Activity>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.content)
            .bind(category(input))
            .bind(&input.image_url)
            .bind(input.event_date)
            .bind(status(input))
            .fetch_one(pool)
            .await
    }

    async fn update(
        pool: &PgPool,
        id: DbId,
        input: &ActivityInput,
    ) -> Result<Option<Activity>, sqlx::Error> {
        let query = format!(
            "UPDATE activities SET
                title = $2,
                description = $3,
                content = $4,
                category = $5,
                image_url = $6,
                event_date = $7,
                status = $8
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Activity>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.content)
            .bind(category(input))
            .bind(&input.image_url)
            .bind(input.event_date)
            .bind(status(input))
            .fetch_optional(pool)
            .await
    }
}
