//! Repository for the `gallery` table.

use async_trait::async_trait;
use jambakan_core::types::DbId;
use sqlx::PgPool;

use crate::models::gallery::{GalleryItem, GalleryItemInput};
use crate::resource::Resource;

const COLUMNS: &str = "id, title, description, image_url, category, created_at, updated_at";

pub struct GalleryRepo;

#[async_trait]
impl Resource for GalleryRepo {
    type Row = GalleryItem;
    type Input = GalleryItemInput;

    const ENTITY: &'static str = "GalleryItem";
    const TABLE: &'static str = "gallery";
    const COLUMNS: &'static str = COLUMNS;
    const ORDER_BY: &'static str = "created_at DESC, id DESC";

    async fn create(pool: &PgPool, input: &GalleryItemInput) -> Result<GalleryItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO gallery (title, description, image_url, category)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GalleryItem>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.image_url)
            .bind(&input.category)
            .fetch_one(pool)
            .await
    }

    async fn update(
        pool: &PgPool,
        id: DbId,
        input: &GalleryItemInput,
    ) -> Result<Option<GalleryItem>, sqlx::Error> {
        let query = format!(
            "UPDATE gallery SET title = $2, description = $3, image_url = $4, category = $5
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GalleryItem>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.image_url)
            .bind(&input.category)
            .fetch_optional(pool)
            .await
    }
}
