//! Repository for the `karawitan` table.

use async_trait::async_trait;
use jambakan_core::types::DbId;
use sqlx::PgPool;

use crate::models::karawitan::{MusicContent, MusicContentInput};
use crate::resource::Resource;

const COLUMNS: &str = "id, title, description, content, image_url, created_at, updated_at";

pub struct KarawitanRepo;

#[async_trait]
impl Resource for KarawitanRepo {
    type Row = MusicContent;
    type Input = MusicContentInput;

    const ENTITY: &'static str = "MusicContent";
    const TABLE: &'static str = "karawitan";
    const COLUMNS: &'static str = COLUMNS;
    const ORDER_BY: &'static str = "created_at DESC, id DESC";

    async fn create(pool: &PgPool, input: &MusicContentInput) -> Result<MusicContent, sqlx::Error> {
        let query = format!(
            "INSERT INTO karawitan (title, description, content, image_url)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MusicContent>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.content)
            .bind(&input.image_url)
            .fetch_one(pool)
            .await
    }

    async fn update(
        pool: &PgPool,
        id: DbId,
        input: &MusicContentInput,
    ) -> Result<Option<MusicContent>, sqlx::Error> {
        let query = format!(
            "UPDATE karawitan SET title = $2, description = $3, content = $4, image_url = $5
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MusicContent>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.content)
            .bind(&input.image_url)
            .fetch_optional(pool)
            .await
    }
}
