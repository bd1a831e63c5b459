//! Repository for the `tenun_products` table.

use async_trait::async_trait;
use jambakan_core::content::resolve_status;
use jambakan_core::types::DbId;
use sqlx::PgPool;

use crate::models::tenun::{WeavingProduct, WeavingProductInput};
use crate::resource::Resource;

const COLUMNS: &str = "id, title, description, image_url, technique, material, price, status, \
                       created_at, updated_at";

pub struct TenunRepo;

/// Status name to store; input is already validated.
fn status(input: &WeavingProductInput) -> &'static str {
    resolve_status(input.status.as_deref())
        .unwrap_or_default()
        .name()
}

#[async_trait]
impl Resource for TenunRepo {
    type Row = WeavingProduct;
    type Input = WeavingProductInput;

    const ENTITY: &'static str = "WeavingProduct";
    const TABLE: &'static str = "tenun_products";
    const COLUMNS: &'static str = COLUMNS;
    const ORDER_BY: &'static str = "created_at DESC, id DESC";
    const PUBLISHABLE: bool = true;

    async fn create(
        pool: &PgPool,
        input: &WeavingProductInput,
    ) -> Result<WeavingProduct, sqlx::Error> {
        let query = format!(
            "INSERT INTO tenun_products (title, description, image_url, technique, material, price, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WeavingProduct>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.image_url)
            .bind(&input.technique)
            .bind(&input.material)
            .bind(input.price)
            .bind(status(input))
            .fetch_one(pool)
            .await
    }

    async fn update(
        pool: &PgPool,
        id: DbId,
        input: &WeavingProductInput,
    ) -> Result<Option<WeavingProduct>, sqlx::Error> {
        let query = format!(
            "UPDATE tenun_products SET
                title = $2,
                description = $3,
                image_url = $4,
                technique = $5,
                material = $6,
                price = $7,
                status = $8
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WeavingProduct>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.image_url)
            .bind(&input.technique)
            .bind(&input.material)
            .bind(input.price)
            .bind(status(input))
            .fetch_optional(pool)
            .await
    }
}
