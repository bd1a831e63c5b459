//! Repository for the `struktur_members` table.

use async_trait::async_trait;
use jambakan_core::content::OrgSection;
use jambakan_core::types::DbId;
use sqlx::PgPool;

use crate::models::struktur::{OrgMember, OrgMemberInput};
use crate::resource::Resource;

const COLUMNS: &str = "id, name, position, contact, description, photo_url, section, \
                       order_index, created_at, updated_at";

pub struct StrukturRepo;

/// Section name to store; input is already validated, so an unknown value
/// cannot reach here.
fn section(input: &OrgMemberInput) -> &'static str {
    jambakan_core::content::resolve_section(input.section.as_deref())
        .unwrap_or_default()
        .name()
}

#[async_trait]
impl Resource for StrukturRepo {
    type Row = OrgMember;
    type Input = OrgMemberInput;

    const ENTITY: &'static str = "OrgMember";
    const TABLE: &'static str = "struktur_members";
    const COLUMNS: &'static str = COLUMNS;
    const ORDER_BY: &'static str = "section, order_index, name";

    async fn create(pool: &PgPool, input: &OrgMemberInput) -> Result<OrgMember, sqlx::Error> {
        let query = format!(
            "INSERT INTO struktur_members
                 (name, position, contact, description, photo_url, section, order_index)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OrgMember>(&query)
            .bind(&input.name)
            .bind(&input.position)
            .bind(&input.contact)
            .bind(&input.description)
            .bind(&input.photo_url)
            .bind(section(input))
            .bind(input.order_index)
            .fetch_one(pool)
            .await
    }

    async fn update(
        pool: &PgPool,
        id: DbId,
        input: &OrgMemberInput,
    ) -> Result<Option<OrgMember>, sqlx::Error> {
        let query = format!(
            "UPDATE struktur_members SET
                name = $2,
                position = $3,
                contact = $4,
                description = $5,
                photo_url = $6,
                section = $7,
                order_index = $8
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OrgMember>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.position)
            .bind(&input.contact)
            .bind(&input.description)
            .bind(&input.photo_url)
            .bind(section(input))
            .bind(input.order_index)
            .fetch_optional(pool)
            .await
    }
}

impl StrukturRepo {
    /// Members of one section in display order.
    pub async fn list_by_section(
        pool: &PgPool,
        section: OrgSection,
    ) -> Result<Vec<OrgMember>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM struktur_members WHERE section = $1 ORDER BY order_index, name"
        );
        sqlx::query_as::<_, OrgMember>(&query)
            .bind(section.name())
            .fetch_all(pool)
            .await
    }
}
