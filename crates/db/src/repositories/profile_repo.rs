//! Repository for the `desa_profile` table.
//!
//! The profile is a singleton in practice: reads and updates target the row
//! with the highest id.

use sqlx::PgPool;

use crate::models::profile::{VillageProfile, VillageProfileInput};

const COLUMNS: &str = "id, desa_name, desa_code, sub_district, district, province, \
                       description, vision, mission, history, total_population, \
                       total_families, area_km2, main_livelihoods, village_chief_name, \
                       village_chief_phone, contact_email, contact_phone, address, \
                       image_url, created_at, updated_at";

pub struct ProfileRepo;

impl ProfileRepo {
    /// The active profile, if any has been written.
    pub async fn find_latest(pool: &PgPool) -> Result<Option<VillageProfile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM desa_profile ORDER BY id DESC LIMIT 1");
        sqlx::query_as::<_, VillageProfile>(&query)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new profile row, which becomes the active one.
    pub async fn create(
        pool: &PgPool,
        input: &VillageProfileInput,
    ) -> Result<VillageProfile, sqlx::Error> {
        let query = format!(
            "INSERT INTO desa_profile (
                desa_name, desa_code, sub_district, district, province,
                description, vision, mission, history, total_population,
                total_families, area_km2, main_livelihoods, village_chief_name,
                village_chief_phone, contact_email, contact_phone, address, image_url
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                     $11, $12, $13, $14, $15, $16, $17, $18, $19)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, VillageProfile>(&query)
            .bind(&input.desa_name)
            .bind(&input.desa_code)
            .bind(&input.sub_district)
            .bind(&input.district)
            .bind(&input.province)
            .bind(&input.description)
            .bind(&input.vision)
            .bind(&input.mission)
            .bind(&input.history)
            .bind(input.total_population)
            .bind(input.total_families)
            .bind(input.area_km2)
            .bind(&input.main_livelihoods)
            .bind(&input.village_chief_name)
            .bind(&input.village_chief_phone)
            .bind(&input.contact_email)
            .bind(&input.contact_phone)
            .bind(&input.address)
            .bind(&input.image_url)
            .fetch_one(pool)
            .await
    }

    /// Replace every field of the active profile.
    ///
    /// Returns `None` if no profile exists yet.
    pub async fn update_latest(
        pool: &PgPool,
        input: &VillageProfileInput,
    ) -> Result<Option<VillageProfile>, sqlx::Error> {
        let query = format!(
            "UPDATE desa_profile SET
                desa_name = $1,
                desa_code = $2,
                sub_district = $3,
                district = $4,
                province = $5,
                description = $6,
                vision = $7,
                mission = $8,
                history = $9,
                total_population = $10,
                total_families = $11,
                area_km2 = $12,
                main_livelihoods = $13,
                village_chief_name = $14,
                village_chief_phone = $15,
                contact_email = $16,
                contact_phone = $17,
                address = $18,
                image_url = $19
             WHERE id = (SELECT MAX(id) FROM desa_profile)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, VillageProfile>(&query)
            .bind(&input.desa_name)
            .bind(&input.desa_code)
            .bind(&input.sub_district)
            .bind(&input.district)
            .bind(&input.province)
            .bind(&input.description)
            .bind(&input.vision)
            .bind(&input.mission)
            .bind(&input.history)
            .bind(input.total_population)
            .bind(input.total_families)
            .bind(input.area_km2)
            .bind(&input.main_livelihoods)
            .bind(&input.village_chief_name)
            .bind(&input.village_chief_phone)
            .bind(&input.contact_email)
            .bind(&input.contact_phone)
            .bind(&input.address)
            .bind(&input.image_url)
            .fetch_optional(pool)
            .await
    }
}
