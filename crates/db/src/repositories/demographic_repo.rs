//! Repository for the `desa_demographics` table.
//!
//! `year` carries the `uq_desa_demographics_year` constraint; inserting or
//! updating onto an existing year surfaces as a unique violation.

use async_trait::async_trait;
use jambakan_core::types::DbId;
use sqlx::PgPool;

use crate::models::demographic::{DemographicRecord, DemographicRecordInput};
use crate::resource::Resource;

const COLUMNS: &str = "id, year, births, deaths, household_count, created_at, updated_at";

pub struct DemographicRepo;

#[async_trait]
impl Resource for DemographicRepo {
    type Row = DemographicRecord;
    type Input = DemographicRecordInput;

    const ENTITY: &'static str = "DemographicRecord";
    const TABLE: &'static str = "desa_demographics";
    const COLUMNS: &'static str = COLUMNS;
    const ORDER_BY: &'static str = "year ASC";

    async fn create(
        pool: &PgPool,
        input: &DemographicRecordInput,
    ) -> Result<DemographicRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO desa_demographics (year, births, deaths, household_count)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DemographicRecord>(&query)
            .bind(input.year)
            .bind(input.births)
            .bind(input.deaths)
            .bind(input.household_count)
            .fetch_one(pool)
            .await
    }

    async fn update(
        pool: &PgPool,
        id: DbId,
        input: &DemographicRecordInput,
    ) -> Result<Option<DemographicRecord>, sqlx::Error> {
        let query = format!(
            "UPDATE desa_demographics SET year = $2, births = $3, deaths = $4, household_count = $5
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DemographicRecord>(&query)
            .bind(id)
            .bind(input.year)
            .bind(input.births)
            .bind(input.deaths)
            .bind(input.household_count)
            .fetch_optional(pool)
            .await
    }
}

impl DemographicRepo {
    /// Look a record up by its (unique) year.
    pub async fn find_by_year(
        pool: &PgPool,
        year: i32,
    ) -> Result<Option<DemographicRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM desa_demographics WHERE year = $1");
        sqlx::query_as::<_, DemographicRecord>(&query)
            .bind(year)
            .fetch_optional(pool)
            .await
    }
}
