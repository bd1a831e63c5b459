//! Domain model structs and DTOs.
//!
//! Each content submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` + `Validate` input DTO used for both create and
//!   full-replace update (`PUT` replaces every mutable field)

pub mod activity;
pub mod admin_session;
pub mod admin_user;
pub mod demographic;
pub mod gallery;
pub mod karawitan;
pub mod profile;
pub mod struktur;
pub mod tenun;
