//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Content repositories implement
//! [`Resource`](crate::Resource) and only spell out their insert and update
//! statements.

pub mod activity_repo;
pub mod admin_session_repo;
pub mod admin_user_repo;
pub mod demographic_repo;
pub mod gallery_repo;
pub mod karawitan_repo;
pub mod profile_repo;
pub mod struktur_repo;
pub mod tenun_repo;

pub use activity_repo::ActivityRepo;
pub use admin_session_repo::AdminSessionRepo;
pub use admin_user_repo::AdminUserRepo;
pub use demographic_repo::DemographicRepo;
pub use gallery_repo::GalleryRepo;
pub use karawitan_repo::KarawitanRepo;
pub use profile_repo::ProfileRepo;
pub use struktur_repo::StrukturRepo;
pub use tenun_repo::TenunRepo;
