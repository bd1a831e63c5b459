pub mod auth;
pub mod health;
pub mod profile;
pub mod resource;
pub mod upload;

use axum::routing::get;
use axum::Router;
use jambakan_db::repositories::{
    ActivityRepo, DemographicRepo, GalleryRepo, KarawitanRepo, StrukturRepo, TenunRepo,
};

use crate::handlers::directory;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                          login (public)
/// /auth/logout                         logout
/// /auth/session                        session status (no activity)
/// /auth/session/activity               record activity
/// /auth/session/extend                 restart session, new token
/// /auth/session/resume                 restore after reload
///
/// /activities, /activities/{id}        news items (drafts hidden)
/// /gallery, /gallery/{id}              gallery items
/// /karawitan, /karawitan/{id}          music content
/// /tenun, /tenun/{id}                  weaving products (drafts hidden)
/// /struktur, /struktur/{id}            organisation members
/// /struktur/section/{section}          members of one section
/// /demographics, /demographics/{id}    yearly demographics
/// /demographics/year/{year}            one year's record
///
/// /profile                             village profile (GET, POST, PUT)
/// /upload                              image upload (admin)
/// ```
///
/// Collection and item reads are public; every write requires an admin
/// session.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/activities", resource::router::<ActivityRepo>())
        .nest("/gallery", resource::router::<GalleryRepo>())
        .nest("/karawitan", resource::router::<KarawitanRepo>())
        .nest("/tenun", resource::router::<TenunRepo>())
        .nest(
            "/struktur",
            resource::router::<StrukturRepo>()
                .route("/section/{section}", get(directory::list_struktur_section)),
        )
        .nest(
            "/demographics",
            resource::router::<DemographicRepo>()
                .route("/year/{year}", get(directory::get_demographics_year)),
        )
        .nest("/profile", profile::router())
        .nest("/upload", upload::router())
}
