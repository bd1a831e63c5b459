//! Generic route set for a [`Resource`].

use axum::routing::get;
use axum::Router;
use jambakan_db::Resource;

use crate::handlers::resource;
use crate::state::AppState;

/// Routes mounted at `/{resource}`.
///
/// ```text
/// GET    /       -> list
/// POST   /       -> create
/// GET    /{id}   -> get
/// PUT    /{id}   -> update
/// DELETE /{id}   -> delete
/// ```
pub fn router<R: Resource>() -> Router<AppState> {
    Router::new()
        .route("/", get(resource::list::<R>).post(resource::create::<R>))
        .route(
            "/{id}",
            get(resource::get::<R>)
                .put(resource::update::<R>)
                .delete(resource::delete::<R>),
        )
}
