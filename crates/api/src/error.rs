use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use jambakan_core::error::CoreError;
use serde::Serialize;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Every variant renders as `{ "error", "code" }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `jambakan_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A missing resource that has no numeric id (e.g. the village profile).
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Logged, then replaced with a generic message on the wire.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Shorthand for a 401 with the given message.
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        AppError::Core(CoreError::Unauthorized(msg.into()))
    }
}

/// Wire shape of every error response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    code: &'static str,
}

struct Reply {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl Reply {
    fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            "An internal error occurred",
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let reply = match self {
            AppError::Core(core) => core_reply(core),
            AppError::Database(err) => database_reply(&err),
            AppError::NotFound(msg) => Reply::new(StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            AppError::BadRequest(msg) => Reply::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                Reply::internal()
            }
        };

        let body = ErrorBody {
            error: reply.message,
            code: reply.code,
        };
        (reply.status, axum::Json(body)).into_response()
    }
}

fn core_reply(err: CoreError) -> Reply {
    match err {
        CoreError::NotFound { entity, id } => Reply::new(
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => Reply::new(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg),
        CoreError::Unauthorized(msg) => Reply::new(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg),
        CoreError::Forbidden(msg) => Reply::new(StatusCode::FORBIDDEN, "FORBIDDEN", msg),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            Reply::internal()
        }
    }
}

/// Readable messages for the named unique constraints in `db/migrations`.
fn unique_violation_message(constraint: &str) -> String {
    match constraint {
        "uq_desa_demographics_year" => "Demographic data for this year already exists".into(),
        "uq_admin_users_username" => "Username is already taken".into(),
        other => format!("Duplicate value violates unique constraint: {other}"),
    }
}

/// Map a sqlx error onto a reply.
///
/// PostgreSQL SQLSTATEs handled:
/// - `23505` on a `uq_*` constraint: 409
/// - `23514` on a `ck_*` constraint: 400 (a value outside its vocabulary or range)
///
/// Anything else is a 500 with the details kept in the log.
fn database_reply(err: &sqlx::Error) -> Reply {
    let db_err = match err {
        sqlx::Error::RowNotFound => {
            return Reply::new(StatusCode::NOT_FOUND, "NOT_FOUND", "Resource not found")
        }
        sqlx::Error::Database(db_err) => db_err,
        other => {
            tracing::error!(error = %other, "Database error");
            return Reply::internal();
        }
    };

    let constraint = db_err.constraint().unwrap_or_default();
    match db_err.code().as_deref() {
        Some("23505") if constraint.starts_with("uq_") => Reply::new(
            StatusCode::CONFLICT,
            "CONFLICT",
            unique_violation_message(constraint),
        ),
        Some("23514") if constraint.starts_with("ck_") => Reply::new(
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            format!("Value rejected by check constraint: {constraint}"),
        ),
        _ => {
            tracing::error!(error = %db_err, "Database error");
            Reply::internal()
        }
    }
}
