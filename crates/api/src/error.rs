use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use ems_core::error::CoreError;
use ems_core::types::DbId;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce the `{success: false, message,
/// code}` error envelope.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `ems_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The caller exceeded a rate limit.
    #[error("Too many requests")]
    TooManyRequests,

    /// No route matches the request path.
    #[error("Route not found")]
    RouteNotFound,

    /// The path exists but not for this HTTP method.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// The handler did not finish within the request timeout.
    #[error("Request timed out")]
    RequestTimeout,

    /// The request body exceeds the configured limit.
    #[error("Payload too large")]
    PayloadTooLarge,

    /// An internal error with a human-readable message (logged, never returned).
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn not_found(entity: &'static str, id: DbId) -> Self {
        AppError::Core(CoreError::NotFound { entity, id })
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Core(CoreError::Validation(msg.into()))
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        AppError::Core(CoreError::Conflict(msg.into()))
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        AppError::Core(CoreError::Unauthorized(msg.into()))
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        AppError::Core(CoreError::Forbidden(msg.into()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    internal()
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::TooManyRequests => (
                StatusCode::TOO_MANY_REQUESTS,
                "TOO_MANY_REQUESTS",
                "Too many requests, try again later".to_string(),
            ),
            AppError::RouteNotFound => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                "Route not found".to_string(),
            ),
            AppError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "METHOD_NOT_ALLOWED",
                "Method not allowed".to_string(),
            ),
            AppError::RequestTimeout => (
                StatusCode::REQUEST_TIMEOUT,
                "REQUEST_TIMEOUT",
                "Request timed out".to_string(),
            ),
            AppError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "PAYLOAD_TOO_LARGE",
                "Request body is too large".to_string(),
            ),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let body = json!({
            "success": false,
            "message": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique violations (`23505`) on a `uq_*` constraint or index map to 409.
/// - Foreign-key violations (`23503`) map to 409: the row is still referenced.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            let constraint = db_err.constraint().unwrap_or("unknown");
            match db_err.code().as_deref() {
                Some("23505") if constraint.starts_with("uq_") => {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        duplicate_message(constraint),
                    );
                }
                Some("23503") => {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Record is still referenced ({constraint})"),
                    );
                }
                _ => {}
            }
            tracing::error!(error = %db_err, "Database error");
            internal()
        }
        other => {
            tracing::error!(error = %other, "Database error");
            internal()
        }
    }
}

/// Human-readable message for a unique-constraint violation.
fn duplicate_message(constraint: &str) -> String {
    match constraint {
        "uq_users_email" => "Email is already registered".to_string(),
        "uq_departments_active_name" => "Department name already exists".to_string(),
        "uq_employees_emp_code" => "Employee code already exists".to_string(),
        "uq_employees_user_id" => "Identity is already linked to an employee".to_string(),
        other => format!("Duplicate value violates unique constraint: {other}"),
    }
}

// ---------------------------------------------------------------------------
// Extractor rejections
// ---------------------------------------------------------------------------

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return AppError::PayloadTooLarge;
        }
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use http_body_util::BodyExt;
    use serde_json::Value;

    use super::*;

    async fn render(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn core_errors_map_to_statuses() {
        let cases = [
            (AppError::not_found("Leave", 9), StatusCode::NOT_FOUND, "NOT_FOUND"),
            (AppError::validation("bad"), StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            (AppError::conflict("dup"), StatusCode::CONFLICT, "CONFLICT"),
            (AppError::unauthorized("who"), StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            (AppError::forbidden("no"), StatusCode::FORBIDDEN, "FORBIDDEN"),
            (AppError::TooManyRequests, StatusCode::TOO_MANY_REQUESTS, "TOO_MANY_REQUESTS"),
            (AppError::RouteNotFound, StatusCode::NOT_FOUND, "NOT_FOUND"),
            (AppError::MethodNotAllowed, StatusCode::METHOD_NOT_ALLOWED, "METHOD_NOT_ALLOWED"),
            (AppError::RequestTimeout, StatusCode::REQUEST_TIMEOUT, "REQUEST_TIMEOUT"),
            (AppError::PayloadTooLarge, StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE"),
        ];
        for (err, status, code) in cases {
            let (actual, body) = render(err).await;
            assert_eq!(actual, status);
            assert_eq!(body["success"], false);
            assert_eq!(body["code"], code);
        }
    }

    #[tokio::test]
    async fn not_found_names_entity_and_id() {
        let (_, body) = render(AppError::not_found("Department", 12)).await;
        assert_eq!(body["message"], "Department with id 12 not found");
    }

    #[tokio::test]
    async fn internal_details_are_hidden() {
        let (status, body) = render(AppError::InternalError("pool exploded".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "An internal error occurred");

        let (status, body) =
            render(AppError::Core(CoreError::Internal("secret detail".into()))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body["message"].as_str().unwrap().contains("secret"));
    }

    #[tokio::test]
    async fn row_not_found_is_404() {
        let (status, _) = render(AppError::Database(sqlx::Error::RowNotFound)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn duplicate_messages_are_friendly() {
        assert_eq!(duplicate_message("uq_users_email"), "Email is already registered");
        assert!(duplicate_message("uq_other").contains("uq_other"));
    }
}
