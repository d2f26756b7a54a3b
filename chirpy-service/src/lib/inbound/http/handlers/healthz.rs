use axum::http::header;
use axum::response::IntoResponse;

/// Readiness check.
pub async fn healthz() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], "OK")
}
