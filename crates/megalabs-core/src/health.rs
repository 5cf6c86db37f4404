use axum::http::StatusCode;

/// Liveness check for `GET /healthz`.
///
/// Readiness depends on each service's backing stores, so services provide
/// their own `/readyz`.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}
