use crate::error::ErrorEnvelope;
use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;

pub const ADMIN_KEY_HEADER: &str = "X-Internal-Api-Key";

/// Guards the admin routes (credentials, manual sync, widget data).
pub async fn require_internal_api_key(
    State(expected): State<String>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let provided = request
        .headers()
        .get(ADMIN_KEY_HEADER)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("");

    if expected.is_empty() || provided != expected {
        tracing::warn!(path = %request.uri().path(), "rejected admin request");
        return (
            StatusCode::UNAUTHORIZED,
            Json(ErrorEnvelope::new("UNAUTHORIZED", "missing or invalid admin key")),
        )
            .into_response();
    }

    next.run(request).await
}
