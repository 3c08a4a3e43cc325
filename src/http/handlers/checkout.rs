use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

pub async fn authorize(
    State(state): State<AppState>,
    Path(increment_id): Path<String>,
) -> impl IntoResponse {
    match state.checkout_service.authorize(&increment_id).await {
        Ok(outcome) => (axum::http::StatusCode::OK, Json(outcome)).into_response(),
        Err(e) => e.into_response(),
    }
}

#[derive(Debug, Deserialize)]
pub struct FailureQuery {
    #[serde(default)]
    pub disable_rebuild_cart: Option<String>,
}

impl FailureQuery {
    pub fn rebuild_disabled(&self) -> bool {
        matches!(
            self.disable_rebuild_cart.as_deref().map(str::trim),
            Some("1") | Some("true")
        )
    }
}

pub async fn payment_failed(
    State(state): State<AppState>,
    Path(increment_id): Path<String>,
    Query(q): Query<FailureQuery>,
) -> impl IntoResponse {
    match state
        .checkout_service
        .recover(&increment_id, q.rebuild_disabled())
        .await
    {
        Ok(outcome) => (axum::http::StatusCode::OK, Json(outcome)).into_response(),
        Err(e) => e.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rebuild_flag() {
        let q = |v: Option<&str>| FailureQuery {
            disable_rebuild_cart: v.map(str::to_string),
        };
        assert!(q(Some("1")).rebuild_disabled());
        assert!(q(Some("true")).rebuild_disabled());
        assert!(!q(Some("0")).rebuild_disabled());
        assert!(!q(None).rebuild_disabled());
    }
}
