use crate::domain::payment_method::PaymentMethod;
use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct MethodView {
    pub code: String,
    pub title: String,
    pub sort_order: i32,
    pub min_order_total: f64,
    pub max_order_total: f64,
}

impl From<PaymentMethod> for MethodView {
    fn from(m: PaymentMethod) -> Self {
        Self {
            code: m.code,
            title: m.title,
            sort_order: m.sort_order,
            min_order_total: m.min_order_total,
            max_order_total: m.max_order_total,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub grand_total: Option<f64>,
}

pub async fn list_available(
    State(state): State<AppState>,
    Path(store_id): Path<i64>,
    Query(q): Query<ListQuery>,
) -> impl IntoResponse {
    match state
        .method_catalog
        .available_methods(store_id, q.grand_total.unwrap_or(0.0))
        .await
    {
        Ok(items) => {
            let resp: Vec<MethodView> = items.into_iter().map(MethodView::from).collect();
            (axum::http::StatusCode::OK, Json(resp)).into_response()
        }
        Err(e) => e.into_response(),
    }
}

pub async fn get_title(
    State(state): State<AppState>,
    Path((store_id, code)): Path<(i64, String)>,
) -> impl IntoResponse {
    match state.method_catalog.title(store_id, &code).await {
        Ok(title) => (
            axum::http::StatusCode::OK,
            Json(serde_json::json!({"code": code, "title": title})),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Data behind the admin configuration widget, inactive methods included.
pub async fn admin_overview(
    State(state): State<AppState>,
    Path(store_id): Path<i64>,
) -> impl IntoResponse {
    match state.method_catalog.admin_overview(store_id).await {
        Ok(items) => (axum::http::StatusCode::OK, Json(items)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn trigger_sync(State(state): State<AppState>) -> impl IntoResponse {
    match state
        .method_sync
        .sync_all(state.credentials_store.as_ref())
        .await
    {
        Ok(outcomes) => (axum::http::StatusCode::OK, Json(outcomes)).into_response(),
        Err(e) => e.into_response(),
    }
}
