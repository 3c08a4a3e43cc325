use crate::domain::credentials::{Credentials, CredentialsInput};
use crate::AppState;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

pub async fn upsert_credentials(
    State(state): State<AppState>,
    Path(store_id): Path<i64>,
    Json(input): Json<CredentialsInput>,
) -> impl IntoResponse {
    let creds = match Credentials::try_from(input) {
        Ok(c) => c,
        Err(e) => return e.into_response(),
    };

    match state.credentials_store.save(store_id, &creds).await {
        Ok(()) => {
            tracing::info!(store_id, username = creds.username(), "credentials updated");
            (
                axum::http::StatusCode::OK,
                Json(serde_json::json!({"updated": true})),
            )
                .into_response()
        }
        Err(e) => e.into_response(),
    }
}
