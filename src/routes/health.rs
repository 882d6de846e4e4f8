use axum::{extract::State, http::StatusCode, response::Json};
use diesel::{sql_query, RunQueryDsl};
use serde_json::json;
use tokio::task;
use tracing::warn;

use crate::state::AppState;

pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    let probe = task::spawn_blocking(move || -> Result<(), String> {
        let mut conn = state.db().map_err(|err| err.message().to_string())?;
        sql_query("SELECT 1")
            .execute(&mut conn)
            .map(|_| ())
            .map_err(|err| err.to_string())
    })
    .await
    .unwrap_or_else(|err| Err(err.to_string()));

    match probe {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "database": "ok" })),
        ),
        Err(error) => {
            warn!(%error, "health check could not reach the database");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "degraded", "database": "unavailable" })),
            )
        }
    }
}
