use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};
use sqlx::SqlitePool;

use super::AppState;

/// The process answers, nothing else is checked.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Both pools reach a migrated schema.
pub async fn ready(State(app): State<AppState>) -> (StatusCode, Json<Value>) {
    for (pool_name, pool) in [("read", &app.db.read_db), ("write", &app.db.write_db)] {
        if let Err(err) = schema_ready(pool).await {
            tracing::warn!(pool = pool_name, error = %err, "database not ready");

            return (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unavailable", "pool": pool_name })),
            );
        }
    }

    (StatusCode::OK, Json(json!({ "status": "ready" })))
}

async fn schema_ready(pool: &SqlitePool) -> sqlx::Result<()> {
    sqlx::query("SELECT id FROM recipe LIMIT 1")
        .fetch_optional(pool)
        .await?;

    Ok(())
}
