use axum::Json;
use serde::Serialize;
use shared::api::APP_NAME;

#[derive(Debug, Serialize)]
pub struct Health {
    status: &'static str,
    app: &'static str,
}

pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok",
        app: APP_NAME,
    })
}
