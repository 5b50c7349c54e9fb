use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

/// Route the management API is mounted under.
pub const API_PREFIX: &str = "/api/management/v1";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProcessModel {
    pub id: String,
    pub xml: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessModelList {
    pub process_models: Vec<ProcessModel>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProcessModel {
    #[serde(default)]
    pub overwrite_existing: bool,
    pub xml: String,
}

pub type Db = Arc<RwLock<BTreeMap<String, ProcessModel>>>;

/// A store pre-filled with `models`.
pub fn db_with(models: impl IntoIterator<Item = ProcessModel>) -> Db {
    let store = models.into_iter().map(|m| (m.id.clone(), m)).collect();
    Arc::new(RwLock::new(store))
}

pub fn app() -> Router {
    router(db_with(Vec::new()))
}

pub fn router(db: Db) -> Router {
    let api = Router::new()
        .route("/process_models", get(list_process_models))
        .route("/process_models/{id}", get(get_process_model))
        .route("/process_models/{id}/update", post(update_process_model))
        .with_state(db);
    Router::new().nest(API_PREFIX, api)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with(listener: TcpListener, db: Db) -> Result<(), std::io::Error> {
    axum::serve(listener, router(db)).await
}

/// Any non-empty bearer token is accepted.
fn authorize(headers: &HeaderMap) -> Result<(), StatusCode> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .unwrap_or_default();
    if token.is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(())
}

async fn list_process_models(
    headers: HeaderMap,
    State(db): State<Db>,
) -> Result<Json<ProcessModelList>, StatusCode> {
    authorize(&headers)?;
    let models = db.read().await;
    Ok(Json(ProcessModelList {
        process_models: models.values().cloned().collect(),
    }))
}

async fn get_process_model(
    headers: HeaderMap,
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<ProcessModel>, StatusCode> {
    authorize(&headers)?;
    let models = db.read().await;
    models.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_process_model(
    headers: HeaderMap,
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<UpdateProcessModel>,
) -> Result<StatusCode, StatusCode> {
    authorize(&headers)?;
    let mut models = db.write().await;
    if models.contains_key(&id) && !input.overwrite_existing {
        return Err(StatusCode::CONFLICT);
    }
    models.insert(
        id.clone(),
        ProcessModel {
            id,
            xml: input.xml,
        },
    );
    Ok(StatusCode::NO_CONTENT)
}
