//! # ルーター / ハンドラ — HTTP 変換層
//!
//! 3 ハンドラはいずれもストア呼び出しの薄い変換。状態は持たない。
//! エラーは境界で捕捉し、JSON の `{"message": ...}` に変換する。

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get};
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tracing::error;

use contact_core::contracts::ContactDraft;
use contact_core::error::ContactError;
use contact_core::traits::ContactStore;

pub struct AppState {
    pub store: Arc<dyn ContactStore>,
}

pub fn create_router(state: Arc<AppState>, cors: CorsLayer) -> Router {
    Router::new()
        .route("/api/contacts", get(list_contacts).post(create_contact))
        .route("/api/contacts/:id", delete(delete_contact))
        .layer(cors)
        .with_state(state)
}

/// ドメインエラーを HTTP レスポンスへ変換する境界。
/// Validation は 400、NotFound は 404、それ以外のストア障害は 500。
struct ApiError(ContactError);

impl From<ContactError> for ApiError {
    fn from(err: ContactError) -> Self {
        if let ContactError::Storage { reason } = &err {
            error!("Contact store failure: {reason}");
        }
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ContactError::Validation(_) => StatusCode::BAD_REQUEST,
            ContactError::NotFound => StatusCode::NOT_FOUND,
            ContactError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "message": self.0.to_string() }))).into_response()
    }
}

/// GET /api/contacts — 全件を新しい順で返す
async fn list_contacts(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let contacts = state.store.list_all().await?;
    Ok((StatusCode::OK, Json(json!({ "data": contacts }))).into_response())
}

/// POST /api/contacts — ボディをそのまま draft として検証・保存する
async fn create_contact(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<ContactDraft>,
) -> Result<Response, ApiError> {
    let contact = state.store.create(draft).await?;
    Ok((StatusCode::CREATED, Json(json!({ "data": contact }))).into_response())
}

/// DELETE /api/contacts/:id
async fn delete_contact(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    state.store.delete_by_id(&id).await?;
    Ok((StatusCode::OK, Json(json!({ "message": "Deleted successfully" }))).into_response())
}
