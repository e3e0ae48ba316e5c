use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;
use uuid::Uuid;

pub const API_VERSION: &str = "v1";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Ticket {
    pub id: Uuid,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorBody>);

fn error(status: StatusCode, reason: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorBody {
            error: reason.into(),
        }),
    )
}

pub type Db = Arc<RwLock<HashMap<String, Message>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route(
            &format!("/api/{API_VERSION}/{{subject}}"),
            get(get_message).post(create_message),
        )
        .with_state(db)
}

/// Router that answers every request with `status` and `body`, whatever the
/// path or method.
pub fn canned(status: u16, body: impl Into<String>) -> Router {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = body.into();
    Router::new().fallback(move || {
        let body = body.clone();
        async move { (status, body) }
    })
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    serve(listener, app()).await
}

pub async fn serve(listener: TcpListener, router: Router) -> Result<(), std::io::Error> {
    axum::serve(listener, router).await
}

async fn get_message(
    State(db): State<Db>,
    Path(subject): Path<String>,
) -> Result<Json<Message>, ApiError> {
    let messages = db.read().await;
    messages
        .get(&subject)
        .cloned()
        .map(Json)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "not found"))
}

async fn create_message(
    State(db): State<Db>,
    Path(subject): Path<String>,
    payload: Result<Json<Message>, JsonRejection>,
) -> Result<(StatusCode, Json<Ticket>), ApiError> {
    let Json(mut message) =
        payload.map_err(|rejection| error(StatusCode::BAD_REQUEST, rejection.body_text()))?;
    if message.title.is_empty() {
        return Err(error(StatusCode::BAD_REQUEST, "title is required"));
    }
    if message.created_at.is_none() {
        message.created_at = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Nanos, true));
    }

    let ticket = Ticket { id: Uuid::new_v4() };
    info!(%subject, id = %ticket.id, "message created");
    db.write().await.insert(subject, message);
    Ok((StatusCode::CREATED, Json(ticket)))
}
