use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

/// Header carrying the API credential. Header names are case-insensitive.
pub const API_KEY_HEADER: &str = "apikey";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Email {
    pub address: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "doNotEmail")]
    pub do_not_email: bool,
}

/// Body accepted by `POST /v2/contacts/findOrCreate`. Unknown fields are
/// kept in `extra`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindOrCreate {
    #[serde(rename = "type")]
    pub kind: String,
    pub first_name: String,
    pub last_name: String,
    pub emails: Vec<Email>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContactMatch {
    pub van_id: u64,
}

#[derive(Default)]
pub struct Store {
    next_id: u64,
    by_email: HashMap<String, u64>,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/v2/contacts/findOrCreate", post(find_or_create))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn find_or_create(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<FindOrCreate>,
) -> Result<(StatusCode, Json<ContactMatch>), StatusCode> {
    let authorized = headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| !v.is_empty());
    if !authorized {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let email = input
        .emails
        .first()
        .map(|e| e.address.to_ascii_lowercase())
        .ok_or(StatusCode::BAD_REQUEST)?;

    let mut store = db.write().await;
    if let Some(&van_id) = store.by_email.get(&email) {
        return Ok((StatusCode::OK, Json(ContactMatch { van_id })));
    }
    store.next_id += 1;
    let van_id = store.next_id;
    store.by_email.insert(email, van_id);
    Ok((StatusCode::CREATED, Json(ContactMatch { van_id })))
}
