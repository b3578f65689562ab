//! In-memory imitation of a node's administrative API.
//!
//! Serves the session and `/v2` resource endpoints the client talks to, with
//! the same status codes the real node uses. Every `/v2` route requires a
//! `clsession` cookie handed out by `POST /sessions`.

use std::{
    collections::{BTreeMap, HashMap, HashSet},
    sync::Arc,
};

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{AppendHeaders, IntoResponse},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "clsession";

/// Login credentials and canned data the mock node starts with.
#[derive(Clone, Debug)]
pub struct NodeSettings {
    pub email: String,
    pub password: String,
    pub wallets: Vec<String>,
}

impl Default for NodeSettings {
    fn default() -> Self {
        Self {
            email: "admin@node.local".to_string(),
            password: "twochains".to_string(),
            wallets: vec!["0x9CA9d2D5E04012C9Ed24C0e513C9bfAa4A2dD77f".to_string()],
        }
    }
}

#[derive(Deserialize)]
pub struct Login {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Bridge {
    pub name: String,
    pub url: String,
    #[serde(rename = "requestData", default)]
    pub request_data: String,
}

#[derive(Deserialize)]
pub struct OcrSpecCreate {
    pub toml: String,
}

#[derive(Clone, Debug, Serialize)]
struct OcrKey {
    #[serde(rename = "configPublicKey")]
    config_public_key: String,
    #[serde(rename = "offChainPublicKey")]
    off_chain_public_key: String,
    #[serde(rename = "onChainSigningAddress")]
    on_chain_signing_address: String,
}

#[derive(Clone, Debug, Serialize)]
struct P2pKey {
    id: i64,
    #[serde(rename = "peerId")]
    peer_id: String,
    #[serde(rename = "publicKey")]
    public_key: String,
}

#[derive(Default)]
pub struct Node {
    settings: NodeSettings,
    sessions: HashSet<String>,
    specs: HashMap<String, Value>,
    ocr_jobs: BTreeMap<i32, String>,
    next_job_id: i32,
    bridges: HashMap<String, Bridge>,
    ocr_keys: BTreeMap<String, OcrKey>,
    p2p_keys: BTreeMap<i64, P2pKey>,
    next_p2p_id: i64,
}

pub type Db = Arc<RwLock<Node>>;

pub fn app() -> Router {
    app_with(NodeSettings::default())
}

pub fn app_with(settings: NodeSettings) -> Router {
    let db: Db = Arc::new(RwLock::new(Node {
        settings,
        ..Node::default()
    }));
    Router::new()
        .route("/sessions", post(login))
        .route("/v2/specs", post(create_spec))
        .route("/v2/specs/{id}", get(get_spec).delete(delete_spec))
        .route("/v2/ocr/specs", post(create_ocr_spec))
        .route("/v2/ocr/specs/{id}", delete(delete_ocr_spec))
        .route("/v2/bridge_types", post(create_bridge))
        .route("/v2/bridge_types/{name}", get(get_bridge).delete(delete_bridge))
        .route("/v2/user/balances", get(list_balances))
        .route("/v2/off_chain_reporting_keys", get(list_ocr_keys).post(create_ocr_key))
        .route("/v2/off_chain_reporting_keys/{id}", delete(delete_ocr_key))
        .route("/v2/p2p_keys", get(list_p2p_keys).post(create_p2p_key))
        .route("/v2/p2p_keys/{id}", delete(delete_p2p_key))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with(listener: TcpListener, settings: NodeSettings) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(settings)).await
}

/// Pull the session token out of every `Cookie` header on the request.
fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_string())
}

async fn authorize(db: &Db, headers: &HeaderMap) -> Result<(), StatusCode> {
    let token = session_token(headers).ok_or(StatusCode::UNAUTHORIZED)?;
    if db.read().await.sessions.contains(&token) {
        Ok(())
    } else {
        tracing::debug!("rejected unknown session token");
        Err(StatusCode::UNAUTHORIZED)
    }
}

fn random_hex() -> String {
    Uuid::new_v4().simple().to_string()
}

async fn login(State(db): State<Db>, Json(input): Json<Login>) -> Result<impl IntoResponse, StatusCode> {
    let mut node = db.write().await;
    if input.email != node.settings.email || input.password != node.settings.password {
        tracing::info!(email = %input.email, "login rejected");
        return Err(StatusCode::UNAUTHORIZED);
    }
    let token = random_hex();
    node.sessions.insert(token.clone());
    tracing::info!(email = %input.email, "session created");
    Ok((
        AppendHeaders([
            (header::SET_COOKIE, format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Strict")),
            (header::SET_COOKIE, "explorer=%7B%7D; Path=/".to_string()),
        ]),
        Json(json!({"data": {"type": "session", "id": "sessionID", "attributes": {"authenticated": true}}})),
    ))
}

async fn create_spec(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(spec): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    authorize(&db, &headers).await?;
    let id = random_hex();
    db.write().await.specs.insert(id.clone(), spec.clone());
    tracing::debug!(%id, "spec created");
    Ok(Json(json!({"data": {"type": "specs", "id": id, "attributes": spec}})))
}

async fn get_spec(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    authorize(&db, &headers).await?;
    let node = db.read().await;
    let spec = node.specs.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(json!({"data": {"type": "specs", "id": id, "attributes": spec}})))
}

async fn delete_spec(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    authorize(&db, &headers).await?;
    db.write()
        .await
        .specs
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn create_ocr_spec(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<OcrSpecCreate>,
) -> Result<Json<Value>, StatusCode> {
    authorize(&db, &headers).await?;
    let mut node = db.write().await;
    node.next_job_id += 1;
    let job_id = node.next_job_id;
    node.ocr_jobs.insert(job_id, input.toml);
    Ok(Json(json!({"jobID": job_id})))
}

async fn delete_ocr_spec(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<StatusCode, StatusCode> {
    authorize(&db, &headers).await?;
    db.write()
        .await
        .ocr_jobs
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(StatusCode::NOT_FOUND)
}

fn bridge_body(bridge: &Bridge) -> Value {
    json!({"data": {"type": "bridges", "id": bridge.name, "attributes": bridge}})
}

async fn create_bridge(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(bridge): Json<Bridge>,
) -> Result<Json<Value>, StatusCode> {
    authorize(&db, &headers).await?;
    let mut node = db.write().await;
    if node.bridges.contains_key(&bridge.name) {
        return Err(StatusCode::CONFLICT);
    }
    node.bridges.insert(bridge.name.clone(), bridge.clone());
    Ok(Json(bridge_body(&bridge)))
}

async fn get_bridge(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(name): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    authorize(&db, &headers).await?;
    let node = db.read().await;
    node.bridges.get(&name).map(|b| Json(bridge_body(b))).ok_or(StatusCode::NOT_FOUND)
}

async fn delete_bridge(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(name): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    authorize(&db, &headers).await?;
    let removed = db.write().await.bridges.remove(&name);
    removed.map(|b| Json(bridge_body(&b))).ok_or(StatusCode::NOT_FOUND)
}

async fn list_balances(State(db): State<Db>, headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
    authorize(&db, &headers).await?;
    let node = db.read().await;
    let data: Vec<Value> = node
        .settings
        .wallets
        .iter()
        .map(|address| {
            json!({
                "type": "eTHKeys",
                "id": address,
                "attributes": {"address": address, "ethBalance": "0", "linkBalance": "0"}
            })
        })
        .collect();
    Ok(Json(json!({"data": data})))
}

fn ocr_key_data(id: &str, key: &OcrKey) -> Value {
    json!({"type": "encryptedKeyBundles", "id": id, "attributes": key})
}

async fn create_ocr_key(State(db): State<Db>, headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
    authorize(&db, &headers).await?;
    let id = random_hex();
    let key = OcrKey {
        config_public_key: format!("ocrcfg_{}", random_hex()),
        off_chain_public_key: format!("ocroff_{}", random_hex()),
        on_chain_signing_address: format!("ocrsad_0x{}", &random_hex()[..20]),
    };
    let data = ocr_key_data(&id, &key);
    db.write().await.ocr_keys.insert(id, key);
    Ok(Json(json!({"data": data})))
}

async fn list_ocr_keys(State(db): State<Db>, headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
    authorize(&db, &headers).await?;
    let node = db.read().await;
    let data: Vec<Value> = node.ocr_keys.iter().map(|(id, key)| ocr_key_data(id, key)).collect();
    Ok(Json(json!({"data": data})))
}

async fn delete_ocr_key(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    authorize(&db, &headers).await?;
    let removed = db.write().await.ocr_keys.remove(&id);
    removed
        .map(|key| Json(json!({"data": ocr_key_data(&id, &key)})))
        .ok_or(StatusCode::NOT_FOUND)
}

fn p2p_key_data(key: &P2pKey) -> Value {
    json!({"type": "encryptedP2PKeys", "id": key.id.to_string(), "attributes": key})
}

async fn create_p2p_key(State(db): State<Db>, headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
    authorize(&db, &headers).await?;
    let mut node = db.write().await;
    node.next_p2p_id += 1;
    let key = P2pKey {
        id: node.next_p2p_id,
        peer_id: format!("p2p_12D3KooW{}", random_hex()),
        public_key: random_hex(),
    };
    let data = p2p_key_data(&key);
    node.p2p_keys.insert(key.id, key);
    Ok(Json(json!({"data": data})))
}

async fn list_p2p_keys(State(db): State<Db>, headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
    authorize(&db, &headers).await?;
    let node = db.read().await;
    let data: Vec<Value> = node.p2p_keys.values().map(p2p_key_data).collect();
    Ok(Json(json!({"data": data})))
}

async fn delete_p2p_key(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<Value>, StatusCode> {
    authorize(&db, &headers).await?;
    let removed = db.write().await.p2p_keys.remove(&id);
    removed
        .map(|key| Json(json!({"data": p2p_key_data(&key)})))
        .ok_or(StatusCode::NOT_FOUND)
}
