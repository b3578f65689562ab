use axum::http::{self, header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use mock_node::{app, app_with, NodeSettings};
use serde_json::Value;
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, cookie: Option<&str>, body: &str) -> Request<String> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(body.to_string()).unwrap()
}

fn request(method: &str, uri: &str, cookie: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(String::new())
        .unwrap()
}

/// Log in with the default credentials and return a `Cookie` header value.
async fn login(app: &Router) -> String {
    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/sessions",
            None,
            r#"{"email":"admin@node.local","password":"twochains"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    resp.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().split(';').next().unwrap().to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

// --- sessions ---

#[tokio::test]
async fn login_sets_session_and_extra_cookie() {
    let app = app();
    let cookie = login(&app).await;
    assert!(cookie.contains("clsession="));
    assert!(cookie.contains("explorer="));
}

#[tokio::test]
async fn login_with_wrong_password_returns_401() {
    let app = app();
    let resp = app
        .oneshot(json_request(
            "POST",
            "/sessions",
            None,
            r#"{"email":"admin@node.local","password":"wrong"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(resp.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn v2_routes_require_session_cookie() {
    let app = app();
    let resp = app
        .clone()
        .oneshot(Request::builder().uri("/v2/p2p_keys").body(String::new()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = app
        .oneshot(request("GET", "/v2/p2p_keys", "clsession=forged"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// --- specs ---

#[tokio::test]
async fn spec_lifecycle() {
    let app = app();
    let cookie = login(&app).await;

    let resp = app
        .clone()
        .oneshot(json_request("POST", "/v2/specs", Some(&cookie), r#"{"initiators":[{"type":"web"}]}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let created = body_json(resp).await;
    let id = created["data"]["id"].as_str().unwrap().to_string();
    assert!(!id.is_empty());

    let resp = app
        .clone()
        .oneshot(request("GET", &format!("/v2/specs/{id}"), &cookie))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["data"]["attributes"]["initiators"][0]["type"], "web");

    let resp = app
        .clone()
        .oneshot(request("DELETE", &format!("/v2/specs/{id}"), &cookie))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    let resp = app
        .oneshot(request("GET", &format!("/v2/specs/{id}"), &cookie))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn ocr_spec_returns_job_id_and_deletes_with_204() {
    let app = app();
    let cookie = login(&app).await;

    let resp = app
        .clone()
        .oneshot(json_request("POST", "/v2/ocr/specs", Some(&cookie), r#"{"toml":"type = \"offchainreporting\""}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let job_id = body_json(resp).await["jobID"].as_i64().unwrap();
    assert_eq!(job_id, 1);

    let resp = app
        .clone()
        .oneshot(request("DELETE", "/v2/ocr/specs/1", &cookie))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = app
        .oneshot(request("DELETE", "/v2/ocr/specs/1", &cookie))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- bridges ---

#[tokio::test]
async fn bridge_delete_returns_200_then_404() {
    let app = app();
    let cookie = login(&app).await;

    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/v2/bridge_types",
            Some(&cookie),
            r#"{"name":"price","url":"http://adapter:8080"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
        .clone()
        .oneshot(request("GET", "/v2/bridge_types/price", &cookie))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["data"]["attributes"]["url"], "http://adapter:8080");

    let resp = app
        .clone()
        .oneshot(request("DELETE", "/v2/bridge_types/price", &cookie))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
        .oneshot(request("DELETE", "/v2/bridge_types/price", &cookie))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_bridge_is_conflict() {
    let app = app();
    let cookie = login(&app).await;
    let body = r#"{"name":"dup","url":"http://a"}"#;
    for expected in [StatusCode::OK, StatusCode::CONFLICT] {
        let resp = app
            .clone()
            .oneshot(json_request("POST", "/v2/bridge_types", Some(&cookie), body))
            .await
            .unwrap();
        assert_eq!(resp.status(), expected);
    }
}

// --- balances ---

#[tokio::test]
async fn balances_list_configured_wallets() {
    let app = app_with(NodeSettings {
        wallets: vec!["0xaaa".to_string(), "0xbbb".to_string()],
        ..NodeSettings::default()
    });
    let cookie = login(&app).await;
    let resp = app
        .oneshot(request("GET", "/v2/user/balances", &cookie))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"][0]["id"], "0xaaa");
}

// --- keys ---

#[tokio::test]
async fn ocr_key_lifecycle() {
    let app = app();
    let cookie = login(&app).await;

    let resp = app
        .clone()
        .oneshot(request("POST", "/v2/off_chain_reporting_keys", &cookie))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let created = body_json(resp).await;
    let id = created["data"]["id"].as_str().unwrap().to_string();
    assert!(created["data"]["attributes"]["configPublicKey"].is_string());

    let resp = app
        .clone()
        .oneshot(request("GET", "/v2/off_chain_reporting_keys", &cookie))
        .await
        .unwrap();
    assert_eq!(body_json(resp).await["data"][0]["id"], id.as_str());

    let resp = app
        .clone()
        .oneshot(request("DELETE", &format!("/v2/off_chain_reporting_keys/{id}"), &cookie))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
        .oneshot(request("DELETE", &format!("/v2/off_chain_reporting_keys/{id}"), &cookie))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn p2p_keys_get_sequential_ids() {
    let app = app();
    let cookie = login(&app).await;

    for expected in [1, 2] {
        let resp = app
            .clone()
            .oneshot(request("POST", "/v2/p2p_keys", &cookie))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await["data"]["attributes"]["id"], expected);
    }

    let resp = app
        .clone()
        .oneshot(request("DELETE", "/v2/p2p_keys/1", &cookie))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
        .oneshot(request("GET", "/v2/p2p_keys", &cookie))
        .await
        .unwrap();
    let body = body_json(resp).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["attributes"]["id"], 2);
}

#[tokio::test]
async fn p2p_key_bad_id_returns_400() {
    let app = app();
    let cookie = login(&app).await;
    let resp = app
        .oneshot(request("DELETE", "/v2/p2p_keys/not-a-number", &cookie))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
