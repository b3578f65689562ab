//! Shared test helpers: run an axum router on a random port in the background.

#![allow(dead_code)]

use axum::http::{header, StatusCode};
use axum::response::{AppendHeaders, IntoResponse};
use axum::Router;
use node_client::ClientConfig;

pub const EMAIL: &str = "admin@node.local";
pub const PASSWORD: &str = "twochains";

/// Serve `router` from a background thread and return its base URL.
pub fn spawn(router: Router) -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            axum::serve(listener, router).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

pub fn spawn_mock_node() -> String {
    spawn(mock_node::app())
}

pub fn config(url: &str) -> ClientConfig {
    ClientConfig::new(url, EMAIL, PASSWORD)
}

/// A login handler that always succeeds with a fixed session cookie.
pub async fn accept_login() -> impl IntoResponse {
    (
        StatusCode::OK,
        AppendHeaders([
            (header::SET_COOKIE, "clsession=fixed-token; Path=/; HttpOnly"),
            (header::SET_COOKIE, "explorer=%7B%7D; Path=/"),
        ]),
        "{}",
    )
}
