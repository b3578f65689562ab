//! Blocking client for a node's administrative HTTP API.
//!
//! # Overview
//! `NodeClient::new` logs in once with email/password and keeps the returned
//! cookies. Every later call goes through one dispatcher that attaches those
//! cookies, classifies the response by status code and decodes the JSON body
//! into a caller-chosen type.
//!
//! # Design
//! - The credential is owned by the client and read-only after construction,
//!   so a `NodeClient` can be shared across threads without locking.
//! - Status classification is a pure function over status and buffered body,
//!   kept apart from the transport so it can be tested without a network.
//! - Resource methods (specs, bridges, keys, balances) are thin call sites
//!   into the dispatcher; each names its own expected status code.
//! - The core never logs and never retries; every error goes to the caller.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod resources;
pub mod session;
pub mod types;

pub use client::NodeClient;
pub use config::ClientConfig;
pub use error::{ApiError, AuthError};
pub use http::HttpMethod;
pub use session::{Credential, SessionCookie, SESSION_COOKIE_NAME};
pub use types::{
    BridgeType, BridgeTypeAttributes, BridgeTypeData, OcrKey, OcrKeyAttributes, OcrKeyData,
    OcrKeys, P2pKey, P2pKeyAttributes, P2pKeyData, P2pKeys, Response, ResponseArray,
};
