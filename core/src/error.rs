//! Error types for the node client.
//!
//! # Design
//! Login failures (`AuthError`) are kept apart from per-call failures
//! (`ApiError`): the former prevent a client from being built at all, the
//! latter leave the client usable. `NotFound` has its own variant because 404
//! is classified ahead of any expected-status check. Every variant that
//! follows an HTTP exchange carries the URL and, when the body was read, the
//! raw body text.

use thiserror::Error;

/// Failure to establish a session while constructing a `NodeClient`.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("status code of {status} was returned when trying to get a session\nURL: {url}\nresponse received: {body}")]
    UnexpectedStatus { url: String, status: u16, body: String },

    #[error("no cookie was returned after getting a session\nURL: {url}")]
    NoCookiesReturned { url: String },

    #[error("session cookie `{expected}` wasn't returned on login, got [{received}]\nURL: {url}")]
    SessionCookieMissing {
        url: String,
        expected: &'static str,
        received: String,
    },

    #[error("login request failed\nURL: {url}")]
    Transport {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },

    #[error("failed to serialize login payload")]
    Serialization(#[source] serde_json::Error),
}

/// Failure of a single dispatched call. The client stays usable afterwards.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered 404, whatever status the call expected.
    #[error("unexpected response code, got 404\nURL: {url}")]
    NotFound { url: String },

    #[error("unexpected response code, got {status}, expected {expected}\nURL: {url}\nresponse received: {body}")]
    UnexpectedStatus {
        url: String,
        status: u16,
        expected: u16,
        body: String,
    },

    /// Sending the request or reading its body failed at the connection level.
    #[error("error while exchanging request\nURL: {url}")]
    Transport {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },

    #[error("error while unmarshaling response: {source}\nURL: {url}\nresponse received: {body}")]
    Decode {
        url: String,
        body: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize request payload")]
    Serialization(#[source] serde_json::Error),

    #[error("unexpected response back from node, no wallets were given")]
    NoWallets,
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }
}
