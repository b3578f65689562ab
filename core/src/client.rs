//! Authenticated request dispatch.
//!
//! # Design
//! `NodeClient` owns its config, one `ureq` agent and the credential from
//! login. All resource methods funnel into `execute_raw` (decode into a
//! destination type) or `execute_no_content` (response dropped unread).
//! Classification of a buffered response lives in `classify`, which checks
//! 404 before the expected status so `NotFound` wins even when 404 was the
//! expected code.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;
use ureq::Agent;

use crate::config::ClientConfig;
use crate::error::{ApiError, AuthError};
use crate::http::{self, HttpMethod};
use crate::session::{self, Credential};

/// Blocking client for a node's administrative API.
///
/// Cheap to clone; clones share the connection pool of the underlying agent.
/// The credential is never mutated after `new`, so `&NodeClient` can be used
/// from several threads at once.
#[derive(Clone)]
pub struct NodeClient {
    config: ClientConfig,
    credential: Credential,
    agent: Agent,
}

impl NodeClient {
    /// Log in and return a ready client. No client exists if login fails.
    pub fn new(config: ClientConfig) -> Result<Self, AuthError> {
        let agent = http::agent();
        let credential = session::establish_session(&agent, &config)?;
        Ok(Self {
            config,
            credential,
            agent,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Serialize `payload` as JSON and dispatch it, decoding the reply into `D`.
    pub fn execute<P, D>(
        &self,
        method: HttpMethod,
        path: &str,
        payload: &P,
        expected_status: u16,
    ) -> Result<D, ApiError>
    where
        P: Serialize + ?Sized,
        D: DeserializeOwned,
    {
        let body = serde_json::to_vec(payload).map_err(ApiError::Serialization)?;
        self.execute_raw(method, path, Some(&body), expected_status)
    }

    /// Dispatch an already serialized body and decode the reply into `D`.
    pub fn execute_raw<D: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&[u8]>,
        expected_status: u16,
    ) -> Result<D, ApiError> {
        let url = self.config.endpoint(path);
        let transport = |e: ureq::Error| ApiError::Transport {
            url: url.clone(),
            source: Box::new(e),
        };
        let cookie_header = self.credential.header_value();
        let mut response =
            http::send(&self.agent, method, &url, Some(&cookie_header), body).map_err(transport)?;
        let text = http::read_body(&mut response).map_err(transport)?;
        classify(&url, response.status().as_u16(), text, expected_status)
    }

    /// Dispatch without a destination. Only a transport failure is reported;
    /// the status and body of the response are not looked at.
    pub fn execute_no_content(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&[u8]>,
    ) -> Result<(), ApiError> {
        let url = self.config.endpoint(path);
        let cookie_header = self.credential.header_value();
        http::send(&self.agent, method, &url, Some(&cookie_header), body)
            .map(drop)
            .map_err(|e| ApiError::Transport {
                url,
                source: Box::new(e),
            })
    }

    /// Serializing counterpart of `execute_no_content`.
    pub fn execute_json_no_content<P: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        path: &str,
        payload: &P,
    ) -> Result<(), ApiError> {
        let body = serde_json::to_vec(payload).map_err(ApiError::Serialization)?;
        self.execute_no_content(method, path, Some(&body))
    }
}

impl fmt::Debug for NodeClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeClient")
            .field("config", &self.config)
            .field("cookies", &self.credential.cookies().len())
            .finish_non_exhaustive()
    }
}

/// Map a fully buffered response to a decoded value or an error.
pub(crate) fn classify<D: DeserializeOwned>(
    url: &str,
    status: u16,
    body: String,
    expected: u16,
) -> Result<D, ApiError> {
    if status == 404 {
        return Err(ApiError::NotFound { url: url.to_string() });
    }
    if status != expected {
        return Err(ApiError::UnexpectedStatus {
            url: url.to_string(),
            status,
            expected,
            body,
        });
    }
    serde_json::from_str(&body).map_err(|source| ApiError::Decode {
        url: url.to_string(),
        body,
        source,
    })
}
