//! Session establishment.
//!
//! # Design
//! Login is a raw `POST /sessions` made before any credential exists, so it
//! does not go through the dispatcher. The whole cookie set of a successful
//! login is kept, not just the session cookie, because the node may expect
//! the others on later calls.

use serde::Serialize;
use ureq::Agent;

use crate::config::ClientConfig;
use crate::error::AuthError;
use crate::http::{self, HttpMethod};

/// Name of the cookie the node issues for an authenticated session.
pub const SESSION_COOKIE_NAME: &str = "clsession";

#[derive(Debug, Serialize)]
struct Login<'a> {
    email: &'a str,
    password: &'a str,
}

/// One cookie from a login response, attributes stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookie {
    pub name: String,
    pub value: String,
}

impl SessionCookie {
    /// Parse the `name=value` pair at the front of a `Set-Cookie` header.
    pub fn parse(set_cookie: &str) -> Option<Self> {
        let pair = set_cookie.split(';').next()?;
        let (name, value) = pair.split_once('=')?;
        let name = name.trim();
        if !is_cookie_token(name) {
            return None;
        }
        Some(Self {
            name: name.to_string(),
            value: value.trim().to_string(),
        })
    }
}

/// RFC 6265 cookie-name: a non-empty token without separators or controls.
fn is_cookie_token(name: &str) -> bool {
    const SEPARATORS: &str = "()<>@,;:\\\"/[]?={}";
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_graphic() && !SEPARATORS.contains(c))
}

/// Cookies obtained from a successful login, in the order they were received.
///
/// Only built by `establish_session`, which guarantees the session cookie is
/// present. Replaced as a whole, never edited in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    cookies: Vec<SessionCookie>,
}

impl Credential {
    pub fn cookies(&self) -> &[SessionCookie] {
        &self.cookies
    }

    pub fn session_cookie(&self) -> Option<&SessionCookie> {
        self.cookies.iter().find(|c| c.name == SESSION_COOKIE_NAME)
    }

    /// Value for a `Cookie` request header carrying every stored cookie.
    pub fn header_value(&self) -> String {
        self.cookies
            .iter()
            .map(|c| format!("{}={}", c.name, c.value))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Log in with the configured email and password.
pub fn establish_session(agent: &Agent, config: &ClientConfig) -> Result<Credential, AuthError> {
    let url = config.endpoint("/sessions");
    let payload = serde_json::to_vec(&Login {
        email: &config.email,
        password: &config.password,
    })
    .map_err(AuthError::Serialization)?;

    let transport = |e: ureq::Error| AuthError::Transport {
        url: url.clone(),
        source: Box::new(e),
    };
    let mut response = http::send(agent, HttpMethod::Post, &url, None, Some(&payload)).map_err(transport)?;

    // Read before checking status: the error message needs the body either way.
    let body = http::read_body(&mut response).map_err(transport)?;
    let status = response.status().as_u16();
    if status != 200 {
        return Err(AuthError::UnexpectedStatus { url, status, body });
    }

    let cookies: Vec<SessionCookie> = response
        .headers()
        .get_all("set-cookie")
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(SessionCookie::parse)
        .collect();
    credential_from_cookies(&url, cookies)
}

fn credential_from_cookies(url: &str, cookies: Vec<SessionCookie>) -> Result<Credential, AuthError> {
    if cookies.is_empty() {
        return Err(AuthError::NoCookiesReturned { url: url.to_string() });
    }
    if !cookies.iter().any(|c| c.name == SESSION_COOKIE_NAME) {
        let received = cookies.iter().map(|c| c.name.as_str()).collect::<Vec<_>>().join(", ");
        return Err(AuthError::SessionCookieMissing {
            url: url.to_string(),
            expected: SESSION_COOKIE_NAME,
            received,
        });
    }
    Ok(Credential { cookies })
}
