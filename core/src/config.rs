//! Connection settings for a node.

use std::fmt;

use serde::Deserialize;

/// Base URL and login credentials for one node.
///
/// Supplied once to `NodeClient::new` and never mutated afterwards.
#[derive(Clone, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    pub url: String,
    pub email: String,
    pub password: String,
}

impl ClientConfig {
    pub fn new(url: &str, email: &str, password: &str) -> Self {
        Self {
            url: url.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    /// Join `path` onto the base URL, tolerating a trailing slash on the base.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.url.trim_end_matches('/'))
    }
}

// Hand-written so the password never ends up in logs or panic messages.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("url", &self.url)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
