//! HTTP transport for the node client.
//!
//! # Design
//! `HttpMethod` is the verb type the dispatcher speaks. `send` maps it onto
//! `ureq`'s typed request builders, attaching the cookie header and an
//! optional JSON body. The agent is built with `http_status_as_error(false)`
//! so 4xx/5xx responses come back as data and status interpretation stays
//! with the dispatcher.

use std::fmt;

use ureq::http::Response;
use ureq::typestate::WithBody;
use ureq::{Agent, Body, RequestBuilder};

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build the agent shared by every request of one client.
pub(crate) fn agent() -> Agent {
    Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent()
}

/// Issue one request. The response body is left unread.
pub(crate) fn send(
    agent: &Agent,
    method: HttpMethod,
    url: &str,
    cookie_header: Option<&str>,
    body: Option<&[u8]>,
) -> Result<Response<Body>, ureq::Error> {
    match (method, body) {
        (HttpMethod::Get, None) => with_cookies(agent.get(url), cookie_header).call(),
        (HttpMethod::Delete, None) => with_cookies(agent.delete(url), cookie_header).call(),
        (HttpMethod::Get, Some(body)) => {
            send_json(with_cookies(agent.get(url), cookie_header).force_send_body(), body)
        }
        (HttpMethod::Delete, Some(body)) => {
            send_json(with_cookies(agent.delete(url), cookie_header).force_send_body(), body)
        }
        (HttpMethod::Post, Some(body)) => send_json(with_cookies(agent.post(url), cookie_header), body),
        (HttpMethod::Post, None) => with_cookies(agent.post(url), cookie_header).send_empty(),
        (HttpMethod::Put, Some(body)) => send_json(with_cookies(agent.put(url), cookie_header), body),
        (HttpMethod::Put, None) => with_cookies(agent.put(url), cookie_header).send_empty(),
    }
}

/// Buffer the whole response body as text.
///
/// There is no size cap, and invalid UTF-8 is replaced rather than rejected,
/// so only a failing connection makes this return an error.
pub(crate) fn read_body(response: &mut Response<Body>) -> Result<String, ureq::Error> {
    let bytes = response.body_mut().with_config().limit(u64::MAX).read_to_vec()?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn with_cookies<B>(builder: RequestBuilder<B>, cookie_header: Option<&str>) -> RequestBuilder<B> {
    match cookie_header {
        Some(value) => builder.header("cookie", value),
        None => builder,
    }
}

fn send_json(builder: RequestBuilder<WithBody>, body: &[u8]) -> Result<Response<Body>, ureq::Error> {
    builder.content_type("application/json").send(body)
}
