//! Resource operations: one dispatcher call per endpoint.
//!
//! Each method fixes the verb, path, payload and expected status of its
//! endpoint. The node is not uniform about success codes (spec deletes answer
//! 204, bridge and key deletes answer 200), so every code is spelled out at
//! its call site.

use serde::de::IgnoredAny;

use crate::client::NodeClient;
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::types::{
    display_value, BridgeType, BridgeTypeAttributes, OcrKey, OcrKeys, P2pKey, P2pKeys, Response,
    ResponseArray, SpecV2Create, SpecV2Created,
};

const OK: u16 = 200;

impl NodeClient {
    /// Create a job spec from its raw JSON and return the new spec's id.
    pub fn create_spec(&self, spec: &str) -> Result<String, ApiError> {
        let resp: Response = self.execute_raw(HttpMethod::Post, "/v2/specs", Some(spec.as_bytes()), OK)?;
        Ok(display_value(resp.data.get("id")))
    }

    pub fn read_spec(&self, id: &str) -> Result<Response, ApiError> {
        self.execute_raw(HttpMethod::Get, &format!("/v2/specs/{id}"), None, OK)
    }

    /// Fire-and-forget: the node answers 204 with no body.
    pub fn delete_spec(&self, id: &str) -> Result<(), ApiError> {
        self.execute_no_content(HttpMethod::Delete, &format!("/v2/specs/{id}"), None)
    }

    /// Create an OCR job from a TOML spec and return its job id.
    pub fn create_spec_v2(&self, toml: &str) -> Result<String, ApiError> {
        let created: SpecV2Created =
            self.execute(HttpMethod::Post, "/v2/ocr/specs", &SpecV2Create { toml }, OK)?;
        Ok(created.job_id.to_string())
    }

    /// Fire-and-forget, like `delete_spec`.
    pub fn delete_spec_v2(&self, id: &str) -> Result<(), ApiError> {
        self.execute_no_content(HttpMethod::Delete, &format!("/v2/ocr/specs/{id}"), None)
    }

    pub fn create_bridge(&self, name: &str, url: &str) -> Result<(), ApiError> {
        let attributes = BridgeTypeAttributes {
            name: name.to_string(),
            url: url.to_string(),
            request_data: String::new(),
        };
        self.execute_json_no_content(HttpMethod::Post, "/v2/bridge_types", &attributes)
    }

    pub fn read_bridge(&self, name: &str) -> Result<BridgeType, ApiError> {
        self.execute_raw(HttpMethod::Get, &format!("/v2/bridge_types/{name}"), None, OK)
    }

    /// The reply body is discarded, but its status is checked so a missing
    /// bridge is reported as `NotFound`.
    pub fn delete_bridge(&self, name: &str) -> Result<(), ApiError> {
        let _: IgnoredAny = self.execute_raw(HttpMethod::Delete, &format!("/v2/bridge_types/{name}"), None, OK)?;
        Ok(())
    }

    /// Id of the first wallet listed under the user's balances.
    pub fn read_wallet(&self) -> Result<String, ApiError> {
        let wallets: ResponseArray = self.execute_raw(HttpMethod::Get, "/v2/user/balances", None, OK)?;
        let first = wallets.data.first().ok_or(ApiError::NoWallets)?;
        Ok(display_value(first.get("id")))
    }

    pub fn create_ocr_key(&self) -> Result<OcrKey, ApiError> {
        self.execute_raw(HttpMethod::Post, "/v2/off_chain_reporting_keys", None, OK)
    }

    pub fn read_ocr_keys(&self) -> Result<OcrKeys, ApiError> {
        self.execute_raw(HttpMethod::Get, "/v2/off_chain_reporting_keys", None, OK)
    }

    pub fn delete_ocr_key(&self, id: &str) -> Result<(), ApiError> {
        let path = format!("/v2/off_chain_reporting_keys/{id}");
        let _: IgnoredAny = self.execute_raw(HttpMethod::Delete, &path, None, OK)?;
        Ok(())
    }

    pub fn create_p2p_key(&self) -> Result<P2pKey, ApiError> {
        self.execute_raw(HttpMethod::Post, "/v2/p2p_keys", None, OK)
    }

    pub fn read_p2p_keys(&self) -> Result<P2pKeys, ApiError> {
        self.execute_raw(HttpMethod::Get, "/v2/p2p_keys", None, OK)
    }

    pub fn delete_p2p_key(&self, id: i64) -> Result<(), ApiError> {
        let _: IgnoredAny = self.execute_raw(HttpMethod::Delete, &format!("/v2/p2p_keys/{id}"), None, OK)?;
        Ok(())
    }
}
