//! Decode targets and request payloads for the node API.
//!
//! # Design
//! `Response` and `ResponseArray` are free-form envelopes for endpoints whose
//! shape is not modelled; callers pick fields out of `data` by name. Key and
//! bridge records are typed because their shape is stable. The dispatcher is
//! indifferent to which of these it decodes into.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Single-object envelope: `{"data": {...}}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Response {
    #[serde(default)]
    pub data: HashMap<String, Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<Value>,
}

/// Array envelope: `{"data": [{...}, ...]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ResponseArray {
    #[serde(default)]
    pub data: Vec<HashMap<String, Value>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<Value>,
}

/// Payload for creating a bridge, and the attributes of a stored one.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BridgeTypeAttributes {
    pub name: String,
    pub url: String,
    #[serde(rename = "requestData", default, skip_serializing_if = "String::is_empty")]
    pub request_data: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BridgeTypeData {
    pub attributes: BridgeTypeAttributes,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BridgeType {
    pub data: BridgeTypeData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OcrKeyAttributes {
    #[serde(rename = "configPublicKey")]
    pub config_public_key: String,
    #[serde(rename = "offChainPublicKey")]
    pub off_chain_public_key: String,
    #[serde(rename = "onChainSigningAddress")]
    pub on_chain_signing_address: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OcrKeyData {
    pub id: String,
    pub attributes: OcrKeyAttributes,
}

/// An off-chain reporting key bundle.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OcrKey {
    pub data: OcrKeyData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OcrKeys {
    #[serde(default)]
    pub data: Vec<OcrKeyData>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct P2pKeyAttributes {
    pub id: i64,
    #[serde(rename = "peerId")]
    pub peer_id: String,
    #[serde(rename = "publicKey")]
    pub public_key: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct P2pKeyData {
    pub attributes: P2pKeyAttributes,
}

/// A peer-to-peer networking key. Addressed by its numeric `attributes.id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct P2pKey {
    pub data: P2pKeyData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct P2pKeys {
    #[serde(default)]
    pub data: Vec<P2pKeyData>,
}

/// Payload for `POST /v2/ocr/specs`.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct SpecV2Create<'a> {
    pub toml: &'a str,
}

/// Reply of `POST /v2/ocr/specs`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SpecV2Created {
    #[serde(rename = "jobID")]
    pub job_id: i32,
}

/// Render a JSON value the way ids are shown to callers: strings without
/// quotes, everything else in its JSON form.
pub(crate) fn display_value(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}
