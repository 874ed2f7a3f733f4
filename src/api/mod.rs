//! Request and response shapes for the LogLake REST surface.

pub(crate) mod requests;

use crate::types::CallStatus;
use serde_json::Value;
use std::collections::HashMap;

/// A fully-shaped request against the LogLake REST surface.
///
/// Built once by [`requests`] and executed by either transport, so both
/// facades dispatch identical calls.
#[derive(Debug, Clone)]
pub(crate) struct ApiRequest {
    pub method: reqwest::Method,
    pub path: String,
    pub query: Vec<(&'static str, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub(crate) fn new(method: reqwest::Method, path: String) -> Self {
        Self {
            method,
            path,
            query: Vec::new(),
            body: None,
        }
    }
}

/// A decoded backend reply.
#[derive(Debug, Clone)]
pub(crate) struct ApiResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: Option<Value>,
}

impl ApiResponse {
    pub(crate) fn into_status(self) -> CallStatus {
        CallStatus {
            status_code: self.status_code,
            headers: self.headers,
        }
    }
}
