//! HTTP execution for the LogLake REST surface.
//!
//! Header assembly, request signing and response classification are shared
//! pure functions; only the executors in [`http`] and [`blocking`] differ,
//! by scheduling mode.

pub(crate) mod http;

#[cfg(feature = "blocking")]
pub(crate) mod blocking;

use crate::api::{ApiRequest, ApiResponse};
use crate::config::Credential;
use crate::{Error, Result};
use base64::Engine as _;
use sha2::{Digest, Sha256};
use std::collections::HashMap;

/// Errors raised by the HTTP exchange itself, before the backend's own
/// error taxonomy applies.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid endpoint {endpoint}: {reason}")]
    Endpoint { endpoint: String, reason: String },
}

/// Header carrying the backend-assigned request id on every reply.
pub(crate) const REQUEST_ID_HEADER: &str = "x-log-requestid";

/// Parse the configured endpoint into a base URL. Schemeless endpoints
/// default to https.
pub(crate) fn endpoint_url(endpoint: &str) -> Result<url::Url> {
    let raw = if endpoint.contains("://") {
        endpoint.trim_end_matches('/').to_string()
    } else {
        format!("https://{}", endpoint.trim_end_matches('/'))
    };
    url::Url::parse(&raw).map_err(|e| {
        Error::Transport(TransportError::Endpoint {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })
    })
}

/// Compose the absolute URL for a shaped request.
pub(crate) fn request_url(base: &url::Url, request: &ApiRequest) -> url::Url {
    let mut url = base.clone();
    url.set_path(&request.path);
    if !request.query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in &request.query {
            pairs.append_pair(key, value);
        }
    }
    url
}

/// Headers authenticating one request.
///
/// Access keys sign with the `LOG-V1` scheme:
/// `base64(sha256(secret \n method \n path \n timestamp))`. STS credentials
/// additionally send their security token; bearer tokens use standard
/// bearer auth.
pub(crate) fn auth_headers(
    credential: &Credential,
    method: &reqwest::Method,
    path: &str,
) -> Vec<(&'static str, String)> {
    match credential {
        Credential::Bearer(token) => vec![("authorization", format!("Bearer {}", token))],
        Credential::AccessKey {
            access_key_id,
            access_key_secret,
        } => signed_headers(access_key_id, access_key_secret, None, method, path),
        Credential::Sts {
            access_key_id,
            access_key_secret,
            security_token,
        } => signed_headers(
            access_key_id,
            access_key_secret,
            Some(security_token),
            method,
            path,
        ),
    }
}

fn signed_headers(
    key_id: &str,
    secret: &str,
    security_token: Option<&str>,
    method: &reqwest::Method,
    path: &str,
) -> Vec<(&'static str, String)> {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
        .to_string();
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    hasher.update(b"\n");
    hasher.update(method.as_str().as_bytes());
    hasher.update(b"\n");
    hasher.update(path.as_bytes());
    hasher.update(b"\n");
    hasher.update(timestamp.as_bytes());
    let signature = base64::engine::general_purpose::STANDARD.encode(hasher.finalize());
    let mut headers = vec![
        ("authorization", format!("LOG-V1 {}:{}", key_id, signature)),
        ("x-log-timestamp", timestamp),
    ];
    if let Some(token) = security_token {
        headers.push(("x-log-security-token", token.to_string()));
    }
    headers
}

/// Lower a reqwest header map into plain strings, dropping values that are
/// not valid UTF-8.
pub(crate) fn header_map(headers: &reqwest::header::HeaderMap) -> HashMap<String, String> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect()
}

/// Classify a completed HTTP exchange into a decoded response or a backend
/// error. Success bodies are parsed as JSON when present; error bodies are
/// mined for the backend's `errorCode`/`errorMessage` pair and otherwise
/// passed through raw.
pub(crate) fn classify_response(
    status: u16,
    headers: HashMap<String, String>,
    body_text: &str,
) -> Result<ApiResponse> {
    if (200..300).contains(&status) {
        let body = if body_text.trim().is_empty() {
            None
        } else {
            Some(serde_json::from_str(body_text)?)
        };
        return Ok(ApiResponse {
            status_code: status,
            headers,
            body,
        });
    }

    let request_id = headers.get(REQUEST_ID_HEADER).cloned();
    let (error_code, message) = match serde_json::from_str::<serde_json::Value>(body_text) {
        Ok(body) => (
            body.get("errorCode")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("Unknown")
                .to_string(),
            body.get("errorMessage")
                .and_then(serde_json::Value::as_str)
                .unwrap_or(body_text)
                .to_string(),
        ),
        Err(_) => ("Unknown".to_string(), body_text.to_string()),
    };
    Err(Error::Api {
        status,
        error_code,
        message,
        request_id,
    })
}
