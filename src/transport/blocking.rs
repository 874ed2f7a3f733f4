//! Blocking executor over [`reqwest::blocking::Client`].
//!
//! Identical request shaping and classification as the async executor; the
//! call blocks the current thread until the backend replies.

use super::{auth_headers, classify_response, endpoint_url, header_map, request_url};
use crate::api::{ApiRequest, ApiResponse};
use crate::config::{Config, Credential};
use crate::transport::TransportError;
use crate::{Error, Result};
use tracing::debug;

#[derive(Debug)]
pub(crate) struct BlockingTransport {
    client: reqwest::blocking::Client,
    base: url::Url,
    credential: Credential,
}

impl BlockingTransport {
    pub(crate) fn new(config: &Config) -> Result<Self> {
        let base = endpoint_url(&config.endpoint)?;
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Transport(TransportError::Http(e)))?;
        Ok(Self {
            client,
            base,
            credential: config.credential.clone(),
        })
    }

    pub(crate) fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        let url = request_url(&self.base, &request);
        debug!(method = %request.method, path = %request.path, "dispatching LogLake request");
        let mut builder = self.client.request(request.method.clone(), url);
        for (name, value) in auth_headers(&self.credential, &request.method, &request.path) {
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        let response = builder
            .send()
            .map_err(|e| Error::Transport(TransportError::Http(e)))?;
        let status = response.status().as_u16();
        let headers = header_map(response.headers());
        let text = response
            .text()
            .map_err(|e| Error::Transport(TransportError::Http(e)))?;
        debug!(status, "LogLake response received");
        classify_response(status, headers, &text)
    }
}
