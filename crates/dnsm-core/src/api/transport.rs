use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{header, Client};
use tracing::debug;

use super::request::OutboundRequest;
use super::response::Exchange;

/// The network call underneath the pipeline. Never fails: anything short of
/// a response is reported as `Exchange::Transport`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn dispatch(&self, request: &OutboundRequest) -> Exchange;
}

/// `Transport` over reqwest.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn dispatch(&self, request: &OutboundRequest) -> Exchange {
        let url = self.url(&request.path);

        let mut builder = self
            .client
            .request(request.method.into(), &url)
            .header(header::ACCEPT, "application/json");
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(ref body) = request.body {
            builder = builder.json(body);
        }
        if let Some(ref token) = request.bearer {
            builder = builder.bearer_auth(token);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                debug!(url = %url, error = %e, timeout = e.is_timeout(), "Request got no response");
                return Exchange::Transport(e.to_string());
            }
        };

        let status = response.status();
        let reason = status.canonical_reason().unwrap_or_default().to_string();
        match response.text().await {
            Ok(body) => Exchange::Completed {
                status: status.as_u16(),
                reason,
                body,
            },
            Err(e) => Exchange::Transport(format!("Failed to read response body: {}", e)),
        }
    }
}
