//! # HTTP Transport
//!
//! `reqwest`-backed implementation of [`HttpTransport`]. Redirects are followed
//! (the random-comic endpoint answers with one) and every request is bounded
//! by the configured timeout.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::domain::traits::{HttpResponse, HttpTransport};

pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(timeout_secs: u64) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse, String> {
        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.send().await.map_err(|e| e.to_string())?;
        let status = response.status().as_u16();
        tracing::debug!("GET {} -> {}", url, status);

        let body = response.bytes().await.map_err(|e| e.to_string())?;
        Ok(HttpResponse { status, body })
    }
}
