use std::time::Duration;

use reqwest::{header, Method};
use serde::Serialize;

use crate::{decode::truncate_chars, retry::retry_with_backoff, AdvisorError, Result, RetryPolicy};

/// Characters of an error body kept in retried failure messages.
const ERROR_DETAIL_CHARS: usize = 100;

/// A single outgoing request. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpRequest {
    /// Builds a `POST` request carrying `payload` as JSON.
    pub fn post_json<T: Serialize + ?Sized>(url: impl Into<String>, payload: &T) -> Result<Self> {
        let body = serde_json::to_string(payload)
            .map_err(|err| AdvisorError::Decode(format!("could not encode request body: {err}")))?;
        Ok(Self {
            url: url.into(),
            method: Method::POST,
            headers: vec![(
                header::CONTENT_TYPE.as_str().to_owned(),
                "application/json".to_owned(),
            )],
            body,
        })
    }
}

/// Status and body text of a completed exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Thin `reqwest` wrapper with an optional bounded retry loop.
#[derive(Clone, Debug, Default)]
pub struct RetryingClient {
    http: reqwest::Client,
    timeout_ms: Option<u64>,
}

impl RetryingClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reuses an existing `reqwest` client and its connection pool.
    pub fn with_http(http: reqwest::Client) -> Self {
        Self {
            http,
            timeout_ms: None,
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: Option<u64>) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Performs `request` once. Any status is returned as a response.
    pub async fn send_once(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let mut builder = self
            .http
            .request(request.method.clone(), &request.url)
            .body(request.body.clone());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(timeout_ms) = self.timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }

        // The advisory URL carries the API key, so it never goes into errors or logs.
        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport_error)?;

        Ok(HttpResponse { status, body })
    }

    /// Performs `request` under `policy` and returns the successful body text.
    ///
    /// Non-2xx statuses and transport errors are treated alike and retried
    /// until the policy runs out of attempts.
    pub async fn send_with_retry(&self, request: &HttpRequest, policy: &RetryPolicy) -> Result<String> {
        retry_with_backoff(policy, || async move {
            let response = self.send_once(request).await?;
            if response.is_success() {
                return Ok(response.body);
            }

            #[cfg(feature = "tracing")]
            tracing::error!(status = response.status, body = %response.body, "request failed");

            Err(AdvisorError::Http {
                status: response.status,
                detail: truncate_chars(&response.body, ERROR_DETAIL_CHARS).to_owned(),
            })
        })
        .await
    }
}

fn transport_error(err: reqwest::Error) -> AdvisorError {
    AdvisorError::Transport(err.without_url())
}
