use std::fmt;

use crate::{
    client::{HttpRequest, RetryingClient},
    decode::parse_advice_body,
    gate::RequestGate,
    prompt::build_advice_request,
    Advice, AdvisorError, ClientOptions, FarmProfile, Result,
};

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Formats a model name and API key into the `generateContent` URL.
///
/// Example: `("gemini-2.5-flash", "k")` →
/// `"https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent?key=k"`
pub fn generate_content_url(model: &str, api_key: &str) -> String {
    format!(
        "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
        model.trim(),
        api_key.trim()
    )
}

#[derive(Clone)]
/// Client for the grounded advisory endpoint.
///
/// Requests are retried with exponential backoff according to
/// [`ClientOptions::retry`]. Clones share one loading flag.
pub struct AdvisorClient {
    http: RetryingClient,
    endpoint_url: String,
    options: ClientOptions,
    gate: RequestGate,
}

impl fmt::Debug for AdvisorClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdvisorClient")
            .field("endpoint_url", &redact_api_key(&self.endpoint_url))
            .field("options", &self.options)
            .field("loading", &self.gate.is_loading())
            .finish()
    }
}

impl AdvisorClient {
    /// Creates a client for a full endpoint URL, API key included.
    pub fn new(endpoint_url: impl Into<String>) -> Self {
        Self {
            http: RetryingClient::new(),
            endpoint_url: endpoint_url.into(),
            options: ClientOptions::default(),
            gate: RequestGate::new(),
        }
    }

    /// Creates a client for [`DEFAULT_MODEL`].
    pub fn from_api_key(api_key: impl AsRef<str>) -> Self {
        Self::from_model(DEFAULT_MODEL, api_key)
    }

    pub fn from_model(model: impl AsRef<str>, api_key: impl AsRef<str>) -> Self {
        Self::new(generate_content_url(model.as_ref(), api_key.as_ref()))
    }

    /// Creates a client from environment variables.
    ///
    /// Reads:
    /// - `FARM_ADVISOR_API_KEY` — API key for the generative language API
    /// - `FARM_ADVISOR_MODEL` — optional model name, defaults to [`DEFAULT_MODEL`]
    ///
    /// # Example
    ///
    /// ```no_run
    /// use farm_advisor_http::AdvisorClient;
    ///
    /// let advisor = AdvisorClient::from_env().expect("missing FARM_ADVISOR_API_KEY");
    /// ```
    pub fn from_env() -> std::result::Result<Self, String> {
        let api_key = std::env::var("FARM_ADVISOR_API_KEY")
            .map_err(|_| "missing FARM_ADVISOR_API_KEY environment variable".to_owned())?;
        if api_key.trim().is_empty() {
            return Err("FARM_ADVISOR_API_KEY is set but empty".to_owned());
        }
        let model = std::env::var("FARM_ADVISOR_MODEL")
            .ok()
            .filter(|model| !model.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_owned());
        Ok(Self::from_model(model, api_key))
    }

    /// Applies client options such as timeout and retry behavior.
    pub fn with_options(mut self, opts: ClientOptions) -> Self {
        self.http = self.http.with_timeout_ms(opts.timeout_ms);
        self.options = opts;
        self
    }

    /// Reuses an existing `reqwest` client.
    pub fn with_http(mut self, http: reqwest::Client) -> Self {
        self.http = RetryingClient::with_http(http).with_timeout_ms(self.options.timeout_ms);
        self
    }

    /// Whether an advice request is currently in flight.
    pub fn is_loading(&self) -> bool {
        self.gate.is_loading()
    }

    /// Asks the advisory service for farming advice on `profile`.
    ///
    /// Blank form fields fail with [`AdvisorError::MissingInput`] before any
    /// request is sent. A response without text fails with
    /// [`AdvisorError::Blocked`]; that case is not retried.
    pub async fn get_advice(&self, profile: &FarmProfile) -> Result<Advice> {
        let payload = build_advice_request(profile)?;
        let _in_flight = self.gate.try_begin().ok_or(AdvisorError::Busy)?;

        let request = HttpRequest::post_json(self.endpoint_url.as_str(), &payload)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(crop = %profile.crop, "requesting farming advice");

        let body = self
            .http
            .send_with_retry(&request, &self.options.retry)
            .await?;
        parse_advice_body(&body)
    }
}

fn redact_api_key(url: &str) -> String {
    match url.find("key=") {
        Some(index) => {
            let value_start = index + "key=".len();
            let value_end = url[value_start..]
                .find('&')
                .map_or(url.len(), |offset| value_start + offset);
            format!("{}<redacted>{}", &url[..value_start], &url[value_end..])
        }
        None => url.to_owned(),
    }
}
