use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::{
    client::{HttpRequest, RetryingClient},
    decode::parse_diagnosis_body,
    gate::RequestGate,
    wire::DiagnoseRequest,
    AdvisorError, ClientOptions, CropType, Diagnosis, Result,
};

/// Port the diagnosis server listens on.
pub const DEFAULT_DIAGNOSIS_PORT: u16 = 5000;

/// Formats a host into the diagnosis endpoint URL.
///
/// Example: `"192.168.1.110"` → `"http://192.168.1.110:5000/diagnose"`
pub fn host_to_diagnose_url(host: &str) -> String {
    format!("http://{}:{DEFAULT_DIAGNOSIS_PORT}/diagnose", host.trim())
}

#[derive(Clone)]
/// Client for the leaf image diagnosis server.
///
/// Every call is a single request: failures are returned immediately and
/// never retried.
pub struct DiagnosisClient {
    http: RetryingClient,
    diagnose_url: String,
    timeout_ms: Option<u64>,
    gate: RequestGate,
}

impl fmt::Debug for DiagnosisClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosisClient")
            .field("diagnose_url", &self.diagnose_url)
            .field("timeout_ms", &self.timeout_ms)
            .field("loading", &self.gate.is_loading())
            .finish()
    }
}

impl DiagnosisClient {
    pub fn new(diagnose_url: impl Into<String>) -> Self {
        Self {
            http: RetryingClient::new(),
            diagnose_url: diagnose_url.into(),
            timeout_ms: None,
            gate: RequestGate::new(),
        }
    }

    /// Creates a client for a server on `host` at the default port.
    pub fn from_host(host: impl AsRef<str>) -> Self {
        Self::new(host_to_diagnose_url(host.as_ref()))
    }

    /// Creates a client from `FARM_DIAGNOSIS_URL`.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use farm_advisor_http::DiagnosisClient;
    ///
    /// let diagnosis = DiagnosisClient::from_env().expect("missing FARM_DIAGNOSIS_URL");
    /// ```
    pub fn from_env() -> std::result::Result<Self, String> {
        let url = std::env::var("FARM_DIAGNOSIS_URL")
            .map_err(|_| "missing FARM_DIAGNOSIS_URL environment variable".to_owned())?;
        if url.trim().is_empty() {
            return Err("FARM_DIAGNOSIS_URL is set but empty".to_owned());
        }
        Ok(Self::new(url.trim()))
    }

    /// Applies client options. Only the timeout is used; diagnosis is never retried.
    pub fn with_options(mut self, opts: ClientOptions) -> Self {
        self.timeout_ms = opts.timeout_ms;
        self.http = self.http.with_timeout_ms(opts.timeout_ms);
        self
    }

    pub fn is_loading(&self) -> bool {
        self.gate.is_loading()
    }

    /// Encodes raw image bytes as base64 and diagnoses them.
    pub async fn diagnose_image(&self, image: &[u8], crop: CropType) -> Result<Diagnosis> {
        let encoded = STANDARD.encode(image);
        self.diagnose_base64(&encoded, crop).await
    }

    /// Sends an already base64-encoded image for diagnosis.
    ///
    /// A non-2xx status fails with [`AdvisorError::Diagnosis`] carrying the
    /// raw body text. Network and body decoding failures are reported as
    /// [`AdvisorError::DiagnosisUnavailable`] and [`AdvisorError::DiagnosisDecode`].
    pub async fn diagnose_base64(&self, image_base64: &str, crop: CropType) -> Result<Diagnosis> {
        let _in_flight = self.gate.try_begin().ok_or(AdvisorError::Busy)?;

        let payload = DiagnoseRequest {
            image: image_base64,
            crop_type: crop.as_str(),
        };
        let request = HttpRequest::post_json(self.diagnose_url.as_str(), &payload)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(crop = %crop, bytes = image_base64.len(), "sending image for diagnosis");

        let response = self.http.send_once(&request).await.map_err(|err| match err {
            AdvisorError::Transport(inner) => AdvisorError::DiagnosisUnavailable(inner),
            other => other,
        })?;
        if !response.is_success() {
            #[cfg(feature = "tracing")]
            tracing::error!(status = response.status, body = %response.body, "diagnosis failed");

            return Err(AdvisorError::Diagnosis {
                status: response.status,
                detail: response.body,
            });
        }

        parse_diagnosis_body(&response.body).map_err(|err| match err {
            AdvisorError::Decode(message) => AdvisorError::DiagnosisDecode(message),
            other => other,
        })
    }
}
