//! `farm-advisor-http` is an async HTTP client for a farming-advisory app.
//!
//! It talks to two remote services:
//! - [`AdvisorClient::get_advice`] asks a generative language model for
//!   grounded advice, retrying with exponential backoff;
//! - [`DiagnosisClient::diagnose_image`] sends a leaf photo to a disease
//!   classification server, once.
//!
//! The retry loop is available on its own as [`retry_with_backoff`].

mod advisor;
mod client;
mod decode;
mod diagnosis;
mod error;
mod options;
mod prompt;
mod retry;
mod types;
mod wire;

pub mod gate;
pub mod markup;

pub use advisor::{generate_content_url, AdvisorClient, DEFAULT_MODEL};
pub use client::{HttpRequest, HttpResponse, RetryingClient};
pub use diagnosis::{host_to_diagnose_url, DiagnosisClient, DEFAULT_DIAGNOSIS_PORT};
pub use error::{AdvisorError, UserMessage};
pub use options::ClientOptions;
pub use retry::{retry_with_backoff, RetryPolicy};
pub use types::{Advice, Citation, CropType, Diagnosis, FarmProfile, Locale};

pub type Result<T> = std::result::Result<T, AdvisorError>;
