use crate::RetryPolicy;

/// Configures transport timeout and retry behavior.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClientOptions {
    /// Per-request timeout in milliseconds. `None` keeps the transport default.
    pub timeout_ms: Option<u64>,
    /// Retry policy for the advisory endpoint. The diagnosis endpoint is never retried.
    pub retry: RetryPolicy,
}
