use thiserror::Error;

/// Failure talking to a catalog or location provider.
///
/// Every variant names the provider that produced it so log lines stay
/// attributable once both fetches run concurrently.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// Connection-level failure (DNS, refused, TLS, reset).
    #[error("[{provider}] request failed: {detail}")]
    Network {
        provider: &'static str,
        detail: String,
    },

    /// The configured request timeout elapsed.
    #[error("[{provider}] request timed out")]
    Timeout { provider: &'static str },

    /// Non-success HTTP status.
    #[error("[{provider}] HTTP error! status: {status}")]
    Status { provider: &'static str, status: u16 },

    /// The body was not the JSON shape we expect.
    #[error("[{provider}] failed to decode response: {detail}")]
    Decode {
        provider: &'static str,
        detail: String,
    },

    /// The service answered but refused the lookup (quota, reserved range).
    #[error("[{provider}] lookup rejected: {reason}")]
    Rejected {
        provider: &'static str,
        reason: String,
    },
}

pub type ProviderResult<T> = std::result::Result<T, ProviderError>;
