use std::fmt;

/// Why a backend call failed. For sitemap assembly every variant counts as a
/// network failure of the collection being fetched.
#[derive(Debug)]
pub enum FetchError {
    /// Transport-level failure (connect, TLS, timeout, body read)
    Request(reqwest::Error),
    /// Backend answered with a non-2xx status
    Status { endpoint: String, status: u16 },
    /// Body did not have the expected JSON shape
    Decode { endpoint: String, reason: String },
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Request(err) => write!(f, "Request failed: {}", err),
            FetchError::Status { endpoint, status } => {
                write!(f, "/{} returned HTTP {}", endpoint, status)
            }
            FetchError::Decode { endpoint, reason } => {
                write!(f, "Malformed response from /{}: {}", endpoint, reason)
            }
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Request(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Request(err)
    }
}
