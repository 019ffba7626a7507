use thiserror::Error;

/// Failure of a provider call
///
/// A logical rejection (the service answered, but with `Response: "False"`)
/// is kept apart from transport failures so callers can surface the
/// provider's own message verbatim.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
    /// The provider answered with a failure envelope, e.g. "Movie not found!"
    #[error("{0}")]
    Rejected(String),

    /// Network error or non-2xx status
    #[error("{}", describe_transport(.status, .message))]
    Transport { status: Option<u16>, message: String },

    /// The body was not a recognizable envelope
    #[error("Unexpected response from movie provider: {0}")]
    Decode(String),
}

impl ProviderError {
    pub fn transport(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Transport {
            status,
            message: message.into(),
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

fn describe_transport(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(code) => format!("Can't fetch data ({})", code),
        None => format!("Can't fetch data: {}", message),
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        Self::transport(e.status().map(|s| s.as_u16()), e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(ProviderError::Rejected("Movie not found!".to_string()).to_string(), "Movie not found!");
        assert_eq!(ProviderError::transport(Some(503), "Service Unavailable").to_string(), "Can't fetch data (503)");
        assert_eq!(
            ProviderError::transport(None, "connection refused").to_string(),
            "Can't fetch data: connection refused"
        );
    }
}
