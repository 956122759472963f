use reqwest::StatusCode;

/// Classified failure from the HTTP adapter.
///
/// The controller collapses all three variants into a fixed, widget-scoped
/// user-facing message, but the classification is kept for logging.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Transport/connection failure, including timeouts.
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The server answered with a non-success status code.
    #[error("unexpected HTTP status {0}")]
    HttpStatus(StatusCode),

    /// The response body did not match the expected shape.
    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Network(err)
    }
}

impl FetchError {
    /// Short tag used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Network(_) => "network",
            FetchError::HttpStatus(_) => "http-status",
            FetchError::Decode(_) => "decode",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_message_names_the_code() {
        let err = FetchError::HttpStatus(StatusCode::BAD_GATEWAY);
        assert!(err.to_string().contains("502"));
        assert_eq!(err.kind(), "http-status");
    }

    #[test]
    fn decode_error_is_classified() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err = FetchError::Decode(json_err);
        assert_eq!(err.kind(), "decode");
    }
}
