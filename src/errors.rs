use thiserror::Error;

/// Errors raised by the streamed matches API client.
///
/// Listing operations in [`crate::directory`] never surface these; they use
/// the variant to pick the next fallback step.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApiError {
    /// The request never produced a response (DNS, TCP, TLS...)
    #[error("Request to {0} failed: {1}")]
    Request(String, String),

    /// No response within the configured timeout
    #[error("Request timeout after {1}s to {0}")]
    Timeout(String, u64),

    /// Server answered with a non-success status
    #[error("Server returned {0} for {1}")]
    Status(u16, String),

    /// Response body was not the expected JSON
    #[error("Failed to decode response from {0}: {1}")]
    Decode(String, String),

    /// Configured base URL is unusable
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

impl ApiError {
    /// True when the server answered but with a non-2xx status.
    ///
    /// The fallback chains treat this ("response not ok") differently from a
    /// request that failed outright.
    pub fn is_status(&self) -> bool {
        matches!(self, ApiError::Status(..))
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Status(code, _) => Some(*code),
            _ => None,
        }
    }

    /// Multi-line description with a suggestion.
    pub fn diagnostics(&self) -> String {
        match self {
            ApiError::Request(url, source) => {
                format!("Request Failed\nURL: {}\nError: {}\nSuggestion: Check your connection or try `use_doh` in config", url, source)
            }
            ApiError::Timeout(url, secs) => {
                format!("Request Timeout\nURL: {}\nTimeout: {} seconds\nSuggestion: The API is slow or offline, raise `request_timeout_secs`", url, secs)
            }
            ApiError::Status(status, url) => {
                format!("Server Error\nStatus: {}\nURL: {}\nSuggestion: Endpoint may not exist for this category, try again later", status, url)
            }
            ApiError::Decode(url, source) => {
                format!("Decode Error\nURL: {}\nError: {}\nSuggestion: API response format changed", url, source)
            }
            ApiError::InvalidBaseUrl(url) => {
                format!("Invalid Base URL\nValue: {}\nSuggestion: Use an absolute http(s) URL such as https://host/api", url)
            }
        }
    }

    /// Classify a reqwest failure for `url`.
    pub fn from_reqwest(url: &str, err: reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            ApiError::Timeout(url.to_string(), timeout_secs)
        } else if err.is_decode() {
            ApiError::Decode(url.to_string(), err.to_string())
        } else if let Some(status) = err.status() {
            ApiError::Status(status.as_u16(), url.to_string())
        } else {
            ApiError::Request(url.to_string(), err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        let err = ApiError::Status(404, "https://x/api/matches/f1".to_string());
        assert!(err.is_status());
        assert_eq!(err.status_code(), Some(404));

        let err = ApiError::Timeout("https://x".to_string(), 10);
        assert!(!err.is_status());
        assert_eq!(err.status_code(), None);
    }

    #[test]
    fn test_diagnostics_mentions_url() {
        let err = ApiError::Decode("https://x/api/sports".to_string(), "eof".to_string());
        let diag = err.diagnostics();
        assert!(diag.contains("https://x/api/sports"));
        assert!(diag.contains("eof"));
    }
}
