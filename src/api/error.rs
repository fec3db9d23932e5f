use std::fmt;

/// Provider errors with user-friendly messages.
#[derive(Debug)]
pub enum ApiError {
    /// Network-level failure (connection, timeout, DNS)
    Network(String),
    /// HTTP error response (4xx, 5xx)
    HttpStatus(u16, String),
    /// Failed to parse response
    Parse(String),
}

impl ApiError {
    /// Returns a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(details) => {
                if details.contains("timed out") {
                    "Request timed out. Please try again.".into()
                } else if details.contains("dns") || details.contains("resolve") {
                    "Network error: Could not reach Pexels.".into()
                } else {
                    format!("Network error: {details}")
                }
            }
            Self::HttpStatus(401 | 403, _) => {
                "Pexels rejected the API key. Check PEXELS_API_KEY.".into()
            }
            Self::HttpStatus(429, _) => "Rate limited by Pexels. Please wait a moment.".into(),
            Self::HttpStatus(404, _) => "Page not found.".into(),
            Self::HttpStatus(500..=599, _) => "Pexels server error. Please try again later.".into(),
            Self::HttpStatus(code, msg) => format!("HTTP error {code}: {msg}"),
            Self::Parse(details) => format!("Failed to parse response: {details}"),
        }
    }

    /// Returns true if this error should cause the program to exit. A
    /// rejected key cannot be recovered from by retrying.
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::HttpStatus(401 | 403, _))
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Network("request timed out".into())
        } else if err.is_connect() {
            Self::Network("connection failed".into())
        } else if err.is_decode() {
            Self::Parse(err.to_string())
        } else if let Some(status) = err.status() {
            Self::HttpStatus(
                status.as_u16(),
                status.canonical_reason().unwrap_or("").into(),
            )
        } else {
            Self::Network(err.to_string())
        }
    }
}
