use thiserror::Error;

/// Errors returned by the airport lookup client.
#[derive(Debug, Error)]
pub enum LookupError {
    /// A code, code type or authority was rejected before any request was sent
    #[error("{0}")]
    InvalidArgument(String),

    /// The upstream answered with anything other than 200 OK
    #[error("HTTP Error: {code} {message}")]
    Http { code: u16, message: String },

    /// The operation has no upstream counterpart
    #[error("{0} is not implemented")]
    NotImplemented(&'static str),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid base url: {0}")]
    Url(#[from] url::ParseError),
}

impl LookupError {
    pub fn invalid(message: impl Into<String>) -> Self {
        LookupError::InvalidArgument(message.into())
    }

    /// True for errors raised before the network was touched
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, LookupError::InvalidArgument(_))
    }

    /// Status code of an upstream rejection, if that is what this is
    pub fn http_status(&self) -> Option<u16> {
        match self {
            LookupError::Http { code, .. } => Some(*code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_display() {
        let err = LookupError::Http {
            code: 404,
            message: "Not Found".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP Error: 404 Not Found");
        assert_eq!(err.http_status(), Some(404));
        assert!(!err.is_invalid_argument());
    }

    #[test]
    fn test_invalid_argument_keeps_message() {
        let err = LookupError::invalid("Invalid ICAO Code");
        assert_eq!(err.to_string(), "Invalid ICAO Code");
        assert!(err.is_invalid_argument());
        assert_eq!(err.http_status(), None);
    }
}
