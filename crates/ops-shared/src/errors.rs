use thiserror::Error;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Empty not allowed")]
    Empty,
    #[error("Maximum length exceeded. {max} allowed but found {actual}")]
    MaxExceeded { max: usize, actual: usize },
    #[error("Invalid format. Expected {0}")]
    InvalidFormat(&'static str),
}

/// Form input that failed local checks. Produced before any request is sent
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new<S: Into<String>>(field: &'static str, message: S) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Failure of a single HTTP call. Transport failures have no status
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct HttpError {
    pub status: Option<reqwest::StatusCode>,
    pub message: String,
}

impl HttpError {
    pub fn new<S: Into<String>>(status: reqwest::StatusCode, message: S) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }

    pub fn transport<S: Into<String>>(message: S) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }

    /// The numeric status if the server responded
    pub fn status_code(&self) -> Option<u16> {
        self.status.map(|x| x.as_u16())
    }

    /// Returns `true` if the request never got a response
    #[must_use]
    pub fn is_transport(&self) -> bool {
        self.status.is_none()
    }
}
