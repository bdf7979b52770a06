//! Error types shared across the client.

use std::fmt;
use std::io;

/// Failure of a single HTTP request against the quiz API.
#[derive(Debug)]
pub enum RequestError {
    /// The request never reached the server or the response never came back.
    Network(reqwest::Error),
    /// The server answered with a non-2xx status.
    Status { status: u16, url: String },
    /// The body of a 2xx response did not have the expected shape.
    Decode(serde_json::Error),
}

impl RequestError {
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::Network(e) => write!(f, "network error: {}", e),
            RequestError::Status { status, url } => {
                write!(f, "server returned {} for {}", status, url)
            }
            RequestError::Decode(e) => write!(f, "malformed response body: {}", e),
        }
    }
}

impl std::error::Error for RequestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RequestError::Network(e) => Some(e),
            RequestError::Status { .. } => None,
            RequestError::Decode(e) => Some(e),
        }
    }
}

impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> Self {
        RequestError::Network(err)
    }
}

impl From<serde_json::Error> for RequestError {
    fn from(err: serde_json::Error) -> Self {
        RequestError::Decode(err)
    }
}

/// Client-side check that failed before any request was sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyQuestionText,
    EmptyOption(usize),
    CorrectAnswerOutOfRange(usize),
    Unanswered { missing: usize },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyQuestionText => write!(f, "Question text is required."),
            ValidationError::EmptyOption(_) => write!(f, "All options are required."),
            ValidationError::CorrectAnswerOutOfRange(index) => {
                write!(f, "Correct answer {} is not one of the options.", index)
            }
            ValidationError::Unanswered { .. } => {
                write!(f, "Please answer all questions before submitting.")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Failure reading or writing the transient result slot.
#[derive(Debug)]
pub enum StorageError {
    Io(io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "result storage I/O error: {}", e),
            StorageError::Json(e) => write!(f, "stored result is not valid JSON: {}", e),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(e) => Some(e),
            StorageError::Json(e) => Some(e),
        }
    }
}

impl From<io::Error> for StorageError {
    fn from(err: io::Error) -> Self {
        StorageError::Io(err)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Json(err)
    }
}

/// The result screen was entered with nothing stored to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingResultError;

impl fmt::Display for MissingResultError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no test result stored")
    }
}

impl std::error::Error for MissingResultError {}

/// Top-level error for running the client.
#[derive(Debug)]
pub enum AppError {
    Request(RequestError),
    Storage(StorageError),
    Logging(tracing_appender::rolling::InitError),
    Io(io::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Request(e) => write!(f, "Request failed: {}", e),
            AppError::Storage(e) => write!(f, "Storage failed: {}", e),
            AppError::Logging(e) => write!(f, "Could not open log file: {}", e),
            AppError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Request(e) => Some(e),
            AppError::Storage(e) => Some(e),
            AppError::Logging(e) => Some(e),
            AppError::Io(e) => Some(e),
        }
    }
}

impl From<RequestError> for AppError {
    fn from(err: RequestError) -> Self {
        AppError::Request(err)
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::Storage(err)
    }
}

impl From<tracing_appender::rolling::InitError> for AppError {
    fn from(err: tracing_appender::rolling::InitError) -> Self {
        AppError::Logging(err)
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Io(err)
    }
}
