use http::StatusCode;
use thiserror::Error;

/// Errors returned by the tests API client.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("could not encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("invalid API url: {0}")]
    Url(#[from] url::ParseError),

    /// The API answered but refused the request, either with a non-200
    /// status or with `completed: false`.
    #[error("catchpoint API rejected {operation} ({status}): {body}")]
    Rejected {
        operation: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("malformed response to {operation}: {reason}")]
    MalformedResponse {
        operation: &'static str,
        reason: String,
    },
}
