//! Error types for Dilovod API calls.
//!
//! Every failure a call can produce is collapsed into the single [`Error`]
//! enum. Errors that originate in a response body keep the raw body around
//! so the exact server output is available for debugging.

use http::StatusCode;

/// The error type for Dilovod API calls.
///
/// A call either fully succeeds (the extracted `result` payload is returned)
/// or fails with one of these variants. Nothing is retried or recovered
/// internally.
///
/// # Examples
///
/// ```no_run
/// use dilovod::{Client, Error};
///
/// # async fn example() -> Result<(), Error> {
/// let client = Client::new("YOUR_API_KEY")?;
///
/// match client.get_object("1100100000001").await {
///     Ok(object) => println!("Got: {object}"),
///     Err(Error::Api { message, code }) => {
///         eprintln!("API rejected the request: {message} (code {code:?})");
///     }
///     Err(Error::Transport { message, status, .. }) => {
///         eprintln!("Exchange failed: {message} (status {status:?})");
///     }
///     Err(e) => eprintln!("Other error: {e}"),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The HTTP exchange itself failed.
    ///
    /// Covers connection failures, timeouts, TLS failures, and non-success
    /// HTTP statuses from the endpoint. The underlying `reqwest::Error` is
    /// retained as the source for diagnostics.
    ///
    /// # Fields
    ///
    /// * `message` - The underlying transport error message
    /// * `status` - The HTTP status code, when the failure happened above
    ///   the connection layer
    #[error("HTTP error: {message}")]
    Transport {
        /// The underlying transport error message.
        message: String,
        /// The HTTP status code, if the exchange got far enough to have one.
        status: Option<StatusCode>,
        /// The original transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The response body was not valid JSON.
    ///
    /// Carries the parser diagnostic and the raw body so malformed
    /// responses can be inspected as received.
    #[error("Failed to decode API response: {reason}")]
    Decode {
        /// The JSON parser's diagnostic.
        reason: String,
        /// The raw response body that failed to decode.
        raw_response: String,
    },

    /// The server reported an error object in a well-formed response.
    ///
    /// # Fields
    ///
    /// * `message` - `error.message` from the response, or
    ///   `"Unknown API error"` when the server omitted it
    /// * `code` - `error.code` from the response, when present
    #[error("{message}")]
    Api {
        /// The server's error message.
        message: String,
        /// The server's error code, if it supplied one.
        code: Option<String>,
    },

    /// The response was well-formed JSON but carried neither `result` nor
    /// `error`.
    #[error("API response does not contain expected result field")]
    MissingResult {
        /// The raw response body.
        raw_response: String,
    },

    /// The request payload could not be serialized to JSON.
    #[error("Failed to serialize request: {0}")]
    Serialize(String),

    /// Invalid client configuration.
    ///
    /// Returned at construction time for a missing API key, an invalid
    /// header, or an unbuildable HTTP client.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An invalid base URL was provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl From<reqwest::Error> for Error {
    fn from(source: reqwest::Error) -> Self {
        Error::Transport {
            message: source.to_string(),
            status: source.status(),
            source,
        }
    }
}

impl Error {
    /// Returns the HTTP status code if this error has one.
    ///
    /// Only `Transport` errors that got far enough into the exchange to see
    /// a status line carry one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Transport { status, .. } => *status,
            _ => None,
        }
    }

    /// Returns the error code reported by the API, if available.
    ///
    /// # Examples
    ///
    /// ```
    /// use dilovod::Error;
    ///
    /// let err = Error::Api {
    ///     message: "bad filter".to_string(),
    ///     code: Some("E1".to_string()),
    /// };
    ///
    /// assert_eq!(err.api_error_code(), Some("E1"));
    /// assert_eq!(err.status(), None);
    /// ```
    pub fn api_error_code(&self) -> Option<&str> {
        match self {
            Error::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// Returns the raw response body if this error preserved one.
    ///
    /// Present for `Decode` and `MissingResult`, which keep the body
    /// exactly as the server sent it.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            Error::Decode { raw_response, .. } => Some(raw_response),
            Error::MissingResult { raw_response } => Some(raw_response),
            _ => None,
        }
    }
}

/// A specialized `Result` type for Dilovod API calls.
pub type Result<T> = std::result::Result<T, Error>;
