use thiserror::Error;

/// Errors from [`crate::routing::RoutingService`] calls.
///
/// The sequencer treats every variant the same way, as "no result", but the
/// variants keep enough detail for logging.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    /// Fewer points than the request needs were provided.
    #[error("at least two points are required")]
    EmptyInput,
    /// The request could not reach the service.
    #[error("network error contacting {url}: {message}")]
    NetworkError {
        /// Request URL.
        url: String,
        /// Transport error description.
        message: String,
    },
    /// The service did not answer within the configured timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Request URL.
        url: String,
        /// Configured timeout in whole seconds.
        timeout_secs: u64,
    },
    /// The service answered with a non-success HTTP status.
    #[error("HTTP {status} from {url}: {message}")]
    HttpError {
        /// Request URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },
    /// The service reported a non-`Ok` status code.
    #[error("routing service returned {code}: {message}")]
    ServiceError {
        /// Service status code, e.g. `"NoTrips"`.
        code: String,
        /// Service message, possibly empty.
        message: String,
    },
    /// The response body was not valid JSON of the expected shape.
    #[error("failed to parse routing response: {message}")]
    ParseError {
        /// Decoder error description.
        message: String,
    },
    /// The response parsed but carried missing or out-of-range fields.
    #[error("invalid routing response: {message}")]
    InvalidResponse {
        /// Description of the violated expectation.
        message: String,
    },
}
