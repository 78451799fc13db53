//! Error types for the page client.

/// Errors that abort a scrape run.
///
/// Unavailable pages are not errors here: client errors from the site and
/// exhausted retries make a fetch yield `Ok(None)` instead, and the caller
/// drops that security. What remains is the transport class (DNS,
/// connection, timeout, body read), where no HTTP status ever arrived to
/// classify the failure.
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    /// Request never produced a usable HTTP response.
    #[error("transport error")]
    Transport(#[from] reqwest::Error),
}
