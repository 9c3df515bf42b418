use thiserror::Error;

/// Failures from the movie fetch path.
///
/// Every variant renders to a human-readable message; the browser displays
/// whichever error reaches it verbatim.
#[derive(Debug, Error)]
pub enum TmdbError {
    /// Network-level failure before any HTTP status was received.
    #[error("Network error: {0}")]
    Transport(#[source] reqwest::Error),

    /// Non-success HTTP status from the API, carrying the server's own
    /// description of what went wrong.
    #[error("{0}")]
    Api(String),

    /// Success status with a body that could not be parsed.
    #[error("Failed to parse response: {0}")]
    Decode(#[source] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_displays_the_server_message() {
        let error = TmdbError::Api("Invalid API key".to_string());

        assert_eq!(error.to_string(), "Invalid API key");
    }
}
