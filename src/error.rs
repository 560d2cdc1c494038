use thiserror::Error;

/// Errors produced by the Binance transport and façade.
///
/// Every failure is surfaced to the caller as one of these variants; the
/// client never retries, backs off, or swallows an error.
#[derive(Error, Debug)]
pub enum BinanceError {
    /// Network-level failure (DNS, connect, reset, timeout). Surfaced as-is.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx HTTP response from the exchange. Carries the HTTP status and,
    /// when the body parsed as JSON, the exchange's own error code/message;
    /// otherwise the HTTP status text.
    #[error("binance api error (status {status}): {message}")]
    Api {
        status: u16,
        code: Option<i64>,
        message: String,
    },

    /// A SIGNED or USER_STREAM call was attempted without the required
    /// credential(s). Raised locally, before any network call.
    #[error("missing credentials: {0}")]
    MissingCredentials(&'static str),

    /// Success status but a non-empty body that did not parse as JSON.
    /// An empty body is not an error; it decodes to an empty object.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// HMAC construction failed. Should not happen with a non-empty secret.
    #[error("signing error: {0}")]
    Signing(String),
}

impl BinanceError {
    /// Exchange-supplied error code, if the remote returned one.
    pub fn exchange_code(&self) -> Option<i64> {
        match self {
            BinanceError::Api { code, .. } => *code,
            _ => None,
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            BinanceError::Transport(_) => "transport_error",
            BinanceError::Api { .. } => "api_error",
            BinanceError::MissingCredentials(_) => "missing_credentials",
            BinanceError::MalformedResponse(_) => "malformed_response",
            BinanceError::Signing(_) => "signing_error",
        }
    }
}

/// Error type for the tool dispatch and server layers.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Authentication required: {0}")]
    AuthRequired(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Binance API error: {0}")]
    BinanceApi(#[from] BinanceError),
}

pub type Result<T> = std::result::Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_carries_exchange_code() {
        let err = BinanceError::Api {
            status: 400,
            code: Some(-1121),
            message: "Invalid symbol.".to_string(),
        };
        assert_eq!(err.exchange_code(), Some(-1121));
        assert!(err.to_string().contains("Invalid symbol."));
        assert_eq!(err.error_type(), "api_error");
    }

    #[test]
    fn missing_credentials_is_local() {
        let err = BinanceError::MissingCredentials("secret key required for signed requests");
        assert_eq!(err.error_type(), "missing_credentials");
        assert!(err.exchange_code().is_none());
    }
}
