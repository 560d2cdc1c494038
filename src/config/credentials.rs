//! API Credential Management
//!
//! Secure handling of Binance API credentials loaded from environment variables.
//! Credentials are never logged and are masked when displayed.

use std::fmt;

/// Secure string wrapper that masks sensitive data in logs
///
/// Wraps sensitive strings (API keys, secrets) so they are never accidentally
/// exposed in logs or error messages. Debug output shows only
/// `SecretString(***)` and Display shows the truncated form `first4...last4`.
#[derive(Clone)]
pub struct SecretString(String);

impl SecretString {
    pub fn new(value: String) -> Self {
        SecretString(value)
    }

    /// Returns a reference to the inner string.
    ///
    /// Only use this when the value is actually needed for a request.
    /// Never log or display the returned value.
    pub fn expose_secret(&self) -> &str {
        &self.0
    }

    /// Returns a masked version for safe logging (`first4...last4`).
    pub fn masked(&self) -> String {
        let s = &self.0;
        if s.len() <= 8 {
            return "***".to_string();
        }
        format!("{}...{}", &s[..4], &s[s.len() - 4..])
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretString(***)")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.masked())
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        SecretString::new(s)
    }
}

/// Binance API credential pair.
///
/// Immutable for the lifetime of a client instance. The API key alone is
/// enough for user-data-stream calls; signed calls require both halves.
#[derive(Clone, Debug)]
pub struct Credentials {
    /// Binance API key (public identifier, sent as the `X-MBX-APIKEY` header)
    pub api_key: SecretString,
    /// Binance secret key (private HMAC signing key)
    pub secret_key: SecretString,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            secret_key: SecretString::new(secret_key.into()),
        }
    }

    /// Loads credentials from `BINANCE_API_KEY` / `BINANCE_SECRET_KEY`.
    ///
    /// Returns `None` when either variable is unset or empty after trimming.
    /// A missing pair is not an error at startup: the server simply runs in
    /// public-only mode and authenticated tools fail at dispatch time.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("BINANCE_API_KEY").ok()?;
        let secret_key = std::env::var("BINANCE_SECRET_KEY").ok()?;

        let api_key = api_key.trim().to_string();
        let secret_key = secret_key.trim().to_string();

        if api_key.is_empty() || secret_key.is_empty() {
            return None;
        }

        Some(Self {
            api_key: SecretString::new(api_key),
            secret_key: SecretString::new(secret_key),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_masks_secret() {
        let secret = SecretString::new("supersecretapikey123".to_string());
        assert_eq!(format!("{:?}", secret), "SecretString(***)");
        assert_eq!(secret.masked(), "supe...y123");
    }

    #[test]
    fn short_secrets_fully_masked() {
        let secret = SecretString::new("short".to_string());
        assert_eq!(secret.masked(), "***");
    }

    #[test]
    fn credentials_debug_never_exposes_values() {
        let creds = Credentials::new("my-api-key-value", "my-secret-key-value");
        let dbg = format!("{:?}", creds);
        assert!(!dbg.contains("my-api-key-value"));
        assert!(!dbg.contains("my-secret-key-value"));
    }
}
