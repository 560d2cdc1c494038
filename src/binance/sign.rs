//! Request Signing Primitive
//!
//! HMAC-SHA256 over the canonical query string, hex-encoded. Pure function:
//! no shared state, safe to call from any number of in-flight requests.

use crate::error::BinanceError;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Computes the HMAC-SHA256 signature of `message` under `secret`.
///
/// Returns the lowercase hex digest (always 64 characters). The secret is
/// the raw secret-key credential; it is never logged here or anywhere else.
pub fn sign(secret: &str, message: &str) -> Result<String, BinanceError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| BinanceError::Signing(format!("invalid secret key: {}", e)))?;
    mac.update(message.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Example from the Binance REST API documentation.
    const DOC_SECRET: &str = "NhqPtmdSJYdKjVHjA7PZj4Mge3R5YNiP1e3UZjInClVN65XAbvqqM6A7H5fATj0j";
    const DOC_QUERY: &str = "symbol=LTCBTC&side=BUY&type=LIMIT&timeInForce=GTC&quantity=1&price=0.1&recvWindow=5000&timestamp=1499827319559";

    #[test]
    fn matches_documented_example() {
        let signature = sign(DOC_SECRET, DOC_QUERY).unwrap();
        assert_eq!(
            signature,
            "c8db56825ae71d6d79447849e617115f4a920fa2acdcab2b053c4b2838bd6b71"
        );
    }

    #[test]
    fn output_is_64_lowercase_hex_chars() {
        let signature = sign("some-secret", "symbol=BTCUSDT&timestamp=1699564800000").unwrap();
        assert_eq!(signature.len(), 64);
        assert!(signature
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn deterministic_for_same_inputs() {
        let a = sign("secret", "a=1&b=2").unwrap();
        let b = sign("secret", "a=1&b=2").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_secrets_produce_different_signatures() {
        let a = sign("secret-one", "a=1").unwrap();
        let b = sign("secret-two", "a=1").unwrap();
        assert_ne!(a, b);
    }
}
