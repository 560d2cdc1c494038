//! Query String Canonicalization
//!
//! Binance signs the exact bytes of the query string, so serialization must
//! be deterministic: parameters keep their insertion order (no re-sorting)
//! and absent values are dropped entirely. Each call site fixes one field
//! order and keeps it stable.

use crate::error::BinanceError;
use std::fmt::Display;

/// Insertion-ordered parameter set for a single request.
///
/// Values are stringified with `Display` (locale-independent) at insertion
/// time. `None` values are never serialized; empty strings pass through.
#[derive(Debug, Clone, Default)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends a required parameter.
    pub fn push(&mut self, key: &str, value: impl Display) -> &mut Self {
        self.0.push((key.to_string(), value.to_string()));
        self
    }

    /// Appends a parameter only when the value is present.
    pub fn push_opt(&mut self, key: &str, value: Option<impl Display>) -> &mut Self {
        if let Some(value) = value {
            self.push(key, value);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.iter().any(|(k, _)| k == key)
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.0
    }

    /// Produces the canonical form-urlencoded query string.
    ///
    /// Encoding the same set twice yields byte-identical output; this string
    /// is exactly what gets signed for authenticated requests.
    pub fn encode(&self) -> Result<String, BinanceError> {
        serde_urlencoded::to_string(&self.0)
            .map_err(|e| BinanceError::Signing(format!("query encoding failed: {}", e)))
    }
}

impl<K: Into<String>, V: Display> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.to_string()))
                .collect(),
        )
    }
}
