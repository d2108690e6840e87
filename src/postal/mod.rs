//! Postal-code domain types and the redundant-provider race.

use serde::Serialize;

pub mod race;

/// A Brazilian postal code: exactly eight ASCII decimal digits.
///
/// Parsing happens before any network call; a malformed identifier is
/// rejected at the edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostalCode(String);

impl PostalCode {
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.len() == 8 && raw.bytes().all(|b| b.is_ascii_digit()) {
            Some(Self(raw.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PostalCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Provider-agnostic address, normalized from each resolver's own shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Address {
    pub cep: String,
    pub street: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
}
