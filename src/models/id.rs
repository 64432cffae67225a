//! Record and user identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Ids arrive as integers or numeric strings depending on the issuer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Int(i64),
    Text(String),
}

impl RawId {
    /// Numeric value, reading numeric strings too.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            RawId::Int(id) => Some(*id),
            RawId::Text(text) => text.trim().parse().ok(),
        }
    }

    /// True only for an integer id equal to `id`; `"7"` does not match `7`.
    pub fn is_int(&self, id: i64) -> bool {
        matches!(self, RawId::Int(own) if *own == id)
    }
}

impl fmt::Display for RawId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawId::Int(id) => write!(f, "{id}"),
            RawId::Text(text) => f.write_str(text),
        }
    }
}
