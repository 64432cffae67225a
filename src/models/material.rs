//! Material (stock) records as served by the management API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::id::RawId;

/// Stock bucket of a single material record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockLevel {
    OutOfStock,
    /// At or below the reorder level. Still counted as in stock.
    Low,
    InStock,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialRecord {
    pub id: RawId,
    #[serde(default)]
    pub name: Option<String>,
    /// Decimal quantity, usually a JSON string such as `"12.50"`.
    #[serde(default)]
    pub quantity: Option<Value>,
    #[serde(default)]
    pub reorder_level: Option<Value>,
}

/// Parse a decimal field that may arrive as a string or a number.
///
/// Strings are read up to the end of their leading decimal literal, so
/// `"12 kg"` is 12 and `"1,500"` is 1. `"Infinity"` is accepted; `NaN` never
/// parses.
pub fn parse_decimal(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => leading_decimal(s),
        _ => None,
    }
}

fn leading_decimal(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    if s[end..].starts_with("Infinity") {
        return Some(if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = count_digits(&bytes[exp..]);
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }

    s[..end].parse().ok()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

impl MaterialRecord {
    pub fn quantity(&self) -> Option<f64> {
        parse_decimal(self.quantity.as_ref())
    }

    pub fn reorder_level(&self) -> Option<f64> {
        parse_decimal(self.reorder_level.as_ref())
    }

    /// Classify the record; `None` when the quantity does not parse.
    pub fn stock_level(&self) -> Option<StockLevel> {
        let quantity = self.quantity()?;
        if quantity <= 0.0 {
            return Some(StockLevel::OutOfStock);
        }
        match self.reorder_level() {
            Some(reorder) if quantity <= reorder => Some(StockLevel::Low),
            _ => Some(StockLevel::InStock),
        }
    }
}
