use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Customer key as written in the reference files
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(String);

impl CustomerId {
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into().trim().to_string())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CustomerId {
    fn from(s: &str) -> Self {
        CustomerId::new(s)
    }
}

impl From<String> for CustomerId {
    fn from(s: String) -> Self {
        CustomerId::new(s)
    }
}

/// Vendor key as written in the reference files
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VendorId(String);

impl VendorId {
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into().trim().to_string())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VendorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VendorId {
    fn from(s: &str) -> Self {
        VendorId::new(s)
    }
}

impl From<String> for VendorId {
    fn from(s: String) -> Self {
        VendorId::new(s)
    }
}

/// Per-customer location number.
///
/// Upstream files store these ambiguously ("3", "3.0", " 3 "). Every textual
/// form of the same integer parses to the same value; fractional values are
/// rejected rather than truncated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationNumber(i64);

impl LocationNumber {
    #[inline]
    #[must_use]
    pub const fn new(n: i64) -> Self {
        Self(n)
    }

    #[inline]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Normalize a raw cell into an integer location number.
    pub fn normalize(raw: &str) -> Result<Self, ParseLocationNumberError> {
        raw.parse()
    }
}

impl fmt::Display for LocationNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for LocationNumber {
    fn from(n: i64) -> Self {
        LocationNumber(n)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseLocationNumberError {
    #[error("location number is empty")]
    Empty,

    #[error("location number '{0}' is not numeric")]
    NotNumeric(String),

    #[error("location number '{0}' is not an integer")]
    Fractional(String),
}

impl FromStr for LocationNumber {
    type Err = ParseLocationNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseLocationNumberError::Empty);
        }

        if let Ok(n) = trimmed.parse::<i64>() {
            return Ok(LocationNumber(n));
        }

        let value: f64 = trimmed
            .parse()
            .map_err(|_| ParseLocationNumberError::NotNumeric(trimmed.to_string()))?;

        // 2^63 is exactly representable, anything at or beyond it overflows i64
        const LIMIT: f64 = 9_223_372_036_854_775_808.0;
        if !value.is_finite() || value.fract() != 0.0 || value.abs() >= LIMIT {
            return Err(ParseLocationNumberError::Fractional(trimmed.to_string()));
        }

        Ok(LocationNumber(value as i64))
    }
}
