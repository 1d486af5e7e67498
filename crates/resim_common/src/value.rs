//! Arbitrary-width unsigned integers for signal values.

use serde::de::{self, Deserialize, Deserializer};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Number of hex digits held by one `u64` limb.
const NIBBLES_PER_LIMB: usize = 16;

/// An arbitrary-width unsigned integer.
///
/// Stored as little-endian `u64` limbs with no high zero limbs, so two values
/// compare equal exactly when they denote the same number regardless of the
/// width they were written with (`0x0001 == 0x1`). Zero has no limbs.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Value {
    limbs: Vec<u64>,
}

/// Errors produced when parsing a hexadecimal [`Value`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseValueError {
    /// The text contained no hex digits.
    #[error("empty value")]
    Empty,
    /// A character that is neither a hex digit nor `_`.
    #[error("invalid hex digit '{0}'")]
    InvalidDigit(char),
}

impl Value {
    /// Returns the value zero.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Creates a value from a `u64`.
    pub fn from_u64(value: u64) -> Self {
        Self::from_limbs(vec![value])
    }

    /// Creates a value from little-endian limbs. High zero limbs are dropped.
    pub fn from_limbs(limbs: Vec<u64>) -> Self {
        let mut v = Self { limbs };
        v.normalize();
        v
    }

    /// Returns the little-endian limbs. Empty for zero.
    pub fn limbs(&self) -> &[u64] {
        &self.limbs
    }

    /// Returns true if this value is zero.
    pub fn is_zero(&self) -> bool {
        self.limbs.is_empty()
    }

    /// Converts to a `u64`, or `None` if the value does not fit.
    pub fn to_u64(&self) -> Option<u64> {
        match self.limbs.as_slice() {
            [] => Some(0),
            [v] => Some(*v),
            _ => None,
        }
    }

    /// Returns the number of significant bits (0 for zero).
    pub fn bit_len(&self) -> u32 {
        match self.limbs.last() {
            None => 0,
            Some(top) => (self.limbs.len() as u32 - 1) * 64 + (64 - top.leading_zeros()),
        }
    }

    /// Parses hexadecimal text such as `"0x1f"`, `"DEAD_BEEF"` or `"0"`.
    ///
    /// An optional `0x`/`0X` prefix and `_` separators are accepted.
    pub fn from_hex_str(s: &str) -> Result<Self, ParseValueError> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        let mut limbs: Vec<u64> = Vec::with_capacity(digits.len() / NIBBLES_PER_LIMB + 1);
        let mut count = 0usize;
        for c in digits.chars().rev() {
            if c == '_' {
                continue;
            }
            let nibble = c.to_digit(16).ok_or(ParseValueError::InvalidDigit(c))? as u64;
            let limb = count / NIBBLES_PER_LIMB;
            if limb == limbs.len() {
                limbs.push(0);
            }
            limbs[limb] |= nibble << ((count % NIBBLES_PER_LIMB) * 4);
            count += 1;
        }
        if count == 0 {
            return Err(ParseValueError::Empty);
        }
        Ok(Self::from_limbs(limbs))
    }

    fn normalize(&mut self) {
        while self.limbs.last() == Some(&0) {
            self.limbs.pop();
        }
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

impl FromStr for Value {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex_str(s)
    }
}

impl fmt::LowerHex for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut digits = String::with_capacity(self.limbs.len() * NIBBLES_PER_LIMB + 1);
        match self.limbs.split_last() {
            None => digits.push('0'),
            Some((top, rest)) => {
                digits.push_str(&format!("{top:x}"));
                for limb in rest.iter().rev() {
                    digits.push_str(&format!("{limb:016x}"));
                }
            }
        }
        f.pad_integral(true, "0x", &digits)
    }
}

/// Prints lowercase hex without a prefix.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(self, f)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Value({self:#x})")
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Value::from_hex_str(&text).map_err(de::Error::custom)
    }
}
