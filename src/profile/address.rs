//! src/profile/address.rs
//!
//! Profile address: `0x` followed by 40 hex digits, normalized to lowercase.

use std::fmt;
use std::str::FromStr;

use super::ProfileError;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Address(String);

impl Address {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First six characters (`0x` plus four digits), used in fallback names.
    pub fn short(&self) -> &str {
        &self.0[..6]
    }
}

impl FromStr for Address {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .ok_or_else(|| ProfileError::InvalidAddress(s.to_string()))?;
        if digits.len() != 40 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ProfileError::InvalidAddress(s.to_string()));
        }
        Ok(Address(format!("0x{}", digits.to_ascii_lowercase())))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
