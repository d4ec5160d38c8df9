//! Chat message timestamp identifiers.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A chat platform message timestamp such as `1709913600.000100`.
///
/// The platform uses this value as the message identifier, and a thread is
/// addressed by its root message's timestamp. Both halves must be non-empty
/// runs of ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MessageTs(String);

impl MessageTs {
    /// Parse and validate a message timestamp.
    pub fn parse(value: impl Into<String>) -> CoreResult<Self> {
        let value = value.into();
        let valid = match value.split_once('.') {
            Some((secs, frac)) => is_digits(secs) && is_digits(frac),
            None => false,
        };
        if valid {
            Ok(Self(value))
        } else {
            Err(CoreError::InvalidMessageTs { value })
        }
    }

    /// Return the timestamp as it is stored and sent to the chat platform.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

impl fmt::Display for MessageTs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for MessageTs {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for MessageTs {
    type Error = CoreError;

    fn try_from(value: String) -> CoreResult<Self> {
        Self::parse(value)
    }
}

impl From<MessageTs> for String {
    fn from(ts: MessageTs) -> Self {
        ts.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_ts() {
        let ts = MessageTs::parse("1709913600.000100").unwrap();
        assert_eq!(ts.as_str(), "1709913600.000100");
        assert_eq!(ts.to_string(), "1709913600.000100");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["", "1709913600", ".000100", "1709913600.", "17099a3600.0001", "1.2.3"] {
            assert!(
                matches!(MessageTs::parse(bad), Err(CoreError::InvalidMessageTs { .. })),
                "expected rejection for {bad:?}"
            );
        }
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: MessageTs = serde_json::from_str(r#""1.5""#).unwrap();
        assert_eq!(ok.as_str(), "1.5");
        assert!(serde_json::from_str::<MessageTs>(r#""nope""#).is_err());
    }
}
