use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::core::errors::InvalidMessageVersion;

/// 3DS protocol message version, e.g. `2.2.0`.
///
/// Missing minor or patch components are read as zero, so `2.1` equals `2.1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MessageVersion {
    major: u16,
    minor: u16,
    patch: u16,
}

impl MessageVersion {
    pub const fn new(major: u16, minor: u16, patch: u16) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    pub fn major(&self) -> u16 {
        self.major
    }
}

impl FromStr for MessageVersion {
    type Err = InvalidMessageVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidMessageVersion(s.to_string());
        let mut components = s.split('.').map(|component| {
            if component.is_empty() || !component.bytes().all(|byte| byte.is_ascii_digit()) {
                return Err(invalid());
            }
            component.parse::<u16>().map_err(|_| invalid())
        });

        let major = components.next().ok_or_else(invalid)??;
        let minor = components.next().transpose()?.unwrap_or(0);
        let patch = components.next().transpose()?.unwrap_or(0);
        if components.next().is_some() {
            return Err(invalid());
        }

        Ok(Self::new(major, minor, patch))
    }
}

impl TryFrom<String> for MessageVersion {
    type Error = InvalidMessageVersion;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MessageVersion> for String {
    fn from(value: MessageVersion) -> Self {
        value.to_string()
    }
}

impl fmt::Display for MessageVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use test_case::test_case;

    use super::*;

    #[test_case("2.2.0", MessageVersion::new(2, 2, 0) ; "full version")]
    #[test_case("2.1", MessageVersion::new(2, 1, 0) ; "missing patch")]
    #[test_case("2", MessageVersion::new(2, 0, 0) ; "major only")]
    #[test_case("2.10.1", MessageVersion::new(2, 10, 1) ; "two digit minor")]
    fn test_parse_version(input: &str, expected: MessageVersion) {
        assert_eq!(input.parse::<MessageVersion>().unwrap(), expected);
    }

    #[test_case("" ; "empty")]
    #[test_case("2..0" ; "empty component")]
    #[test_case("2.2.0.1" ; "too many components")]
    #[test_case("v2.2" ; "prefixed")]
    #[test_case("2.-1" ; "negative")]
    fn test_reject_version(input: &str) {
        assert!(input.parse::<MessageVersion>().is_err());
    }

    #[test]
    fn test_versions_are_ordered_numerically() {
        let v2_1: MessageVersion = "2.1.0".parse().unwrap();
        let v2_10: MessageVersion = "2.10.0".parse().unwrap();
        assert!(v2_1 < MessageVersion::new(2, 2, 0));
        assert!(v2_10 > MessageVersion::new(2, 2, 0));
    }

    #[test]
    fn test_serde_uses_dotted_string() {
        let version: MessageVersion = serde_json::from_str("\"2.2\"").unwrap();
        assert_eq!(serde_json::to_string(&version).unwrap(), "\"2.2.0\"");
    }
}
