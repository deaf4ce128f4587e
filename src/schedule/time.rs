use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::InvalidTimeFormat;

/// One break time of day, minute resolution.
///
/// Ordered by `(hour, minute)`. The canonical text form is zero-padded
/// `HH:MM`, which is also the serialized form, so a JSON array of break
/// times is byte-for-byte the payload devices exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BreakTime {
    hour: u8,
    minute: u8,
}

impl BreakTime {
    /// Create a break time, validating both components.
    pub fn new(hour: u8, minute: u8) -> Result<Self, InvalidTimeFormat> {
        if hour > 23 {
            return Err(InvalidTimeFormat::HourOutOfRange { hour });
        }
        if minute > 59 {
            return Err(InvalidTimeFormat::MinuteOutOfRange { minute });
        }
        Ok(Self { hour, minute })
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }
}

impl fmt::Display for BreakTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for BreakTime {
    type Err = InvalidTimeFormat;

    /// Strict canonical parse: exactly five characters, zero-padded,
    /// `':'` separator. `"7:05"` and `"07:5"` are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        let digits_ok = bytes.len() == 5
            && bytes[2] == b':'
            && bytes[0].is_ascii_digit()
            && bytes[1].is_ascii_digit()
            && bytes[3].is_ascii_digit()
            && bytes[4].is_ascii_digit();
        if !digits_ok {
            return Err(InvalidTimeFormat::Malformed {
                input: s.to_string(),
            });
        }
        let hour = (bytes[0] - b'0') * 10 + (bytes[1] - b'0');
        let minute = (bytes[3] - b'0') * 10 + (bytes[4] - b'0');
        Self::new(hour, minute)
    }
}

impl Serialize for BreakTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for BreakTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
