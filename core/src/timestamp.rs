//! RFC 3339 timestamp codec with nanosecond precision.
//!
//! # Design
//! `Timestamp` is its own value type rather than a field attribute on
//! `Message`, so its encode/decode contract can be exercised in isolation.
//! On the wire it is always a JSON string. Decoding is strict: anything that
//! is not a full RFC 3339 date-time with an offset is rejected instead of
//! being coerced or truncated.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

/// A UTC point in time encoded as an RFC 3339 string with up to nanosecond
/// precision, e.g. `"2024-05-01T12:30:00.123456789Z"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

/// Most fraction digits a timestamp may carry.
const MAX_FRACTION_DIGITS: usize = 9;

/// Returned when a string is not a valid RFC 3339 date-time.
#[derive(Debug, Error)]
pub enum TimestampError {
    #[error("invalid RFC 3339 timestamp {input:?}: {reason}")]
    Layout { input: String, reason: &'static str },

    #[error("invalid RFC 3339 timestamp {input:?}: {source}")]
    Parse {
        input: String,
        #[source]
        source: chrono::ParseError,
    },
}

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now())
    }

    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    pub fn into_datetime(self) -> DateTime<Utc> {
        self.0
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Self(value)
    }
}

impl From<Timestamp> for DateTime<Utc> {
    fn from(value: Timestamp) -> Self {
        value.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

impl FromStr for Timestamp {
    type Err = TimestampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        check_layout(s).map_err(|reason| TimestampError::Layout {
            input: s.to_string(),
            reason,
        })?;
        DateTime::parse_from_rfc3339(s)
            .map(|parsed| Self(parsed.with_timezone(&Utc)))
            .map_err(|source| TimestampError::Parse {
                input: s.to_string(),
                source,
            })
    }
}

/// Enforce `YYYY-MM-DDTHH:MM:SS[.fffffffff](Z|+hh:mm|-hh:mm)`.
///
/// chrono also takes a space or lowercase `t`/`z` and drops fraction digits
/// past nanoseconds; those are rejected here. Field values are left to chrono.
fn check_layout(s: &str) -> Result<(), &'static str> {
    let bytes = s.as_bytes();
    if bytes.len() < 20 {
        return Err("too short for a date-time");
    }
    if bytes[10] != b'T' {
        return Err("date and time must be separated by 'T'");
    }

    let mut rest = &bytes[19..];
    if let Some(fraction) = rest.strip_prefix(b".") {
        let digits = fraction.iter().take_while(|b| b.is_ascii_digit()).count();
        if digits == 0 {
            return Err("empty fraction");
        }
        if digits > MAX_FRACTION_DIGITS {
            return Err("fraction finer than nanoseconds");
        }
        rest = &fraction[digits..];
    }

    match rest {
        b"Z" => Ok(()),
        [b'+' | b'-', h1, h2, b':', m1, m2]
            if [h1, h2, m1, m2].iter().all(|b| b.is_ascii_digit()) =>
        {
            Ok(())
        }
        _ => Err("offset must be 'Z' or '+hh:mm'/'-hh:mm'"),
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(TimestampVisitor)
    }
}

struct TimestampVisitor;

impl Visitor<'_> for TimestampVisitor {
    type Value = Timestamp;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an RFC 3339 date-time string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        v.parse().map_err(E::custom)
    }
}
