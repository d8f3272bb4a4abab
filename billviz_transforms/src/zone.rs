// Copyright 2025 the Billviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time zone used to align hour buckets and render their labels.

use core::fmt;
use core::str::FromStr;

use chrono::{DateTime, FixedOffset, Local, TimeDelta, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned when parsing a [`BucketZone`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ZoneParseError {
    /// The string is neither `local`, `utc`, nor a `+HH:MM` / `-HH:MM` offset.
    #[error("unrecognized zone {0:?}: expected `local`, `utc` or an offset like `+05:30`")]
    Unrecognized(String),
    /// The offset is syntactically valid but outside +/-23:59.
    #[error("offset {0:?} is out of range")]
    OutOfRange(String),
}

/// Calendar used to truncate event timestamps to the hour.
///
/// Hour boundaries depend on the zone: a `+05:30` viewer sees buckets starting at `:30` UTC.
/// `Utc` is the default so that every viewer sees the same buckets; `Local` reproduces the
/// viewer-local bucketing of a browser dashboard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BucketZone {
    /// The host's local time zone, including its DST rules.
    Local,
    /// Coordinated Universal Time.
    #[default]
    Utc,
    /// A fixed UTC offset.
    Fixed(FixedOffset),
}

impl BucketZone {
    /// Returns the start of the hour containing `at`, as seen on this zone's wall clock.
    ///
    /// The offset in effect at `at` is used, so the result is defined for every instant, including
    /// those inside a DST fold or gap.
    pub fn hour_start(&self, at: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            Self::Local => truncate_to_hour(at, &Local),
            Self::Utc => truncate_to_hour(at, &Utc),
            Self::Fixed(offset) => truncate_to_hour(at, offset),
        }
    }

    /// Formats `at` on this zone's wall clock using a `chrono` format string.
    pub fn format(&self, at: DateTime<Utc>, fmt: &str) -> String {
        match self {
            Self::Local => at.with_timezone(&Local).format(fmt).to_string(),
            Self::Utc => at.format(fmt).to_string(),
            Self::Fixed(offset) => at.with_timezone(offset).format(fmt).to_string(),
        }
    }
}

fn truncate_to_hour<Tz: TimeZone>(at: DateTime<Utc>, tz: &Tz) -> DateTime<Utc> {
    let local = at.with_timezone(tz);
    let into_hour = TimeDelta::seconds(i64::from(local.minute()) * 60 + i64::from(local.second()))
        + TimeDelta::nanoseconds(i64::from(local.nanosecond()));
    at - into_hour
}

impl fmt::Display for BucketZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => f.write_str("local"),
            Self::Utc => f.write_str("utc"),
            Self::Fixed(offset) => write!(f, "{offset}"),
        }
    }
}

impl FromStr for BucketZone {
    type Err = ZoneParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("local") {
            return Ok(Self::Local);
        }
        if trimmed.eq_ignore_ascii_case("utc") || trimmed == "Z" {
            return Ok(Self::Utc);
        }
        parse_offset(trimmed).map(Self::Fixed)
    }
}

fn parse_offset(s: &str) -> Result<FixedOffset, ZoneParseError> {
    let unrecognized = || ZoneParseError::Unrecognized(s.to_owned());
    let (sign, rest) = match s.as_bytes().first() {
        Some(b'+') => (1, &s[1..]),
        Some(b'-') => (-1, &s[1..]),
        _ => return Err(unrecognized()),
    };
    let (hours, minutes) = rest.split_once(':').unwrap_or((rest, "0"));
    let hours: i32 = hours.parse().map_err(|_| unrecognized())?;
    let minutes: i32 = minutes.parse().map_err(|_| unrecognized())?;
    if !(0..24).contains(&hours) || !(0..60).contains(&minutes) {
        return Err(ZoneParseError::OutOfRange(s.to_owned()));
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
        .ok_or_else(|| ZoneParseError::OutOfRange(s.to_owned()))
}

impl TryFrom<String> for BucketZone {
    type Error = ZoneParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BucketZone> for String {
    fn from(zone: BucketZone) -> Self {
        zone.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn utc_truncation_drops_minutes_seconds_and_fraction() {
        let got = BucketZone::Utc.hour_start(utc("2024-01-01T10:59:59.999Z"));
        assert_eq!(got, utc("2024-01-01T10:00:00Z"));
    }

    #[test]
    fn half_hour_offset_shifts_bucket_boundaries() {
        let zone: BucketZone = "+05:30".parse().unwrap();
        // 10:15Z is 15:45 at +05:30, whose hour starts at 15:00 local = 09:30Z.
        let got = zone.hour_start(utc("2024-01-01T10:15:00Z"));
        assert_eq!(got, utc("2024-01-01T09:30:00Z"));
        assert_eq!(zone.format(got, "%H:%M"), "15:00");
    }

    #[test]
    fn parses_and_displays_zones() {
        assert_eq!("local".parse::<BucketZone>().unwrap(), BucketZone::Local);
        assert_eq!("UTC".parse::<BucketZone>().unwrap(), BucketZone::Utc);
        let west: BucketZone = "-08:00".parse().unwrap();
        assert_eq!(west.to_string(), "-08:00");
        assert_eq!("+3".parse::<BucketZone>().unwrap().to_string(), "+03:00");
    }

    #[test]
    fn rejects_bad_zones() {
        assert!(matches!(
            "mars".parse::<BucketZone>(),
            Err(ZoneParseError::Unrecognized(_))
        ));
        assert!(matches!(
            "+24:00".parse::<BucketZone>(),
            Err(ZoneParseError::OutOfRange(_))
        ));
        assert!(matches!(
            "+01:75".parse::<BucketZone>(),
            Err(ZoneParseError::OutOfRange(_))
        ));
    }

    #[test]
    fn huge_hour_offsets_are_out_of_range() {
        for s in ["+600000", "+1193047", "-2147483647:00", "+-5"] {
            assert!(
                matches!(s.parse::<BucketZone>(), Err(ZoneParseError::OutOfRange(_))),
                "{s} should be out of range"
            );
        }
    }
}
