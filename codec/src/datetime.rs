//! Datetime text conversion.
//!
//! Only fields whose options set `datetime` (and [chrono::DateTime] leaves, which always parse
//! through here) are routed to this module. Integers marked `datetime` hold Unix epoch
//! seconds.

use crate::{Config, Error};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, TimeZone, Utc};
use std::fmt::Write as _;

/// Parses datetime text, trying RFC 3339 first and then each configured layout.
pub fn decode_datetime(text: &str, cfg: &Config) -> Result<DateTime<Utc>, Error> {
    let text = text.trim();
    if let Ok(value) = DateTime::parse_from_rfc3339(text) {
        return Ok(value.with_timezone(&Utc));
    }
    for layout in &cfg.datetime_layouts {
        if let Ok(value) = NaiveDateTime::parse_from_str(text, layout) {
            return Ok(Utc.from_utc_datetime(&value));
        }
        if let Ok(date) = NaiveDate::parse_from_str(text, layout) {
            return Ok(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)));
        }
    }
    Err(Error::Datetime {
        text: text.to_string(),
        reason: "no matching layout".to_string(),
    })
}

/// Renders a datetime with the configured format.
pub fn encode_datetime(value: &DateTime<Utc>, cfg: &Config) -> Result<String, Error> {
    let mut out = String::new();
    write!(out, "{}", value.format(&cfg.datetime_format)).map_err(|_| Error::Datetime {
        text: value.to_rfc3339(),
        reason: format!("invalid format {:?}", cfg.datetime_format),
    })?;
    Ok(out)
}

/// Renders a datetime in its default text form (RFC 3339, UTC).
pub(crate) fn marshal(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Converts Unix epoch seconds into a datetime.
pub(crate) fn from_epoch(secs: i64) -> Result<DateTime<Utc>, Error> {
    DateTime::from_timestamp(secs, 0).ok_or_else(|| Error::Datetime {
        text: secs.to_string(),
        reason: "epoch seconds out of range".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_decode_layouts() {
        let cfg = Config::default();
        let expected = at(2024, 3, 9, 14, 30, 5);
        for text in [
            "2024-03-09T14:30:05Z",
            "2024-03-09T23:30:05+09:00",
            "2024-03-09 14:30:05",
            "2024/03/09 14:30:05",
        ] {
            assert_eq!(decode_datetime(text, &cfg).unwrap(), expected, "{text}");
        }
        assert_eq!(
            decode_datetime("2024-03-09", &cfg).unwrap(),
            at(2024, 3, 9, 0, 0, 0)
        );
        assert_eq!(
            decode_datetime("2024/03/09 14:30", &cfg).unwrap(),
            at(2024, 3, 9, 14, 30, 0)
        );
    }

    #[test]
    fn test_decode_invalid() {
        let cfg = Config::default();
        assert!(matches!(
            decode_datetime("yesterday", &cfg),
            Err(Error::Datetime { .. })
        ));
    }

    #[test]
    fn test_encode_round_trip() {
        let cfg = Config::default();
        let value = at(1999, 12, 31, 23, 59, 59);
        let text = encode_datetime(&value, &cfg).unwrap();
        assert_eq!(text, "1999-12-31 23:59:59");
        assert_eq!(decode_datetime(&text, &cfg).unwrap(), value);
    }

    #[test]
    fn test_custom_format() {
        let cfg = Config::default()
            .with_datetime_format("%d.%m.%Y")
            .with_datetime_layouts(["%d.%m.%Y"]);
        let value = at(2020, 2, 29, 0, 0, 0);
        let text = encode_datetime(&value, &cfg).unwrap();
        assert_eq!(text, "29.02.2020");
        assert_eq!(decode_datetime(&text, &cfg).unwrap(), value);
    }

    #[test]
    fn test_marshal_and_epoch() {
        let value = at(2001, 9, 9, 1, 46, 40);
        assert_eq!(marshal(&value), "2001-09-09T01:46:40Z");
        assert_eq!(from_epoch(1_000_000_000).unwrap(), value);
        assert!(from_epoch(i64::MAX).is_err());
    }
}
