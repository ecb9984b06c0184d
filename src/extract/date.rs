//! Publication date parsing.
//!
//! Accepts the ISO-8601 shapes found in `<time datetime>` attributes: a
//! date-time with or without seconds (and with a `T` or a space as
//! separator), optionally followed by `Z`, `±HH:MM`, `±HHMM` or `±HH`, or a
//! bare calendar date. Whatever offset the string carries is dropped: the
//! wall-clock reading is taken as UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

const LOCAL_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parses `value` and pins the result to UTC without shifting the clock time.
///
/// `2024-03-01T10:00:00+02:00` becomes `2024-03-01T10:00:00Z`, not
/// `08:00:00Z`.
pub fn parse_datetime(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    let value = value.trim();

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(value) {
        return Ok(with_offset.naive_local().and_utc());
    }

    let local = strip_offset(value);
    for format in LOCAL_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(local, format) {
            return Ok(naive.and_utc());
        }
    }

    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")?;
    Ok(date.and_time(NaiveTime::MIN).and_utc())
}

/// Length of the `YYYY-MM-DD` prefix; an offset can only follow the time part.
const DATE_LEN: usize = 10;

/// Drops a trailing UTC designator or numeric offset from a date-time.
///
/// Anything that does not look like an offset is returned unchanged, so the
/// format parsers still see (and reject) malformed input.
fn strip_offset(value: &str) -> &str {
    let Some(time) = value.get(DATE_LEN + 1..) else {
        return value;
    };
    if let Some(rest) = value.strip_suffix(['Z', 'z']) {
        return rest;
    }
    let Some(sign) = time.find(['+', '-']) else {
        return value;
    };

    let offset = &time[sign + 1..];
    let digits: String = offset.chars().filter(|c| *c != ':').collect();
    let well_formed = match offset.len() {
        2 | 4 => offset.chars().all(|c| c.is_ascii_digit()),
        5 => offset.as_bytes()[2] == b':' && digits.chars().all(|c| c.is_ascii_digit()),
        _ => false,
    };

    if well_formed {
        &value[..DATE_LEN + 1 + sign]
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_utc_timestamp() {
        assert_eq!(
            parse_datetime("2024-03-01T10:15:30Z").unwrap(),
            utc(2024, 3, 1, 10, 15, 30)
        );
    }

    #[test]
    fn test_offset_is_discarded_not_applied() {
        assert_eq!(
            parse_datetime("2024-03-01T10:15:30+02:00").unwrap(),
            utc(2024, 3, 1, 10, 15, 30)
        );
        assert_eq!(
            parse_datetime("2024-03-01T23:00:00-05:00").unwrap(),
            utc(2024, 3, 1, 23, 0, 0)
        );
    }

    #[test]
    fn test_utc_designator_without_seconds() {
        assert_eq!(parse_datetime("2011-11-18T14:54Z").unwrap(), utc(2011, 11, 18, 14, 54, 0));
        assert_eq!(parse_datetime("2011-11-18T14:54z").unwrap(), utc(2011, 11, 18, 14, 54, 0));
    }

    #[test]
    fn test_offset_without_seconds_is_discarded() {
        assert_eq!(
            parse_datetime("2024-03-01T10:15+02:00").unwrap(),
            utc(2024, 3, 1, 10, 15, 0)
        );
        assert_eq!(
            parse_datetime("2024-03-01 10:15-07:00").unwrap(),
            utc(2024, 3, 1, 10, 15, 0)
        );
    }

    #[test]
    fn test_offset_without_colon_is_discarded() {
        assert_eq!(
            parse_datetime("2024-03-01T10:15:30+0200").unwrap(),
            utc(2024, 3, 1, 10, 15, 30)
        );
        assert_eq!(
            parse_datetime("2024-03-01T10:15-0530").unwrap(),
            utc(2024, 3, 1, 10, 15, 0)
        );
    }

    #[test]
    fn test_hour_only_offset_is_discarded() {
        assert_eq!(
            parse_datetime("2024-03-01T10:15:30+02").unwrap(),
            utc(2024, 3, 1, 10, 15, 30)
        );
    }

    #[test]
    fn test_fractional_seconds_with_offset() {
        let parsed = parse_datetime("2024-03-01T10:15:30.5+01:00").unwrap();
        assert_eq!(parsed.timestamp(), utc(2024, 3, 1, 10, 15, 30).timestamp());
        assert_eq!(parsed.timestamp_subsec_millis(), 500);
    }

    #[test]
    fn test_malformed_offset_is_error() {
        assert!(parse_datetime("2024-03-01T10:15+2").is_err());
        assert!(parse_datetime("2024-03-01T10:15+02:0x").is_err());
    }

    #[test]
    fn test_local_datetime_taken_as_utc() {
        assert_eq!(
            parse_datetime("2023-12-31T08:05:00").unwrap(),
            utc(2023, 12, 31, 8, 5, 0)
        );
        assert_eq!(
            parse_datetime("2023-12-31 08:05").unwrap(),
            utc(2023, 12, 31, 8, 5, 0)
        );
    }

    #[test]
    fn test_fractional_seconds() {
        let parsed = parse_datetime("2023-12-31T08:05:00.250").unwrap();
        assert_eq!(parsed.timestamp_subsec_millis(), 250);
    }

    #[test]
    fn test_bare_date_is_midnight() {
        assert_eq!(parse_datetime("2021-06-15").unwrap(), utc(2021, 6, 15, 0, 0, 0));
    }

    #[test]
    fn test_surrounding_whitespace_ignored() {
        assert_eq!(parse_datetime("  2021-06-15\n").unwrap(), utc(2021, 6, 15, 0, 0, 0));
    }

    #[test]
    fn test_malformed_is_error() {
        assert!(parse_datetime("yesterday").is_err());
        assert!(parse_datetime("2021-13-40").is_err());
        assert!(parse_datetime("").is_err());
    }
}
