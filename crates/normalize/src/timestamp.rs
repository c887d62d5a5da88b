//! Conversion of loosely formatted date strings into comparable timestamps.
//!
//! Upstream dates come in whatever shape the contributor typed: full RFC 3339
//! instants, bare calendar dates, local date-times without an offset. They all
//! collapse into milliseconds since the Unix epoch (UTC), or `None` when the
//! string is blank or unparseable. Nothing in here ever fails.

use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::{Iso8601, Rfc3339};
use time::macros::format_description;
use time::{Date, Month, OffsetDateTime, PrimitiveDateTime};

const SPACED_SECONDS: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
const SPACED_MINUTES: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day] [hour]:[minute]");
const CALENDAR_DATE: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Milliseconds since the Unix epoch for a date string, `None` if blank or
/// unparseable.
///
/// Strings without an offset are read as UTC.
pub fn to_timestamp(text: Option<&str>) -> Option<i64> {
    let text = text.map(str::trim).filter(|t| !t.is_empty())?;
    let instant = parse(text)?;
    i64::try_from(instant.unix_timestamp_nanos().div_euclid(1_000_000)).ok()
}

/// Start of a repeating interval (`R/<start>/<period>`) as a timestamp.
///
/// The second `/`-separated segment is parsed with [`to_timestamp`]; anything
/// with fewer than two segments yields `None`.
pub fn extract_broadcast_begin(text: Option<&str>) -> Option<i64> {
    let mut segments = text?.split('/');
    let _repeat = segments.next()?;
    to_timestamp(segments.next())
}

/// Parse a date string into an instant, trying the accepted shapes from most
/// to least specific.
pub fn parse(text: &str) -> Option<OffsetDateTime> {
    OffsetDateTime::parse(text, &Rfc3339)
        .or_else(|_| OffsetDateTime::parse(text, &Iso8601::DEFAULT))
        .ok()
        .or_else(|| {
            PrimitiveDateTime::parse(text, &Iso8601::DEFAULT)
                .or_else(|_| PrimitiveDateTime::parse(text, SPACED_SECONDS))
                .or_else(|_| PrimitiveDateTime::parse(text, SPACED_MINUTES))
                .ok()
                .map(PrimitiveDateTime::assume_utc)
        })
        .or_else(|| Date::parse(text, CALENDAR_DATE).ok().or_else(|| reduced_precision(text)).map(|d| d.midnight().assume_utc()))
}

/// `YYYY-MM` or `YYYY`, pinned to the first day of the month or year.
fn reduced_precision(text: &str) -> Option<Date> {
    let (year, month) = text.split_once('-').unwrap_or((text, "1"));
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) || month.is_empty() || month.len() > 2 {
        return None;
    }
    let year = year.parse::<i32>().ok()?;
    let month = Month::try_from(month.parse::<u8>().ok()?).ok()?;
    Date::from_calendar_date(year, month, 1).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("   "))]
    #[case(Some("\t\n"))]
    #[case(Some("garbage"))]
    #[case(Some("2021-13-01"))]
    #[case(Some("2021-02-30"))]
    #[case(Some("202"))]
    #[case(Some("20211"))]
    #[case(Some("+202"))]
    #[case(Some("2021-"))]
    #[case(Some("R/2021-04-03T15:00:00+09:00/P7D"))]
    fn test_unknown(#[case] input: Option<&str>) {
        assert_eq!(to_timestamp(input), None);
    }

    #[rstest]
    #[case("2021-04-03T15:00:00+09:00", 1_617_429_600_000)]
    #[case("2021-04-03T06:00:00Z", 1_617_429_600_000)]
    #[case("2021-04-03T06:00:00.000Z", 1_617_429_600_000)]
    #[case("2021-04-03T06:00:00.250Z", 1_617_429_600_250)]
    #[case("  2021-04-03T06:00:00Z  ", 1_617_429_600_000)]
    #[case("2021-04-03T15:00+09:00", 1_617_429_600_000)]
    #[case("2021-04-03T06:00:00", 1_617_429_600_000)]
    #[case("2021-04-03 06:00:00", 1_617_429_600_000)]
    #[case("2021-04-03 06:00", 1_617_429_600_000)]
    #[case("2021-04-03", 1_617_408_000_000)]
    #[case("2021-04", 1_617_235_200_000)]
    #[case("2021", 1_609_459_200_000)]
    #[case("1970-01-01T00:00:00Z", 0)]
    #[case("1969-12-31T23:59:59.999Z", -1)]
    fn test_to_timestamp(#[case] input: &str, #[case] expected: i64) {
        assert_eq!(to_timestamp(Some(input)), Some(expected));
    }

    #[test]
    fn test_broadcast_begin_matches_start() {
        let start = "2021-04-03T15:00:00+09:00";
        let interval = format!("R/{start}/P7D");
        assert_eq!(extract_broadcast_begin(Some(&interval)), to_timestamp(Some(start)));
        assert!(extract_broadcast_begin(Some(&interval)).is_some());
    }

    #[rstest]
    #[case(None)]
    #[case(Some("garbage"))]
    #[case(Some(""))]
    #[case(Some("R/"))]
    #[case(Some("R//P7D"))]
    #[case(Some("R/not a date/P7D"))]
    fn test_broadcast_begin_unknown(#[case] input: Option<&str>) {
        assert_eq!(extract_broadcast_begin(input), None);
    }

    #[test]
    fn test_broadcast_begin_without_period() {
        assert_eq!(extract_broadcast_begin(Some("R/2021-04-03")), Some(1_617_408_000_000));
    }
}
