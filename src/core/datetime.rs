//! Flexible date/time parsing and formatting.
//!
//! Parsing tries numeric epoch detection first, then the caller's layout,
//! then a fixed ordered list of common layouts. Formatting renders an
//! instant as RFC3339, epoch seconds/milliseconds, or a strftime pattern.

use chrono::format::{Item, StrftimeItems};
use chrono::{
    DateTime, Duration, FixedOffset, Local, LocalResult, NaiveDate, NaiveDateTime, SecondsFormat,
    TimeZone, Utc,
};

use crate::core::error::{Error, Result};

/// Zone applied to parsed values that carry no offset of their own.
#[derive(Debug, Clone, Copy)]
enum ZoneContext {
    Utc,
    Local,
}

impl ZoneContext {
    fn resolve(self, naive: NaiveDateTime) -> Option<DateTime<FixedOffset>> {
        match self {
            ZoneContext::Utc => Some(Utc.from_utc_datetime(&naive).fixed_offset()),
            ZoneContext::Local => match Local.from_local_datetime(&naive) {
                LocalResult::Single(t) => Some(t.fixed_offset()),
                // DST fold: take the earlier of the two readings.
                LocalResult::Ambiguous(earlier, _) => Some(earlier.fixed_offset()),
                LocalResult::None => None,
            },
        }
    }
}

/// One candidate layout. Ordering in `COMMON_LAYOUTS` matters: layouts with
/// explicit offsets or more components come before looser ones, so a string
/// carrying time or zone information never matches a shorter prefix.
#[derive(Debug, Clone, Copy)]
enum Layout {
    /// RFC3339, with or without fractional seconds.
    Rfc3339,
    /// RFC2822 with a numeric offset or obsolete zone name.
    Rfc2822,
    /// Offset-aware strftime pattern (contains `%z`).
    Offset(&'static str),
    /// Naive pattern plus a named zone token somewhere in the input.
    NamedZone(&'static str),
    /// Naive datetime resolved in the zone context.
    Naive(&'static str),
    /// Bare date, midnight in the zone context.
    DateOnly(&'static str),
}

const COMMON_LAYOUTS: &[Layout] = &[
    Layout::Rfc3339,
    Layout::Rfc2822,
    Layout::NamedZone("%a, %d %b %Y %H:%M:%S"), // RFC1123 with named zone
    Layout::Offset("%d %b %y %H:%M %z"),        // RFC822 with numeric offset
    Layout::NamedZone("%d %b %y %H:%M"),        // RFC822 with named zone
    Layout::Naive("%a %b %e %H:%M:%S %Y"),      // asctime
    Layout::NamedZone("%a %b %e %H:%M:%S %Y"),  // unix date(1)
    Layout::Offset("%a %b %d %H:%M:%S %z %Y"),  // ruby Time#to_s
    Layout::NamedZone("%Y-%m-%d %H:%M:%S"),
    Layout::Offset("%Y-%m-%d %H:%M:%S %z"),
    Layout::Naive("%Y-%m-%d %H:%M:%S"),
    Layout::NamedZone("%Y-%m-%d %H:%M"),
    Layout::Naive("%Y-%m-%d %H:%M"),
    Layout::DateOnly("%Y-%m-%d"),
];

impl Layout {
    fn parse(self, s: &str, ctx: ZoneContext) -> Option<DateTime<FixedOffset>> {
        match self {
            Layout::Rfc3339 => DateTime::parse_from_rfc3339(s).ok(),
            Layout::Rfc2822 => DateTime::parse_from_rfc2822(s).ok(),
            Layout::Offset(fmt) => DateTime::parse_from_str(s, fmt).ok(),
            Layout::NamedZone(fmt) => parse_named_zone(s, fmt),
            Layout::Naive(fmt) => NaiveDateTime::parse_from_str(s, fmt)
                .ok()
                .and_then(|naive| ctx.resolve(naive)),
            Layout::DateOnly(fmt) => NaiveDate::parse_from_str(s, fmt)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .and_then(|naive| ctx.resolve(naive)),
        }
    }
}

/// Parse a layout that carries a named zone abbreviation (`MST`, `UTC`).
///
/// The single all-uppercase token is removed before naive parsing. `UTC` and
/// friends are a true zero offset; any other abbreviation is recorded as a
/// fabricated zero-offset zone, the way asctime-style parsers treat unknown
/// abbreviations.
fn parse_named_zone(s: &str, fmt: &str) -> Option<DateTime<FixedOffset>> {
    let mut zone: Option<&str> = None;
    let mut rest: Vec<&str> = Vec::new();
    for token in s.split_whitespace() {
        if zone.is_none()
            && (1..=5).contains(&token.len())
            && token.bytes().all(|b| b.is_ascii_uppercase())
        {
            zone = Some(token);
        } else {
            rest.push(token);
        }
    }
    zone?;
    let naive = NaiveDateTime::parse_from_str(&rest.join(" "), fmt).ok()?;
    Some(Utc.from_utc_datetime(&naive).fixed_offset())
}

/// Interpret a decimal epoch string: more than 10 digits means milliseconds,
/// otherwise whole seconds. The instant carries the local zone, matching the
/// behavior of epoch values everywhere else in the toolbox.
pub fn epoch_instant(s: &str) -> Result<DateTime<FixedOffset>> {
    let value: i64 = s.parse().map_err(|_| Error::InvalidEpoch(s.to_string()))?;
    let (secs, nanos) = if s.len() > 10 {
        (value.div_euclid(1000), (value.rem_euclid(1000) * 1_000_000) as u32)
    } else {
        (value, 0)
    };
    match Local.timestamp_opt(secs, nanos) {
        LocalResult::Single(t) => Ok(t.fixed_offset()),
        _ => Err(Error::InvalidEpoch(s.to_string())),
    }
}

/// Parse a time string by trying numeric epoch detection, the caller's
/// layout, then `COMMON_LAYOUTS` in order. Numeric strings never fall
/// through to layout parsing.
pub fn parse_flexible(
    input: &str,
    layout: Option<&str>,
    utc: bool,
) -> Result<DateTime<FixedOffset>> {
    let s = input.trim();
    if s.is_empty() {
        return Err(Error::EmptyInput);
    }

    if s.bytes().all(|b| b.is_ascii_digit()) {
        return epoch_instant(s);
    }

    let ctx = if utc { ZoneContext::Utc } else { ZoneContext::Local };

    if let Some(fmt) = layout.filter(|fmt| !fmt.is_empty()) {
        if let Some(t) = parse_with_layout(s, fmt, ctx) {
            return Ok(t);
        }
    }

    for candidate in COMMON_LAYOUTS {
        if let Some(t) = candidate.parse(s, ctx) {
            return Ok(t);
        }
    }

    Err(Error::TimeParse(s.to_string()))
}

/// Try an explicit layout as offset-aware, then naive datetime, then bare
/// date at midnight.
fn parse_with_layout(s: &str, fmt: &str, ctx: ZoneContext) -> Option<DateTime<FixedOffset>> {
    if let Ok(t) = DateTime::parse_from_str(s, fmt) {
        return Some(t);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
        return ctx.resolve(naive);
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
        return ctx.resolve(date.and_hms_opt(0, 0, 0)?);
    }
    None
}

/// Render `t` per the selected output format.
///
/// Selectors are case-insensitive; an unrecognized selector is treated as a
/// literal strftime pattern, so `--format %Y-%m-%d` works without
/// `--format layout --layout %Y-%m-%d`.
pub fn format_time(
    t: DateTime<FixedOffset>,
    format: &str,
    layout: Option<&str>,
    utc: bool,
) -> Result<String> {
    let t = if utc {
        t.with_timezone(&Utc).fixed_offset()
    } else {
        t
    };
    match format.to_ascii_lowercase().as_str() {
        "" | "rfc3339" => Ok(t.to_rfc3339_opts(SecondsFormat::Secs, true)),
        "unix" => Ok(t.timestamp().to_string()),
        "unixms" => Ok(t.timestamp_millis().to_string()),
        "layout" => match layout.filter(|fmt| !fmt.is_empty()) {
            Some(fmt) => format_with_layout(&t, fmt),
            None => Ok(t.to_rfc3339_opts(SecondsFormat::Secs, true)),
        },
        _ => format_with_layout(&t, format),
    }
}

fn format_with_layout(t: &DateTime<FixedOffset>, fmt: &str) -> Result<String> {
    // A malformed specifier would make the Display impl fail mid-write.
    if StrftimeItems::new(fmt).any(|item| matches!(item, Item::Error)) {
        return Err(Error::InvalidLayout(fmt.to_string()));
    }
    Ok(t.format(fmt).to_string())
}

/// Parse a Go-style duration: optional sign, then `<number><unit>` groups
/// (`90m`, `1h30m`, `1500ms`, `-1.5h`). Units: ns, us, ms, s, m, h.
/// A bare `0` is allowed.
pub fn parse_duration(input: &str) -> Result<Duration> {
    let s = input.trim();
    let invalid = || Error::InvalidDuration(input.trim().to_string());

    let (negative, mut rest) = match s.as_bytes().first().copied() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    if rest == "0" {
        return Ok(Duration::zero());
    }
    if rest.is_empty() {
        return Err(invalid());
    }

    let mut total_nanos: i128 = 0;
    while !rest.is_empty() {
        let number_end = rest
            .find(|c: char| !c.is_ascii_digit() && c != '.')
            .unwrap_or(rest.len());
        if number_end == 0 {
            return Err(invalid());
        }
        let value: f64 = rest[..number_end].parse().map_err(|_| invalid())?;
        rest = &rest[number_end..];

        let unit_end = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        let scale: i64 = match &rest[..unit_end] {
            "ns" => 1,
            "us" | "\u{b5}s" => 1_000,
            "ms" => 1_000_000,
            "s" => 1_000_000_000,
            "m" => 60_000_000_000,
            "h" => 3_600_000_000_000,
            _ => return Err(invalid()),
        };
        rest = &rest[unit_end..];

        total_nanos += (value * scale as f64) as i128;
    }

    if negative {
        total_nanos = -total_nanos;
    }
    let total: i64 = total_nanos.try_into().map_err(|_| invalid())?;
    Ok(Duration::nanoseconds(total))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc_instant(s: &str) -> DateTime<FixedOffset> {
        parse_flexible(s, None, true).unwrap()
    }

    #[test]
    fn parses_rfc3339_zulu() {
        let t = utc_instant("1970-01-01T00:00:00Z");
        assert_eq!(t.timestamp(), 0);
    }

    #[test]
    fn parses_rfc3339_with_subseconds() {
        let t = utc_instant("2023-10-11T15:00:00.250Z");
        assert_eq!(t.timestamp_millis(), 1_697_036_400_250);
    }

    #[test]
    fn parses_rfc2822() {
        let t = utc_instant("Mon, 02 Jan 2006 15:04:05 +0000");
        assert_eq!(t.timestamp(), 1_136_214_245);
    }

    #[test]
    fn parses_rfc1123_named_zone() {
        let t = utc_instant("Mon, 02 Jan 2006 15:04:05 UTC");
        assert_eq!(t.timestamp(), 1_136_214_245);
    }

    #[test]
    fn parses_unix_date_style() {
        let t = utc_instant("Mon Jan  2 15:04:05 UTC 2006");
        assert_eq!(t.timestamp(), 1_136_214_245);
    }

    #[test]
    fn parses_ruby_date_style() {
        let t = utc_instant("Mon Jan 02 15:04:05 -0700 2006");
        assert_eq!(t.timestamp(), 1_136_214_245 + 7 * 3600);
    }

    #[test]
    fn parses_naive_datetime_as_utc() {
        let t = utc_instant("2006-01-02 15:04:05");
        assert_eq!(t.timestamp(), 1_136_214_245);
    }

    #[test]
    fn parses_datetime_with_offset() {
        let t = utc_instant("2006-01-02 15:04:05 +0200");
        assert_eq!(t.timestamp(), 1_136_214_245 - 2 * 3600);
    }

    #[test]
    fn parses_minutes_precision() {
        let t = utc_instant("2006-01-02 15:04");
        assert_eq!(t.timestamp(), 1_136_214_240);
    }

    #[test]
    fn parses_bare_date_at_midnight() {
        let t = utc_instant("2006-01-02");
        assert_eq!(t.timestamp(), 1_136_160_000);
    }

    #[test]
    fn datetime_beats_bare_date() {
        // A string with a time component must not match the date-only layout.
        let with_time = utc_instant("2006-01-02 15:04:05");
        let date_only = utc_instant("2006-01-02");
        assert_ne!(with_time.timestamp(), date_only.timestamp());
    }

    #[test]
    fn epoch_seconds_detection() {
        let t = parse_flexible("1", None, true).unwrap();
        assert_eq!(t.timestamp(), 1);
    }

    #[test]
    fn epoch_milliseconds_detection() {
        let t = parse_flexible("1690000000123", None, true).unwrap();
        assert_eq!(t.timestamp_millis(), 1_690_000_000_123);
    }

    #[test]
    fn numeric_never_falls_through_to_layouts() {
        // Ten digits of year-like text still parse as an epoch.
        let t = parse_flexible("2006010215", None, true).unwrap();
        assert_eq!(t.timestamp(), 2_006_010_215);
    }

    #[test]
    fn epoch_overflow_is_an_error() {
        assert!(matches!(
            parse_flexible("99999999999999999999", None, true),
            Err(Error::InvalidEpoch(_))
        ));
    }

    #[test]
    fn explicit_layout_wins() {
        let t = parse_flexible("17/09/2025 12:34", Some("%d/%m/%Y %H:%M"), true).unwrap();
        assert_eq!(
            format_time(t, "layout", Some("%Y-%m-%d %H:%M"), true).unwrap(),
            "2025-09-17 12:34"
        );
    }

    #[test]
    fn explicit_layout_date_only() {
        let t = parse_flexible("2025.09.17", Some("%Y.%m.%d"), true).unwrap();
        assert_eq!(format_time(t, "rfc3339", None, true).unwrap(), "2025-09-17T00:00:00Z");
    }

    #[test]
    fn unparseable_time_errors() {
        assert!(matches!(
            parse_flexible("not a time", None, true),
            Err(Error::TimeParse(_))
        ));
    }

    #[test]
    fn empty_input_errors() {
        assert!(matches!(parse_flexible("  ", None, true), Err(Error::EmptyInput)));
    }

    #[test]
    fn layout_round_trip() {
        let s = "2025-09-17 12:34:56";
        let t = parse_flexible(s, None, true).unwrap();
        assert_eq!(
            format_time(t, "layout", Some("%Y-%m-%d %H:%M:%S"), true).unwrap(),
            s
        );
    }

    #[test]
    fn epoch_round_trip_seconds() {
        let t = utc_instant("2006-01-02 15:04:05");
        let unix = format_time(t, "unix", None, true).unwrap();
        let back = parse_flexible(&unix, None, true).unwrap();
        assert_eq!(back.timestamp(), t.timestamp());
    }

    #[test]
    fn epoch_round_trip_milliseconds() {
        let t = utc_instant("2023-10-11T15:00:00.250Z");
        let unixms = format_time(t, "unixms", None, true).unwrap();
        let back = parse_flexible(&unixms, None, true).unwrap();
        assert_eq!(back.timestamp_millis(), t.timestamp_millis());
    }

    #[test]
    fn format_variants() {
        let t = parse_flexible("42", None, true).unwrap();
        assert_eq!(format_time(t, "unix", None, true).unwrap(), "42");
        assert_eq!(format_time(t, "unixms", None, true).unwrap(), "42000");
        assert_eq!(
            format_time(t, "rfc3339", None, true).unwrap(),
            "1970-01-01T00:00:42Z"
        );
        assert_eq!(
            format_time(t, "RFC3339", None, true).unwrap(),
            "1970-01-01T00:00:42Z"
        );
    }

    #[test]
    fn unknown_selector_is_a_literal_pattern() {
        let t = utc_instant("2006-01-02 15:04:05");
        assert_eq!(format_time(t, "%Y/%m/%d", None, true).unwrap(), "2006/01/02");
    }

    #[test]
    fn layout_selector_without_layout_falls_back_to_rfc3339() {
        let t = parse_flexible("0", None, true).unwrap();
        assert_eq!(
            format_time(t, "layout", None, true).unwrap(),
            "1970-01-01T00:00:00Z"
        );
    }

    #[test]
    fn malformed_pattern_errors() {
        let t = parse_flexible("0", None, true).unwrap();
        assert!(matches!(
            format_time(t, "%Q-bogus", None, true),
            Err(Error::InvalidLayout(_))
        ));
    }

    #[test]
    fn duration_basic_units() {
        assert_eq!(parse_duration("90m").unwrap(), Duration::minutes(90));
        assert_eq!(parse_duration("1500ms").unwrap(), Duration::milliseconds(1500));
        assert_eq!(parse_duration("48h").unwrap(), Duration::hours(48));
    }

    #[test]
    fn duration_chained_groups() {
        assert_eq!(parse_duration("1h30m").unwrap(), Duration::minutes(90));
        assert_eq!(parse_duration("2m30s").unwrap(), Duration::seconds(150));
    }

    #[test]
    fn duration_fractional() {
        assert_eq!(parse_duration("1.5h").unwrap(), Duration::minutes(90));
    }

    #[test]
    fn duration_negative() {
        assert_eq!(parse_duration("-2h").unwrap(), Duration::hours(-2));
    }

    #[test]
    fn duration_bare_zero() {
        assert_eq!(parse_duration("0").unwrap(), Duration::zero());
    }

    #[test]
    fn duration_missing_unit_errors() {
        assert!(parse_duration("100").is_err());
        assert!(parse_duration("").is_err());
        assert!(parse_duration("h").is_err());
        assert!(parse_duration("1d").is_err());
    }
}
