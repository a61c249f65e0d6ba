//! Date representations used by the client.
//!
//! A [`CanonicalDate`] is the single in-memory source of truth for every date
//! field. The two string forms are derived from it on demand and never stored:
//!
//! - **Display**: `DD-MM-YYYY`, shown to users
//! - **Wire**: `YYMMDD`, sent in every API query parameter and returned in
//!   record date fields
//!
//! Wire years are two digits and expand with a fixed pivot: `00..=49` map to
//! `2000..=2049`, `50..=99` to `1950..=1999`.

use super::error::{RecibosError, Result};
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Utc};
use std::fmt;

/// Two-digit wire years below this value belong to the 2000s.
const WIRE_YEAR_PIVOT: u32 = 50;

/// Two-digit display years below this value belong to the 2000s (`DDMMYY` input).
const SHORT_DISPLAY_YEAR_PIVOT: u32 = 69;

/// An unambiguous calendar date.
///
/// Always well-formed by construction, so formatting never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CanonicalDate(NaiveDate);

impl CanonicalDate {
    /// Builds a date from year, month and day.
    ///
    /// # Errors
    ///
    /// Returns [`RecibosError::MalformedDate`] if the triple is not a calendar date.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| RecibosError::MalformedDate(format!("{year:04}-{month:02}-{day:02}")))
    }

    /// The underlying `chrono` date.
    #[must_use]
    pub const fn naive(self) -> NaiveDate {
        self.0
    }

    /// Formats as `YYMMDD`, zero-padded.
    ///
    /// # Examples
    ///
    /// ```
    /// use recibos::domain::CanonicalDate;
    ///
    /// let date = CanonicalDate::from_ymd(2025, 4, 3).unwrap();
    /// assert_eq!(date.to_wire(), "250403");
    /// ```
    #[must_use]
    pub fn to_wire(self) -> String {
        format!(
            "{:02}{:02}{:02}",
            self.0.year().rem_euclid(100),
            self.0.month(),
            self.0.day()
        )
    }

    /// Formats as `DD-MM-YYYY`.
    #[must_use]
    pub fn to_display(self) -> String {
        self.0.format("%d-%m-%Y").to_string()
    }

    /// Parses a six-digit `YYMMDD` wire date.
    ///
    /// # Errors
    ///
    /// Returns [`RecibosError::MalformedDate`] if the input is not exactly six
    /// ASCII digits or does not name a calendar date.
    ///
    /// # Examples
    ///
    /// ```
    /// use recibos::domain::CanonicalDate;
    ///
    /// assert_eq!(CanonicalDate::parse_wire("500101").unwrap().to_display(), "01-01-1950");
    /// assert_eq!(CanonicalDate::parse_wire("491231").unwrap().to_display(), "31-12-2049");
    /// assert!(CanonicalDate::parse_wire("25043").is_err());
    /// ```
    pub fn parse_wire(s: &str) -> Result<Self> {
        let [yy, mm, dd] = split_digit_pairs(s)?;
        let year = if yy < WIRE_YEAR_PIVOT { 2000 + yy } else { 1900 + yy };
        Self::from_parts(year, mm, dd, s)
    }

    /// Parses user or date-picker input leniently.
    ///
    /// Accepted forms, tried in order:
    /// - ISO `YYYY-MM-DD`, optionally followed by a `T` or space and a time part
    /// - `DD-MM-YYYY` or `DD/MM/YYYY`
    /// - `DDMMYY` (years `00..=68` are 2000s, `69..=99` are 1900s)
    /// - `DDMMYYYY`
    ///
    /// # Errors
    ///
    /// Returns [`RecibosError::MalformedDate`] if no form matches.
    pub fn parse_display(s: &str) -> Result<Self> {
        let s = s.trim();

        if let Some(head) = s.get(..10) {
            let rest = &s[10..];
            if rest.is_empty() || rest.starts_with('T') || rest.starts_with(' ') {
                if let Ok(date) = NaiveDate::parse_from_str(head, "%Y-%m-%d") {
                    return Ok(Self(date));
                }
            }
        }

        for format in ["%d-%m-%Y", "%d/%m/%Y"] {
            if let Ok(date) = NaiveDate::parse_from_str(s, format) {
                return Ok(Self(date));
            }
        }

        if s.len() == 6 {
            let [dd, mm, yy] = split_digit_pairs(s)?;
            let year = if yy < SHORT_DISPLAY_YEAR_PIVOT { 2000 + yy } else { 1900 + yy };
            return Self::from_parts(year, mm, dd, s);
        }

        if s.len() == 8 && s.bytes().all(|b| b.is_ascii_digit()) {
            let [dd, mm, _] = split_digit_pairs(&s[..6])?;
            let year: u32 = s[4..]
                .parse()
                .map_err(|_| RecibosError::MalformedDate(s.to_string()))?;
            return Self::from_parts(year, mm, dd, s);
        }

        Err(RecibosError::MalformedDate(s.to_string()))
    }

    /// Current date in the given fixed offset, independent of the host's zone.
    #[must_use]
    pub fn today(tz: FixedOffset) -> Self {
        Self::today_at(Utc::now(), tz)
    }

    /// Date of `now` as observed in `tz`.
    #[must_use]
    pub fn today_at(now: DateTime<Utc>, tz: FixedOffset) -> Self {
        Self(now.with_timezone(&tz).date_naive())
    }

    fn from_parts(year: u32, month: u32, day: u32, raw: &str) -> Result<Self> {
        i32::try_from(year)
            .ok()
            .and_then(|y| NaiveDate::from_ymd_opt(y, month, day))
            .map(Self)
            .ok_or_else(|| RecibosError::MalformedDate(raw.to_string()))
    }
}

impl From<NaiveDate> for CanonicalDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for CanonicalDate {
    /// Canonical `YYYY-MM-DD`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Renders a wire date for display, falling back to the raw string.
///
/// Record dates from the server are shown this way so a single malformed row
/// never prevents the rest of a page from rendering.
#[must_use]
pub fn display_wire_or_raw(raw: &str) -> String {
    CanonicalDate::parse_wire(raw).map_or_else(
        |e| {
            tracing::debug!(raw = %raw, error = %e, "showing unparsable wire date as-is");
            raw.to_string()
        },
        CanonicalDate::to_display,
    )
}

/// Splits exactly six ASCII digits into three two-digit numbers.
fn split_digit_pairs(s: &str) -> Result<[u32; 3]> {
    if s.len() != 6 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RecibosError::MalformedDate(s.to_string()));
    }
    let pair = |i: usize| u32::from(s.as_bytes()[i] - b'0') * 10 + u32::from(s.as_bytes()[i + 1] - b'0');
    Ok([pair(0), pair(2), pair(4)])
}

/// Parses a `±HH:MM` offset string into a [`FixedOffset`].
///
/// # Errors
///
/// Returns [`RecibosError::Config`] for anything that is not a valid offset
/// within ±23:59.
pub fn parse_utc_offset(s: &str) -> Result<FixedOffset> {
    let invalid = || RecibosError::Config(format!("invalid UTC offset: {s:?}"));
    let s = s.trim();
    if s.eq_ignore_ascii_case("z") || s.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0).ok_or_else(invalid);
    }

    let (sign, rest) = match s.as_bytes().first() {
        Some(b'+') => (1, &s[1..]),
        Some(b'-') => (-1, &s[1..]),
        _ => return Err(invalid()),
    };
    let (hours, minutes) = rest.split_once(':').unwrap_or((rest, "0"));
    let hours: i32 = hours.parse().map_err(|_| invalid())?;
    let minutes: i32 = minutes.parse().map_err(|_| invalid())?;
    if !(0..24).contains(&hours) || !(0..60).contains(&minutes) {
        return Err(invalid());
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> CanonicalDate {
        CanonicalDate::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn wire_round_trip_across_pivot_window() {
        let mut day = date(1950, 1, 1).naive();
        let end = date(2049, 12, 31).naive();
        while day <= end {
            let canonical = CanonicalDate::from(day);
            assert_eq!(CanonicalDate::parse_wire(&canonical.to_wire()).unwrap(), canonical);
            day = day + chrono::Duration::days(37);
        }
        assert_eq!(CanonicalDate::parse_wire(&date(2049, 12, 31).to_wire()).unwrap(), date(2049, 12, 31));
    }

    #[test]
    fn wire_pivot_boundaries() {
        assert_eq!(CanonicalDate::parse_wire("500101").unwrap(), date(1950, 1, 1));
        assert_eq!(CanonicalDate::parse_wire("491231").unwrap(), date(2049, 12, 31));
        assert_eq!(CanonicalDate::parse_wire("000229").unwrap(), date(2000, 2, 29));
    }

    #[test]
    fn wire_rejects_malformed_input() {
        for raw in ["", "2504", "2504031", "25-4-3", "25o403", "251301", "250230", "２５０４０３"] {
            assert!(
                matches!(CanonicalDate::parse_wire(raw), Err(RecibosError::MalformedDate(_))),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn display_and_wire_formats() {
        let d = date(2025, 4, 23);
        assert_eq!(d.to_display(), "23-04-2025");
        assert_eq!(d.to_wire(), "250423");
        assert_eq!(d.to_string(), "2025-04-23");
    }

    #[test]
    fn unparsable_wire_dates_display_raw() {
        assert_eq!(display_wire_or_raw("250423"), "23-04-2025");
        assert_eq!(display_wire_or_raw("2025-04-23"), "2025-04-23");
        assert_eq!(display_wire_or_raw("999999"), "999999");
    }

    #[test]
    fn lenient_display_parsing() {
        assert_eq!(CanonicalDate::parse_display("2025-04-23").unwrap(), date(2025, 4, 23));
        assert_eq!(CanonicalDate::parse_display("2025-04-23T00:00:00.000").unwrap(), date(2025, 4, 23));
        assert_eq!(CanonicalDate::parse_display("23-04-2025").unwrap(), date(2025, 4, 23));
        assert_eq!(CanonicalDate::parse_display("01/04/2025").unwrap(), date(2025, 4, 1));
        assert!(CanonicalDate::parse_display("31/04/2025").is_err());
        assert_eq!(CanonicalDate::parse_display("230425").unwrap(), date(2025, 4, 23));
        assert_eq!(CanonicalDate::parse_display("230475").unwrap(), date(1975, 4, 23));
        assert_eq!(CanonicalDate::parse_display("23042025").unwrap(), date(2025, 4, 23));
        assert!(CanonicalDate::parse_display("ayer").is_err());
        assert!(CanonicalDate::parse_display("31-02-2025").is_err());
    }

    #[test]
    fn today_uses_configured_offset_not_host_zone() {
        let now = Utc.with_ymd_and_hms(2025, 4, 24, 3, 30, 0).unwrap();
        let merida = parse_utc_offset("-06:00").unwrap();
        let tokyo = parse_utc_offset("+09:00").unwrap();
        assert_eq!(CanonicalDate::today_at(now, merida), date(2025, 4, 23));
        assert_eq!(CanonicalDate::today_at(now, tokyo), date(2025, 4, 24));
    }

    #[test]
    fn utc_offset_parsing() {
        assert_eq!(parse_utc_offset("-06:00").unwrap().local_minus_utc(), -6 * 3600);
        assert_eq!(parse_utc_offset("+05:30").unwrap().local_minus_utc(), 5 * 3600 + 1800);
        assert_eq!(parse_utc_offset("+09").unwrap().local_minus_utc(), 9 * 3600);
        assert_eq!(parse_utc_offset("UTC").unwrap().local_minus_utc(), 0);
        assert!(parse_utc_offset("06:00").is_err());
        assert!(parse_utc_offset("+25:00").is_err());
        assert!(parse_utc_offset("-06:75").is_err());
    }
}
