//! Search filter inputs: a date range and an optional payer name.

use super::dates::CanonicalDate;
use chrono::FixedOffset;

/// Inclusive date range sent to the service as-is.
///
/// `from <= to` is not enforced; an inverted range is forwarded and the
/// service decides what it means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: CanonicalDate,
    pub to: CanonicalDate,
}

impl DateRange {
    #[must_use]
    pub const fn new(from: CanonicalDate, to: CanonicalDate) -> Self {
        Self { from, to }
    }

    /// A range covering only `day`.
    #[must_use]
    pub const fn single_day(day: CanonicalDate) -> Self {
        Self { from: day, to: day }
    }

    /// Today's date in `tz` for both ends. Initial range of every view.
    #[must_use]
    pub fn today(tz: FixedOffset) -> Self {
        Self::single_day(CanonicalDate::today(tz))
    }

    /// Human-readable form, e.g. `01-04-2025 al 30-04-2025`.
    #[must_use]
    pub fn to_display(&self) -> String {
        format!("{} al {}", self.from.to_display(), self.to.to_display())
    }
}

/// Filters for one logical search.
///
/// The payer name is trimmed on construction; a blank name means "no filter".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCriteria {
    pub range: DateRange,
    name: Option<String>,
}

impl SearchCriteria {
    /// # Examples
    ///
    /// ```
    /// use recibos::domain::{CanonicalDate, DateRange, SearchCriteria};
    ///
    /// let day = CanonicalDate::from_ymd(2025, 4, 23).unwrap();
    /// let blank = SearchCriteria::new(DateRange::single_day(day), Some("   "));
    /// assert_eq!(blank.name(), None);
    ///
    /// let acme = SearchCriteria::new(DateRange::single_day(day), Some("  Acme "));
    /// assert_eq!(acme.name(), Some("Acme"));
    /// ```
    #[must_use]
    pub fn new(range: DateRange, name: Option<&str>) -> Self {
        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(String::from);
        Self { range, name }
    }

    /// Criteria for the whole range with no payer filter.
    #[must_use]
    pub const fn unfiltered(range: DateRange) -> Self {
        Self { range, name: None }
    }

    /// Trimmed, non-empty payer name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Echo of the criteria for user-facing notices.
    #[must_use]
    pub fn describe(&self) -> String {
        match &self.name {
            Some(name) => format!("{} (contribuyente: \"{name}\")", self.range.to_display()),
            None => self.range.to_display(),
        }
    }
}
