//! Shared rendering utilities.
//!
//! - **Payer highlighting**: fuzzy match ranges of the name filter inside a
//!   payer name, and rendering them with the theme's highlight colors
//! - **Money**: `$1,234.56` amounts with `num-format` thousands separators
//! - **Cells**: char-based truncation and padding for fixed-width columns
//!
//! All ranges and widths are in characters, not bytes.

use crate::ui::theme::Theme;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use num_format::{Locale, ToFormattedString};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Character ranges `(start, end)` of `text` matched by `query`.
///
/// Matching is case-insensitive. Consecutive matched characters are merged
/// into one range; no match yields an empty vector.
///
/// # Examples
///
/// ```
/// use recibos::ui::helpers::highlight_ranges;
///
/// assert_eq!(highlight_ranges("GARCIA LOPEZ", "lopez"), vec![(7, 12)]);
/// assert!(highlight_ranges("GARCIA", "xyz").is_empty());
/// ```
#[must_use]
pub fn highlight_ranges(text: &str, query: &str) -> Vec<(usize, usize)> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }

    let matcher = SkimMatcherV2::default().ignore_case();
    let Some((_score, indices)) = matcher.fuzzy_indices(text, query) else {
        return Vec::new();
    };

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}

/// Appends `text` to `out` with `ranges` styled as matches.
pub fn push_highlighted(out: &mut String, text: &str, ranges: &[(usize, usize)], theme: &Theme) {
    if ranges.is_empty() {
        out.push_str(text);
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < pos || start >= end {
            continue;
        }
        out.extend(&chars[pos..start]);
        out.push_str(&Theme::fg(&theme.colors.match_highlight_fg));
        out.push_str(&Theme::bg(&theme.colors.match_highlight_bg));
        out.extend(&chars[start..end]);
        out.push_str(Theme::reset());
        out.push_str(&Theme::fg(&theme.colors.text_normal));
        pos = end;
    }

    out.extend(&chars[pos..]);
}

/// Formats an amount as `$1,234.56`; negative amounts as `-$1,234.56`.
///
/// Rounds half away from zero to two decimals.
///
/// # Examples
///
/// ```
/// use recibos::ui::helpers::format_money;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_money(Decimal::new(123_456_789, 2)), "$1,234,567.89");
/// assert_eq!(format_money(Decimal::new(5, 3)), "$0.01");
/// assert_eq!(format_money(Decimal::ZERO), "$0.00");
/// ```
#[must_use]
pub fn format_money(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let abs = rounded.abs();
    let whole = abs.trunc();
    let cents = ((abs - whole) * Decimal::ONE_HUNDRED).to_u8().unwrap_or(0);
    let whole = whole.to_u128().unwrap_or(0).to_formatted_string(&Locale::en);
    format!("{sign}${whole}.{cents:02}")
}

/// Formats a count with thousands separators.
#[must_use]
pub fn format_count(count: usize) -> String {
    count.to_formatted_string(&Locale::en)
}

/// Truncates `text` to `width` characters, marking the cut with `…`.
#[must_use]
pub fn fit_cell(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(width - 1).collect();
    cut.push('…');
    cut
}

/// Spaces needed to pad `text` to `width` characters.
#[must_use]
pub fn padding(text: &str, width: usize) -> String {
    " ".repeat(width.saturating_sub(text.chars().count()))
}
