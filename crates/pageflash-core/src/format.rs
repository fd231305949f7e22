//! Locale-aware number formatting.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Maximum fraction digits kept when formatting (trailing zeros are trimmed).
const MAX_FRACTION_DIGITS: usize = 3;

/// Locales with known grouping and decimal separators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberLocale {
    /// `id-ID`: `1.234.567,89`
    #[default]
    Indonesian,
    /// `en-US`: `1,234,567.89`
    English,
    /// `de-DE`: `1.234.567,89`
    German,
    /// `fr-FR`: `1 234 567,89` (narrow no-break space)
    French,
}

impl NumberLocale {
    /// All supported locale tags.
    pub const TAGS: &'static [&'static str] = &["id-ID", "en-US", "de-DE", "fr-FR"];

    pub fn tag(self) -> &'static str {
        match self {
            NumberLocale::Indonesian => "id-ID",
            NumberLocale::English => "en-US",
            NumberLocale::German => "de-DE",
            NumberLocale::French => "fr-FR",
        }
    }

    fn group_separator(self) -> char {
        match self {
            NumberLocale::Indonesian | NumberLocale::German => '.',
            NumberLocale::English => ',',
            NumberLocale::French => '\u{202F}',
        }
    }

    fn decimal_separator(self) -> char {
        match self {
            NumberLocale::English => '.',
            _ => ',',
        }
    }
}

impl FromStr for NumberLocale {
    type Err = Error;

    /// Parse a BCP 47 tag; matching is case-insensitive and accepts `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('_', "-").to_ascii_lowercase();
        match normalized.as_str() {
            "id-id" | "id" => Ok(NumberLocale::Indonesian),
            "en-us" | "en" => Ok(NumberLocale::English),
            "de-de" | "de" => Ok(NumberLocale::German),
            "fr-fr" | "fr" => Ok(NumberLocale::French),
            _ => Err(Error::UnsupportedLocale(s.to_string())),
        }
    }
}

impl fmt::Display for NumberLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Format a number with the locale's separators.
///
/// Keeps at most three fraction digits and drops trailing zeros.
///
/// # Examples
///
/// ```
/// use pageflash_core::format::{NumberLocale, format_number};
///
/// assert_eq!(format_number(1234567.5, NumberLocale::Indonesian), "1.234.567,5");
/// assert_eq!(format_number(1234567.5, NumberLocale::English), "1,234,567.5");
/// assert_eq!(format_number(-42.0, NumberLocale::Indonesian), "-42");
/// ```
pub fn format_number(value: f64, locale: NumberLocale) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }

    let sign = if value.is_sign_negative() && value != 0.0 {
        "-"
    } else {
        ""
    };

    if value.is_infinite() {
        return format!("{sign}∞");
    }

    let fixed = format!("{:.*}", MAX_FRACTION_DIGITS, value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
    out.push_str(sign);
    out.push_str(&group_digits(int_part, locale.group_separator()));
    if !frac_part.is_empty() {
        out.push(locale.decimal_separator());
        out.push_str(frac_part);
    }
    out
}

/// Insert `separator` between every group of three digits, from the right.
fn group_digits(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3 * separator.len_utf8());
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}
