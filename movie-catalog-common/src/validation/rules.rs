use chrono::NaiveDate;
use lazy_regex::{Lazy, Regex};
use url::Url;

use super::{FieldValue, ValidationContext};

/// Date format produced by `<input type="date">`
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Predicate signature for rules that do not fit any other variant
pub type Predicate = fn(&FieldValue, &ValidationContext) -> bool;

/// Single validation rule attached to a field. Every variant carries the message reported when
/// the rule fails. Text rules look at the value with surrounding whitespace removed, which is the
/// value the request builders send.
#[derive(Debug, Clone)]
pub enum Rule {
    /// Value must not be blank. Text is trimmed, lists must have at least one item.
    Required {
        /// Reported when the rule fails
        message: &'static str,
    },
    /// Text must have at least `min` characters
    MinLength {
        /// Minimum number of characters
        min: usize,
        /// Reported when the rule fails
        message: &'static str,
    },
    /// Text must be one of the listed options exactly
    OneOf {
        /// Accepted values
        options: &'static [&'static str],
        /// Reported when the rule fails
        message: &'static str,
    },
    /// Text must match the regular expression anywhere unless the pattern is anchored
    Pattern {
        /// Pattern the text must match
        regex: &'static Lazy<Regex>,
        /// Reported when the rule fails
        message: &'static str,
    },
    /// Text must parse as an absolute http(s) or ftp URL with a host
    Url {
        /// Reported when the rule fails
        message: &'static str,
    },
    /// Text must parse as a finite number
    Number {
        /// Reported when the rule fails
        message: &'static str,
    },
    /// Number must not have a fractional part
    Integer {
        /// Reported when the rule fails
        message: &'static str,
    },
    /// Number must be greater than zero
    Positive {
        /// Reported when the rule fails
        message: &'static str,
    },
    /// Canonical decimal form of the number must have exactly `digits` characters. Leading zeros
    /// typed by the user are not part of the canonical form.
    DigitCount {
        /// Required number of characters
        digits: usize,
        /// Reported when the rule fails
        message: &'static str,
    },
    /// Number must lie within `min..=max`
    Range {
        /// Inclusive lower bound
        min: i64,
        /// Inclusive upper bound
        max: i64,
        /// Reported when the rule fails
        message: &'static str,
    },
    /// Text must be a `YYYY-MM-DD` calendar date
    Date {
        /// Reported when the rule fails
        message: &'static str,
    },
    /// Date must be strictly before the context's current day
    DateBeforeToday {
        /// Reported when the rule fails
        message: &'static str,
    },
    /// Value must satisfy `predicate`
    Custom {
        /// Returns true for valid values
        predicate: Predicate,
        /// Reported when the rule fails
        message: &'static str,
    },
}

impl Rule {
    /// Evaluate the rule against a non blank `value`
    /// # Errors
    /// Returns the rule's message if `value` does not satisfy the rule
    pub fn check(&self, value: &FieldValue, context: &ValidationContext) -> Result<(), &'static str> {
        let passed = match self {
            Self::Required { .. } => !value.is_blank(),
            Self::MinLength { min, .. } => text(value).map_or(false, |t| t.chars().count() >= *min),
            Self::OneOf { options, .. } => text(value).map_or(false, |t| options.iter().any(|o| *o == t)),
            Self::Pattern { regex, .. } => text(value).map_or(false, |t| regex.is_match(t)),
            Self::Url { .. } => text(value).map_or(false, is_url),
            Self::Number { .. } => number(value).is_some(),
            Self::Integer { .. } => number(value).map_or(false, |n| n.fract() == 0.0),
            Self::Positive { .. } => number(value).map_or(false, |n| n > 0.0),
            Self::DigitCount { digits, .. } => {
                number(value).map_or(false, |n| canonical_number(n).len() == *digits)
            }
            Self::Range { min, max, .. } => number(value).map_or(false, |n| {
                n.fract() == 0.0 && (*min as f64..=*max as f64).contains(&n)
            }),
            Self::Date { .. } => date(value).is_some(),
            Self::DateBeforeToday { .. } => date(value).map_or(false, |d| d < context.today),
            Self::Custom { predicate, .. } => predicate(value, context),
        };
        if passed {
            Ok(())
        } else {
            Err(self.message())
        }
    }

    /// Message reported when the rule fails
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Required { message }
            | Self::MinLength { message, .. }
            | Self::OneOf { message, .. }
            | Self::Pattern { message, .. }
            | Self::Url { message }
            | Self::Number { message }
            | Self::Integer { message }
            | Self::Positive { message }
            | Self::DigitCount { message, .. }
            | Self::Range { message, .. }
            | Self::Date { message }
            | Self::DateBeforeToday { message }
            | Self::Custom { message, .. } => *message,
        }
    }
}

/// Trimmed text of a text value
fn text(value: &FieldValue) -> Option<&str> {
    value.as_text().map(str::trim)
}

/// Text parsed as a finite number
fn number(value: &FieldValue) -> Option<f64> {
    text(value)?
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

/// Decimal string of `n` the way a browser prints a number, e.g. `999` for the input `0999`
fn canonical_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// Text parsed as a calendar date
fn date(value: &FieldValue) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text(value)?, DATE_FORMAT).ok()
}

/// True for absolute http(s) and ftp URLs with a host
fn is_url(text: &str) -> bool {
    let Ok(url) = Url::parse(text) else {
        return false;
    };
    matches!(url.scheme(), "http" | "https" | "ftp") && url.has_host()
}
