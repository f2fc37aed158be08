//! Reference-range classification for report results.
//!
//! Recognised range shapes, tried in order:
//! - `min-max` (e.g. "13.5-17.5", "4000 - 11000 /cumm")
//! - `<threshold` (e.g. "<150"): values at or above the threshold are high
//! - `>threshold` (e.g. ">40"): values at or below the threshold are low
//!
//! Anything else ("Negative", "See comment") is never flagged. Values are read
//! as a leading decimal number; non-numeric values are never flagged.

use std::sync::LazyLock;

use regex::Regex;

static MIN_MAX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:\.\d+)?)\s*-\s*(\d+(?:\.\d+)?)").expect("valid min-max pattern")
});

static UPPER_BOUND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*<\s*(\d+(?:\.\d+)?)").expect("valid upper-bound pattern"));

static LOWER_BOUND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*>\s*(\d+(?:\.\d+)?)").expect("valid lower-bound pattern"));

static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([-+]?(?:\d+(?:\.\d*)?|\.\d+))").expect("valid number pattern")
});

/// Where a result sits relative to its reference range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeFlag {
    Normal,
    Low,
    High,
}

impl RangeFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Low => "Low",
            Self::High => "High",
        }
    }
}

/// A parsed reference range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReferenceRange {
    Between { min: f64, max: f64 },
    Below(f64),
    Above(f64),
}

impl ReferenceRange {
    /// Parse a textual range. `None` for shapes the classifier does not understand.
    pub fn parse(text: &str) -> Option<Self> {
        if let Some(caps) = MIN_MAX.captures(text) {
            let min = caps[1].parse().ok()?;
            let max = caps[2].parse().ok()?;
            return Some(Self::Between { min, max });
        }
        if let Some(caps) = UPPER_BOUND.captures(text) {
            return caps[1].parse().ok().map(Self::Below);
        }
        if let Some(caps) = LOWER_BOUND.captures(text) {
            return caps[1].parse().ok().map(Self::Above);
        }
        None
    }

    pub fn classify(&self, value: f64) -> RangeFlag {
        match *self {
            Self::Between { min, .. } if value < min => RangeFlag::Low,
            Self::Between { max, .. } if value > max => RangeFlag::High,
            Self::Below(threshold) if value >= threshold => RangeFlag::High,
            Self::Above(threshold) if value <= threshold => RangeFlag::Low,
            _ => RangeFlag::Normal,
        }
    }
}

/// Leading decimal number of a result value ("160 mg/dL" → 160).
pub fn parse_value(value: &str) -> Option<f64> {
    LEADING_NUMBER
        .captures(value)
        .and_then(|caps| caps[1].parse().ok())
}

/// Classify a result value against a textual reference range.
pub fn classify(reference_range: &str, value: &str) -> RangeFlag {
    match (ReferenceRange::parse(reference_range), parse_value(value)) {
        (Some(range), Some(number)) => range.classify(number),
        _ => RangeFlag::Normal,
    }
}

/// Whether a result should be highlighted as abnormal.
pub fn is_abnormal(reference_range: &str, value: &str) -> bool {
    classify(reference_range, value) != RangeFlag::Normal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_max() {
        assert!(is_abnormal("13.5-17.5", "20"));
        assert!(!is_abnormal("13.5-17.5", "15"));
        assert_eq!(classify("13.5-17.5", "12.1"), RangeFlag::Low);
        assert_eq!(classify("13.5-17.5", "17.6"), RangeFlag::High);
        assert_eq!(classify("13.5-17.5", "17.5"), RangeFlag::Normal);
    }

    #[test]
    fn test_min_max_with_spaces_and_units() {
        assert!(is_abnormal("4000 - 11000 /cumm", "12500"));
        assert!(!is_abnormal("4000 - 11000 /cumm", "7200"));
    }

    #[test]
    fn test_upper_bound() {
        assert!(is_abnormal("<150", "160"));
        assert!(!is_abnormal("<150", "100"));
        assert!(is_abnormal("<150", "150"));
        assert!(is_abnormal("< 200 mg/dL", "245 mg/dL"));
    }

    #[test]
    fn test_lower_bound() {
        assert_eq!(classify(">40", "35"), RangeFlag::Low);
        assert_eq!(classify(">40", "40"), RangeFlag::Low);
        assert_eq!(classify(">40", "52"), RangeFlag::Normal);
    }

    #[test]
    fn test_unrecognised_shapes_are_normal() {
        assert!(!is_abnormal("Negative", "Positive"));
        assert!(!is_abnormal("", "999"));
        assert!(!is_abnormal("13.5-17.5", "Haemolysed"));
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("160 mg/dL"), Some(160.0));
        assert_eq!(parse_value(" 7.25"), Some(7.25));
        assert_eq!(parse_value(".5"), Some(0.5));
        assert_eq!(parse_value("-3"), Some(-3.0));
        assert_eq!(parse_value("abc"), None);
    }

    #[test]
    fn test_parse_range() {
        assert_eq!(
            ReferenceRange::parse("70-110"),
            Some(ReferenceRange::Between { min: 70.0, max: 110.0 })
        );
        assert_eq!(ReferenceRange::parse("<5.7"), Some(ReferenceRange::Below(5.7)));
        assert_eq!(ReferenceRange::parse("> 60"), Some(ReferenceRange::Above(60.0)));
        assert_eq!(ReferenceRange::parse("Non-reactive"), None);
    }
}
