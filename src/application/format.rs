// Display formatting - Summary figures, signed deltas and trend labels
use chrono::NaiveDate;
use std::fmt::Write;

/// A chrono format string known to render calendar dates.
#[derive(Debug, Clone, PartialEq)]
pub struct DateFormat(String);

impl DateFormat {
    pub fn new(pattern: impl Into<String>) -> anyhow::Result<Self> {
        let pattern = pattern.into();
        // Time-of-day specifiers fail on plain dates; reject them up front.
        let sample = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap_or_default();
        let mut rendered = String::new();
        if write!(rendered, "{}", sample.format(&pattern)).is_err() {
            anyhow::bail!("date format {pattern:?} cannot render calendar dates");
        }
        Ok(Self(pattern))
    }

    pub fn format(&self, date: NaiveDate) -> String {
        date.format(&self.0).to_string()
    }
}

impl Default for DateFormat {
    /// en-US short date, e.g. `1/2/2024`.
    fn default() -> Self {
        Self("%-m/%-d/%Y".to_string())
    }
}

/// `1234567` -> `1,234,567`
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}

/// Signed one-decimal figure followed by `suffix`, e.g. `+5.0%` or `-1.2 pts`.
pub fn format_signed(value: f64, suffix: &str) -> String {
    // Avoid printing "-0.0" for changes that round to zero.
    let rounded = (value * 10.0).round() / 10.0;
    if rounded > 0.0 {
        format!("+{rounded:.1}{suffix}")
    } else if rounded < 0.0 {
        format!("{rounded:.1}{suffix}")
    } else {
        format!("0.0{suffix}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1234567), "1,234,567");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(5.0), "5.0%");
        assert_eq!(format_percent(12.34), "12.3%");
    }

    #[test]
    fn test_format_signed() {
        assert_eq!(format_signed(5.0, "%"), "+5.0%");
        assert_eq!(format_signed(-1.24, " pts"), "-1.2 pts");
        assert_eq!(format_signed(-0.01, "%"), "0.0%");
    }

    #[test]
    fn test_date_format() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        assert_eq!(DateFormat::default().format(date), "1/2/2024");
        assert_eq!(DateFormat::new("%Y-%m-%d").unwrap().format(date), "2024-01-02");
        assert!(DateFormat::new("%H:%M").is_err());
    }
}
