//! Formatting helpers for presenting metrics.

use time::{macros::format_description, Date};

/// Short chart label such as `Jan 1`.
pub fn format_day_label(date: Date) -> Option<String> {
    date.format(&format_description!("[month repr:short] [day padding:none]"))
        .ok()
}

/// Value for a `<input type="date">` field (`2024-06-15`).
pub fn format_date_input(date: Date) -> String {
    date.format(&format_description!("[year]-[month]-[day]"))
        .unwrap_or_default()
}

/// Thousands-separated count, e.g. `12,480`.
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

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn day_labels_are_unpadded() {
        assert_eq!(format_day_label(date!(2024 - 01 - 01)).as_deref(), Some("Jan 1"));
        assert_eq!(format_day_label(date!(2024 - 12 - 25)).as_deref(), Some("Dec 25"));
    }

    #[test]
    fn date_inputs_are_iso() {
        assert_eq!(format_date_input(date!(2024 - 06 - 09)), "2024-06-09");
    }

    #[test]
    fn counts_group_thousands() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(12_480_001), "12,480,001");
    }
}
