//! Date formatting for table cells

use contracts::shared::list_view::parse_timestamp;

/// ISO timestamp -> `DD.MM.YYYY HH:MM` in UTC; bare dates -> `DD.MM.YYYY`.
/// Unparsable input is returned unchanged.
pub fn format_datetime(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.len() == 10 {
        return format_date(trimmed);
    }
    match parse_timestamp(trimmed) {
        Some(dt) => dt.format("%d.%m.%Y %H:%M").to_string(),
        None => raw.to_string(),
    }
}

/// `2024-03-15` or `2024-03-15T14:02:26Z` -> `15.03.2024`
pub fn format_date(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => dt.format("%d.%m.%Y").to_string(),
        None => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_datetime() {
        assert_eq!(format_datetime("2024-03-15T14:02:26.123Z"), "15.03.2024 14:02");
        assert_eq!(format_datetime("2024-03-15T14:02:26+03:00"), "15.03.2024 11:02");
        assert_eq!(format_datetime("2024-03-15"), "15.03.2024");
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(format_datetime("invalid"), "invalid");
        assert_eq!(format_date("2024-13-45"), "2024-13-45");
    }
}
