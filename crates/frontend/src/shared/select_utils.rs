//! Helpers for `<select>` based cascading selectors

/// Value of a selector option; the placeholder option carries an empty value
pub fn parse_select_value(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse().ok()
}

/// Placeholder text for a level selector
pub fn placeholder(label: &str, enabled: bool, loading: bool) -> String {
    if loading {
        "Loading...".to_string()
    } else if enabled {
        format!("Select {}", label)
    } else {
        format!("Select the level above first ({})", label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_select_value() {
        assert_eq!(parse_select_value("42"), Some(42));
        assert_eq!(parse_select_value(""), None);
        assert_eq!(parse_select_value(" "), None);
        assert_eq!(parse_select_value("abc"), None);
    }

    #[test]
    fn test_placeholder() {
        assert_eq!(placeholder("City", true, false), "Select City");
        assert_eq!(placeholder("City", true, true), "Loading...");
        assert_eq!(
            placeholder("City", false, false),
            "Select the level above first (City)"
        );
    }
}
