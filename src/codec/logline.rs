use once_cell::sync::Lazy;
use regex::Regex;

// Justlog/Rustlog line shape: "[YYYY-MM-DD HH:MM:SS] #channel user: [@mention ]payload".
// Group 1 is the structural prefix (including an optional mention), group 2 the payload.
static LOG_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(\[[0-9]{4}-[0-9]{2}-[0-9]{2} [0-9]{2}:[0-9]{2}:[0-9]{2}\] #\w+ \w+: (?:@\w+ )?)(.+)$",
    )
    .unwrap()
});

/// Splits a log line into `(prefix, payload)`.
///
/// Returns `None` for any line that does not match the grammar, signaling
/// that the line must be passed through untouched. The timestamp is matched
/// by shape only; calendar validity is not checked.
pub fn split(line: &str) -> Option<(&str, &str)> {
    let caps = LOG_LINE.captures(line)?;
    match (caps.get(1), caps.get(2)) {
        (Some(prefix), Some(payload)) => Some((prefix.as_str(), payload.as_str())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_basic_line() {
        let line = "[2024-01-01 12:00:00] #channel user: hello world";
        let (prefix, payload) = split(line).unwrap();
        assert_eq!(prefix, "[2024-01-01 12:00:00] #channel user: ");
        assert_eq!(payload, "hello world");
    }

    #[test]
    fn test_split_line_with_mention() {
        let line = "[2024-01-01 12:00:00] #channel user: @friend hello";
        let (prefix, payload) = split(line).unwrap();
        assert_eq!(prefix, "[2024-01-01 12:00:00] #channel user: @friend ");
        assert_eq!(payload, "hello");
    }

    #[test]
    fn test_prefix_and_payload_cover_whole_line() {
        let line = "[2024-01-01 12:00:00] #channel user: @friend hello";
        let (prefix, payload) = split(line).unwrap();
        assert_eq!(format!("{}{}", prefix, payload), line);
    }

    #[test]
    fn test_no_match_without_bracketed_timestamp() {
        assert!(split("just a log line").is_none());
        assert!(split("").is_none());
        assert!(split("2024-01-01 12:00:00 #channel user: hi").is_none());
    }

    #[test]
    fn test_no_match_without_payload() {
        assert!(split("[2024-01-01 12:00:00] #channel user: ").is_none());
    }

    #[test]
    fn test_calendar_validity_not_checked() {
        assert!(split("[2024-13-99 25:61:61] #channel user: hi").is_some());
    }
}
