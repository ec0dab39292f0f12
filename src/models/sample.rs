use chrono::{DateTime, Local};
use std::fmt::Write as _;

/// One point-in-time observation of the focused application, window title
/// and idle duration. Built fresh on every sampling tick, serialized and
/// discarded; never kept across ticks.
#[derive(Debug, Clone)]
pub struct ActivitySample {
    pub timestamp: DateTime<Local>,
    pub app_name: String,
    pub window_title: String,
    pub idle_secs: u64,
}

impl ActivitySample {
    /// Build a sample stamped with the current local time.
    ///
    /// Empty `app_name`/`window_title` mean "unknown/none" and are valid.
    pub fn now(app_name: String, window_title: String, idle_secs: u64) -> Self {
        Self {
            timestamp: Local::now(),
            app_name,
            window_title,
            idle_secs,
        }
    }

    /// Serialize to one JSON record, fields in fixed order, no trailing
    /// whitespace and no newline terminator (the journal appends it).
    pub fn to_json_line(&self) -> String {
        format!(
            "{{\"timestamp\":\"{}\",\"app_name\":\"{}\",\"window_title\":\"{}\",\"idle_seconds\":{}}}",
            self.timestamp.format("%Y-%m-%dT%H:%M:%S"),
            escape_json(&self.app_name),
            escape_json(&self.window_title),
            self.idle_secs,
        )
    }
}

/// Escape a string for use inside a quoted JSON field: `"` and `\` are
/// backslash-escaped, the named control characters take their short form,
/// any other control character becomes `\u00XX` (uppercase hex). Everything
/// else passes through unchanged.
fn escape_json(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c < '\u{0020}' => {
                // Writing to a String cannot fail.
                let _ = write!(out, "\\u{:04X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn sample(app: &str, title: &str, idle: u64) -> ActivitySample {
        ActivitySample::now(app.to_string(), title.to_string(), idle)
    }

    #[test]
    fn test_escapes_quotes_and_backslashes() {
        assert_eq!(escape_json(r#"say "hi""#), r#"say \"hi\""#);
        assert_eq!(escape_json(r"C:\temp\x"), r"C:\\temp\\x");
    }

    #[test]
    fn test_escapes_named_control_characters() {
        assert_eq!(escape_json("a\u{0008}b\u{000C}c\nd\re\tf"), "a\\bb\\fc\\nd\\re\\tf");
    }

    #[test]
    fn test_escapes_remaining_control_bytes_as_uppercase_hex() {
        assert_eq!(escape_json("\u{0000}"), "\\u0000");
        assert_eq!(escape_json("x\u{0001}y"), "x\\u0001y");
        assert_eq!(escape_json("\u{001F}"), "\\u001F");
        assert_eq!(escape_json("\u{001B}[0m"), "\\u001B[0m");
    }

    #[test]
    fn test_non_control_text_passes_through() {
        assert_eq!(escape_json("Éditeur ~ draft.txt"), "Éditeur ~ draft.txt");
    }

    #[test]
    fn test_json_line_field_order_and_shape() {
        let s = sample("Editor", "draft.txt - Editor", 42);
        let line = s.to_json_line();

        assert!(line.starts_with("{\"timestamp\":\""));
        assert!(line.ends_with("\",\"window_title\":\"draft.txt - Editor\",\"idle_seconds\":42}"));
        assert!(line.contains("\",\"app_name\":\"Editor\",\""));
        assert!(!line.contains('\n'));
        assert_eq!(line.trim_end(), line);
    }

    #[test]
    fn test_timestamp_is_local_iso_without_offset() {
        let line = sample("a", "b", 0).to_json_line();
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        let ts = value["timestamp"].as_str().unwrap();

        assert_eq!(ts.len(), 19);
        NaiveDateTime::parse_from_str(ts, "%Y-%m-%dT%H:%M:%S").unwrap();
    }

    #[test]
    fn test_round_trip_through_json_parser() {
        // Every control byte plus the two escaped punctuation characters.
        let mut nasty = String::from("quote:\" backslash:\\ ");
        for b in 0u32..32 {
            nasty.push(char::from_u32(b).unwrap());
        }

        let s = sample(&nasty, &nasty, 7);
        let line = s.to_json_line();
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();

        assert_eq!(value["app_name"].as_str().unwrap(), nasty);
        assert_eq!(value["window_title"].as_str().unwrap(), nasty);
        assert_eq!(value["idle_seconds"].as_u64().unwrap(), 7);
    }

    #[test]
    fn test_serialization_is_deterministic() {
        let s = sample("Editor", "draft", 3);
        assert_eq!(s.to_json_line(), s.to_json_line());
    }
}
