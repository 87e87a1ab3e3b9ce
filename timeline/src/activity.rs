use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// A single timeline entry: start time, end time and a free-form name.
///
/// Times are kept exactly as typed (`HH:MM`), which keeps them sortable
/// as plain strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub start: String,
    pub end: String,
    pub name: String,
}

impl Activity {
    pub fn new(start: impl Into<String>, end: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            name: name.into(),
        }
    }
}

/// Line boundaries: ASCII newline and carriage return, the vertical tab,
/// form feed and separator controls, NEL, and the Unicode line/paragraph
/// separators. A `\r\n` pair yields an extra empty line, which never matches.
const LINE_BREAKS: [char; 10] = [
    '\n', '\r', '\x0b', '\x0c', '\x1c', '\x1d', '\x1e', '\u{85}', '\u{2028}', '\u{2029}',
];

fn activity_line() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // Anchored at the start only; anything after the whitespace is the name.
    PATTERN.get_or_init(|| {
        Regex::new(r"^(\d{2}:\d{2})\s*-\s*(\d{2}:\d{2})\s+(.*)")
            .expect("activity pattern is a valid regex")
    })
}

/// Parse every `HH:MM - HH:MM Activity` line out of `text`.
///
/// Lines may end in `\n`, `\r\n`, a bare `\r` or any other Unicode line
/// boundary. Lines are trimmed before matching and lines that do not match
/// are skipped. Times are not range-checked.
///
/// ```
/// use timeline::{parse_activities, Activity};
///
/// let text = "09:00 - 09:15 Morning Routine\n09:15 - 10:00 Breakfast";
/// assert_eq!(
///     parse_activities(text),
///     vec![
///         Activity::new("09:00", "09:15", "Morning Routine"),
///         Activity::new("09:15", "10:00", "Breakfast"),
///     ]
/// );
/// ```
pub fn parse_activities(text: &str) -> Vec<Activity> {
    let pattern = activity_line();

    text.split(LINE_BREAKS)
        .filter_map(|line| {
            let caps = pattern.captures(line.trim())?;
            Some(Activity::new(&caps[1], &caps[2], &caps[3]))
        })
        .collect()
}

/// Collect the unique start and end times of `activities`, sorted.
///
/// ```
/// use timeline::{get_time_points, Activity};
///
/// let activities = vec![
///     Activity::new("09:00", "09:15", "Morning Routine"),
///     Activity::new("09:15", "10:00", "Breakfast"),
/// ];
/// assert_eq!(get_time_points(&activities), vec!["09:00", "09:15", "10:00"]);
/// ```
pub fn get_time_points(activities: &[Activity]) -> Vec<String> {
    activities
        .iter()
        .flat_map(|act| [act.start.as_str(), act.end.as_str()])
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_lines() {
        let activities = parse_activities("09:00 - 09:15 Morning Routine\n09:15 - 10:00 Breakfast\n");
        assert_eq!(activities.len(), 2);
        assert_eq!(activities[0], Activity::new("09:00", "09:15", "Morning Routine"));
        assert_eq!(activities[1], Activity::new("09:15", "10:00", "Breakfast"));
    }

    #[test]
    fn test_parse_skips_invalid_lines() {
        let text = "header line\n\n9:00 - 10:00 Too short\n10:00 - 11:00 Kept\n10:00 - 11:00\n";
        let activities = parse_activities(text);
        assert_eq!(activities, vec![Activity::new("10:00", "11:00", "Kept")]);
    }

    #[test]
    fn test_parse_trims_and_allows_tight_hyphen() {
        let activities = parse_activities("   08:00-08:30   Stretch  \n");
        assert_eq!(activities, vec![Activity::new("08:00", "08:30", "Stretch")]);
    }

    #[test]
    fn test_parse_does_not_range_check_times() {
        let activities = parse_activities("25:99 - 26:00 Impossible");
        assert_eq!(activities, vec![Activity::new("25:99", "26:00", "Impossible")]);
    }

    #[test]
    fn test_parse_requires_match_at_line_start() {
        assert!(parse_activities("at 09:00 - 10:00 Meeting").is_empty());
    }

    #[test]
    fn test_parse_name_keeps_inner_characters() {
        let activities = parse_activities("12:00 - 13:00 Lunch - with team (café)");
        assert_eq!(activities[0].name, "Lunch - with team (café)");
    }

    #[test]
    fn test_parse_carriage_return_line_endings() {
        let expected = vec![
            Activity::new("09:00", "10:00", "A"),
            Activity::new("10:00", "11:00", "B"),
        ];
        assert_eq!(parse_activities("09:00 - 10:00 A\r10:00 - 11:00 B\r"), expected);
        assert_eq!(parse_activities("09:00 - 10:00 A\r\n10:00 - 11:00 B\r\n"), expected);
    }

    #[test]
    fn test_parse_unicode_line_separators() {
        let text = "09:00 - 10:00 A\u{2028}10:00 - 11:00 B\u{85}11:00 - 12:00 C\x0c12:00 - 13:00 D";
        let names: Vec<String> = parse_activities(text).into_iter().map(|a| a.name).collect();
        assert_eq!(names, vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(parse_activities("").is_empty());
        assert!(parse_activities("\n\n").is_empty());
    }

    #[test]
    fn test_time_points_unique_and_sorted() {
        let activities = vec![
            Activity::new("13:00", "14:00", "B"),
            Activity::new("09:00", "13:00", "A"),
            Activity::new("09:00", "09:30", "C"),
        ];
        assert_eq!(
            get_time_points(&activities),
            vec!["09:00", "09:30", "13:00", "14:00"]
        );
    }

    #[test]
    fn test_time_points_empty() {
        assert!(get_time_points(&[]).is_empty());
    }

    #[test]
    fn test_activity_serialization() {
        let activity = Activity::new("09:00", "09:15", "Morning Routine");
        let json = serde_json::to_string(&activity).unwrap();
        assert_eq!(
            json,
            r#"{"start":"09:00","end":"09:15","name":"Morning Routine"}"#
        );
        let back: Activity = serde_json::from_str(&json).unwrap();
        assert_eq!(back, activity);
    }
}
