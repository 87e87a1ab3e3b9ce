//! The timeline generator as an application: sample input, usage text and
//! the parse-then-render pipeline behind the CLI.

use crate::activity::{get_time_points, parse_activities, Activity};
use crate::error::{TimelineError, TimelineResult};
use crate::table::build_ascii_table;
use tracing::debug;

pub const TITLE: &str = "asciitl - ASCII Timeline Table Generator";

pub const SAMPLE_INPUT: &str = "\
09:00 - 09:15 Morning Routine
09:15 - 10:00 Breakfast
10:00 - 12:00 Work Session 1
12:00 - 13:00 Lunch Break
13:00 - 15:00 Work Session 2
15:00 - 16:00 Coffee Break
16:00 - 18:00 Work Session 3
18:00 - 19:00 Evening Routine
";

pub const USAGE: &str = "\
This tool generates an ASCII table from your daily activity timeline.
Input your activities in the format `HH:MM - HH:MM Activity`.

How to use:
1. Input your daily activities in the format `HH:MM - HH:MM Activity`.
2. Each activity should be on a new line, and the time format should be 24-hour.

Example:
09:00 - 09:15 Morning Routine
09:15 - 10:00 Breakfast
10:00 - 12:00 Work Session 1
12:00 - 13:00 Lunch Break
13:00 - 15:00 Work Session 2
15:00 - 16:00 Coffee Break
16:00 - 18:00 Work Session 3
18:00 - 19:00 Evening Routine
";

/// Output of one pass through the generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub activities: Vec<Activity>,
    pub time_points: Vec<String>,
    pub table: String,
}

/// Parse `text` and render its table.
///
/// Fails with [`TimelineError::NoActivities`] when no line parses.
pub fn render_timeline(text: &str) -> TimelineResult<Rendered> {
    let activities = parse_activities(text);
    debug!(count = activities.len(), ?activities, "Parsed activities");

    if activities.is_empty() {
        return Err(TimelineError::NoActivities);
    }

    let time_points = get_time_points(&activities);
    let table = build_ascii_table(&activities, &time_points);

    Ok(Rendered {
        activities,
        time_points,
        table,
    })
}
