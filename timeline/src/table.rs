use crate::activity::Activity;
use crate::error::{TimelineError, TimelineResult};

/// Minimum column widths for the rendered table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableLayout {
    pub min_activity_width: usize,
    pub min_time_width: usize,
}

impl Default for TableLayout {
    fn default() -> Self {
        Self {
            min_activity_width: 8,
            min_time_width: 7,
        }
    }
}

impl TableLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_activity_width(mut self, width: usize) -> Self {
        self.min_activity_width = width;
        self
    }

    pub fn with_min_time_width(mut self, width: usize) -> Self {
        self.min_time_width = width;
        self
    }

    pub fn validate(&self) -> TimelineResult<()> {
        if self.min_activity_width == 0 {
            return Err(TimelineError::InvalidLayout {
                reason: "activity column width must be greater than 0".to_string(),
            });
        }

        // A bar cell needs room for both of its caps.
        if self.min_time_width < 2 {
            return Err(TimelineError::InvalidLayout {
                reason: "time column width must be at least 2".to_string(),
            });
        }

        Ok(())
    }
}

/// Render `activities` against `time_points` with the default layout.
pub fn build_ascii_table(activities: &[Activity], time_points: &[String]) -> String {
    render(TableLayout::default(), activities, time_points)
}

/// Render with a custom layout, rejecting layouts too narrow to draw bars.
pub fn build_ascii_table_with(
    layout: TableLayout,
    activities: &[Activity],
    time_points: &[String],
) -> TimelineResult<String> {
    layout.validate()?;
    Ok(render(layout, activities, time_points))
}

fn render(layout: TableLayout, activities: &[Activity], time_points: &[String]) -> String {
    let activity_width = activities
        .iter()
        .map(|a| width_of(&a.name))
        .max()
        .unwrap_or(0)
        .max(layout.min_activity_width);
    let time_width = time_points
        .iter()
        .map(|tp| width_of(tp))
        .max()
        .unwrap_or(0)
        .max(layout.min_time_width);

    let mut header = format!("  {}  ", center("activity", activity_width));
    for tp in time_points {
        header.push(' ');
        header.push_str(&center(tp, time_width));
    }
    header.push('\n');

    let mut sep = format!(" {} ", "-".repeat(activity_width + 2));
    for _ in time_points {
        sep.push(' ');
        sep.push_str(&"-".repeat(time_width));
    }
    sep.push('\n');

    let mut table = String::new();
    table.push_str(&sep);
    table.push_str(&header);
    table.push_str(&sep);

    for act in activities {
        let Some(cells) = bar_cells(act, time_points, time_width) else {
            continue;
        };

        table.push_str("  ");
        table.push_str(&act.name);
        table.push_str(&" ".repeat(activity_width - width_of(&act.name)));
        table.push_str("  ");
        for cell in cells {
            table.push(' ');
            table.push_str(&cell);
        }
        table.push('\n');
    }

    table.push_str(&sep);
    table
}

/// Cells of one row, or `None` when the activity's times are not on the axis.
fn bar_cells(act: &Activity, time_points: &[String], width: usize) -> Option<Vec<String>> {
    let start = time_points.iter().position(|tp| *tp == act.start)?;
    let end = time_points.iter().position(|tp| *tp == act.end)?;

    let mut cells = vec![" ".repeat(width); time_points.len()];
    let inner = "-".repeat(width - 2);

    cells[start] = format!("|{}{}", inner, if start == end { '|' } else { '-' });
    for cell in cells.iter_mut().take(end).skip(start + 1) {
        *cell = "-".repeat(width);
    }
    // An end before the start leaves the bar open.
    if end > start {
        cells[end] = format!("{}|", inner);
    }

    Some(cells)
}

fn width_of(s: &str) -> usize {
    s.chars().count()
}

/// Center `s` in a field of `width` characters. When the padding is odd
/// the extra space goes on the left for odd widths and on the right for
/// even ones.
fn center(s: &str, width: usize) -> String {
    let len = width_of(s);
    if len >= width {
        return s.to_string();
    }

    let pad = width - len;
    let left = pad / 2 + (pad & width & 1);
    format!("{}{}{}", " ".repeat(left), s, " ".repeat(pad - left))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::{get_time_points, parse_activities};

    fn table_for(text: &str) -> String {
        let activities = parse_activities(text);
        let time_points = get_time_points(&activities);
        build_ascii_table(&activities, &time_points)
    }

    #[test]
    fn test_center_matches_odd_even_rule() {
        assert_eq!(center("09:00", 7), " 09:00 ");
        assert_eq!(center("activity", 9), " activity");
        assert_eq!(center("activity", 11), "  activity ");
        assert_eq!(center("activity", 15), "    activity   ");
        assert_eq!(center("ab", 6), "  ab  ");
        assert_eq!(center("toolong", 3), "toolong");
    }

    #[test]
    fn test_three_activity_table() {
        let table = table_for(
            "09:00 - 09:15 Morning Routine\n09:15 - 10:00 Breakfast\n10:00 - 12:00 Work Session 1\n",
        );
        let expected = concat!(
            " -----------------  ------- ------- ------- -------\n",
            "      activity       09:00   09:15   10:00   12:00 \n",
            " -----------------  ------- ------- ------- -------\n",
            "  Morning Routine   |------ -----|                \n",
            "  Breakfast                 |------ -----|        \n",
            "  Work Session 1                    |------ -----|\n",
            " -----------------  ------- ------- ------- -------\n",
        );
        assert_eq!(table, expected);
    }

    #[test]
    fn test_zero_length_and_reversed_bars() {
        let table = table_for("10:00 - 10:00 Nap\n11:00-09:00 Back");
        let expected = concat!(
            " ----------  ------- ------- -------\n",
            "  activity    09:00   10:00   11:00 \n",
            " ----------  ------- ------- -------\n",
            "  Nap                |-----|        \n",
            "  Back                       |------\n",
            " ----------  ------- ------- -------\n",
        );
        assert_eq!(table, expected);
    }

    #[test]
    fn test_single_activity_uses_minimum_widths() {
        let table = table_for("08:00 - 09:00 Go");
        let expected = concat!(
            " ----------  ------- -------\n",
            "  activity    08:00   09:00 \n",
            " ----------  ------- -------\n",
            "  Go         |------ -----|\n",
            " ----------  ------- -------\n",
        );
        assert_eq!(table, expected);
    }

    #[test]
    fn test_bar_spans_intermediate_points() {
        let activities = vec![
            Activity::new("09:00", "12:00", "Long"),
            Activity::new("10:00", "11:00", "Short"),
        ];
        let time_points = get_time_points(&activities);
        let table = build_ascii_table(&activities, &time_points);
        let long_row = table.lines().find(|l| l.contains("Long")).unwrap();
        assert!(long_row.ends_with("|------ ------- ------- -----|"));
    }

    #[test]
    fn test_activity_missing_from_axis_is_skipped() {
        let activities = vec![
            Activity::new("09:00", "10:00", "Listed"),
            Activity::new("09:00", "23:00", "Off axis"),
        ];
        let time_points = vec!["09:00".to_string(), "10:00".to_string()];
        let table = build_ascii_table(&activities, &time_points);
        assert!(table.contains("Listed"));
        assert!(!table.contains("Off axis"));
        assert_eq!(table.lines().count(), 5);
    }

    #[test]
    fn test_empty_table_has_only_frame() {
        let table = build_ascii_table(&[], &[]);
        assert_eq!(table, " ---------- \n  activity  \n ---------- \n ---------- \n");
    }

    #[test]
    fn test_wide_names_use_character_width() {
        let activities = vec![Activity::new("09:00", "10:00", "Café au lait")];
        let time_points = get_time_points(&activities);
        let table = build_ascii_table(&activities, &time_points);
        let sep = table.lines().next().unwrap();
        assert!(sep.starts_with(&format!(" {} ", "-".repeat(14))));
    }

    #[test]
    fn test_custom_layout() {
        let activities = vec![Activity::new("09:00", "10:00", "Go")];
        let time_points = get_time_points(&activities);
        let layout = TableLayout::new()
            .with_min_activity_width(2)
            .with_min_time_width(5);
        let table = build_ascii_table_with(layout, &activities, &time_points).unwrap();
        assert!(table.contains("  Go   |---- ---|\n"));
    }

    #[test]
    fn test_layout_validation() {
        assert!(TableLayout::default().validate().is_ok());
        assert!(TableLayout::new().with_min_time_width(1).validate().is_err());
        assert!(TableLayout::new().with_min_activity_width(0).validate().is_err());

        let result = build_ascii_table_with(
            TableLayout::new().with_min_time_width(0),
            &[],
            &[],
        );
        assert!(matches!(result, Err(TimelineError::InvalidLayout { .. })));
    }
}
