//! Activity timelines rendered as ASCII tables.
//!
//! Input is plain text with one activity per line in the form
//! `HH:MM - HH:MM Activity`. The parsed activities are laid out on a shared
//! axis of time points and drawn as horizontal bars:
//!
//! ```text
//!  -----------------  ------- ------- -------
//!       activity       09:00   09:15   10:00
//!  -----------------  ------- ------- -------
//!   Morning Routine   |------ -----|
//!   Breakfast                 |------ -----|
//!  -----------------  ------- ------- -------
//! ```

pub mod activity;
pub mod app;
pub mod error;
pub mod table;

pub use activity::{get_time_points, parse_activities, Activity};
pub use app::{render_timeline, Rendered, SAMPLE_INPUT, TITLE, USAGE};
pub use error::{TimelineError, TimelineResult};
pub use table::{build_ascii_table, build_ascii_table_with, TableLayout};

pub mod prelude {
    pub use crate::activity::*;
    pub use crate::app::*;
    pub use crate::error::*;
    pub use crate::table::*;
}
