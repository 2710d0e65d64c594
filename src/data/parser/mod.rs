pub mod time_activity;

// Expose the ParseError type
pub use time_activity::ParseError;
// Expose the main loading functions
pub use time_activity::{read_time_activity, read_time_activity_reader};
