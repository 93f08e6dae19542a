//! Supporting data handling around organized views.
//!
//! - [`duration`]: Parsing and formatting of duration strings (e.g., "60s", "500ms", "5m")
//! - [`history`]: Bounded history of organized samples for trends and export

pub mod duration;
pub mod history;

pub use history::History;
