//! Output generation for extracted job records.
//!
//! - [`json`]: writes the record to a JSON file for downstream consumers
//! - [`console`]: renders a readable summary for the terminal

pub mod console;
pub mod json;
