//! dupe-d: hash every file in a directory tree into a CSV report.
//!
//! Sort the report on the Hash column to spot duplicate files.

pub mod error;
pub mod extension;
pub mod hash;
pub mod pipeline;
pub mod report;
pub mod scanner;
pub mod target;
pub mod types;
