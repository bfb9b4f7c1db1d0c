//! Run outcome reporting for GitHub Actions and local use

pub mod report;
pub mod writer;

pub use report::Report;
pub use writer::{safe_output_escape, OutputWriter};
