//! Pull request classification: which extension type, which issue

pub mod branch;
pub mod labels;

pub use branch::extract_issue_number_from_ref;
pub use labels::classify_labels;
