//! Branch reference parser: recovers the registration issue number

use crate::types::IssueNumber;

const HEADS_PREFIX: &str = "refs/heads/";

/// Extract the issue number from a head branch named `<prefix><digits>`.
///
/// A leading `refs/heads/` is ignored. Returns `None` when the prefix is
/// missing, nothing but ASCII digits follow it, the number is zero, or it
/// overflows `u64`.
pub fn extract_issue_number_from_ref(reference: &str, prefix: &str) -> Option<IssueNumber> {
    let branch = reference.strip_prefix(HEADS_PREFIX).unwrap_or(reference);
    let digits = branch.strip_prefix(prefix)?;

    // u64::from_str accepts a leading '+', which is not part of the convention
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    digits.parse::<u64>().ok().and_then(IssueNumber::new)
}
