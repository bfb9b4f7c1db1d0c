//! Comment publisher

use crate::error::Result;
use crate::traits::IssueApi;
use crate::types::{IssueNumber, RepoInfo};
use std::borrow::Cow;

/// GitHub rejects comment bodies longer than this many characters
pub const MAX_COMMENT_CHARS: usize = 65_536;

const TRUNCATION_NOTICE: &str = "\n\n_(comment truncated)_";

/// Post `text` as a new comment on the registration issue.
///
/// One outbound call; failures propagate unchanged.
pub async fn publish_comment<A>(
    api: &A,
    repo: &RepoInfo,
    issue_number: IssueNumber,
    text: &str,
) -> Result<()>
where
    A: IssueApi + Sync,
{
    let body = fit_comment(text);
    if let Cow::Owned(_) = body {
        tracing::warn!(issue = %issue_number, "comment exceeds GitHub limit, truncated");
    }
    api.create_comment(repo, issue_number, &body).await?;
    tracing::info!(issue = %issue_number, "comment posted");
    Ok(())
}

/// Truncate on a char boundary so the body fits [`MAX_COMMENT_CHARS`].
///
/// Returns the input unchanged (borrowed) when it already fits.
pub fn fit_comment(text: &str) -> Cow<'_, str> {
    if text.len() <= MAX_COMMENT_CHARS || text.chars().nth(MAX_COMMENT_CHARS).is_none() {
        return Cow::Borrowed(text);
    }

    let keep = MAX_COMMENT_CHARS - TRUNCATION_NOTICE.chars().count();
    let end = text
        .char_indices()
        .nth(keep)
        .map(|(i, _)| i)
        .unwrap_or(text.len());

    let mut out = String::with_capacity(end + TRUNCATION_NOTICE.len());
    out.push_str(&text[..end]);
    out.push_str(TRUNCATION_NOTICE);
    Cow::Owned(out)
}
