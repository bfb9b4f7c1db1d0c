//! Trait definitions for the issue-tracker seam
//!
//! Static dispatch only: the dispatcher is generic over [`IssueApi`], so the
//! production client and test fakes compile to direct calls with no boxing.

use std::future::Future;

use crate::error::Result;
use crate::types::{Issue, IssueNumber, RepoInfo};

/// The two issue-tracker calls a check run can make
pub trait IssueApi {
    /// Fetch a single issue
    ///
    /// Endpoint: GET /repos/{owner}/{repo}/issues/{issue_number}
    fn get_issue<'a>(
        &'a self,
        repo: &'a RepoInfo,
        number: IssueNumber,
    ) -> impl Future<Output = Result<Issue>> + Send + 'a;

    /// Create a comment on an issue
    ///
    /// Endpoint: POST /repos/{owner}/{repo}/issues/{issue_number}/comments
    fn create_comment<'a>(
        &'a self,
        repo: &'a RepoInfo,
        number: IssueNumber,
        body: &'a str,
    ) -> impl Future<Output = Result<()>> + Send + 'a;
}
