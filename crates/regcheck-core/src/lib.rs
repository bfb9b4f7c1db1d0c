//! # regcheck core
//!
//! Checks pull requests against an extension registry. A registration pull
//! request is labelled with the extension type (`Bot`, `Adapter`, `Plugin`)
//! and built from a branch named after its registration issue
//! (`issue-<number>`). A check run:
//!
//! 1. classifies the pull request by its labels,
//! 2. resolves the linked issue number from the head branch,
//! 3. fetches the issue once,
//! 4. extracts a typed [`RegistrationRecord`] from the issue form body,
//! 5. hands it to exactly one type-specific validator, which may comment back.
//!
//! ## Example
//!
//! ```no_run
//! use regcheck_core::{check, CheckSettings, GitHubApiClient, PullRequestContext};
//!
//! # async fn example() -> regcheck_core::Result<()> {
//! let ctx = PullRequestContext::from_event_file("event.json".as_ref(), None)?;
//! let api = GitHubApiClient::from_env();
//!
//! let outcome = check(&api, &ctx, &CheckSettings::default()).await?;
//! println!("{}", outcome.as_str());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs, rust_2018_idioms)]

pub mod classify;
pub mod coordination;
pub mod error;
pub mod event;
pub mod extract;
pub mod http;
pub mod output;
pub mod traits;
pub mod types;

pub use classify::{classify_labels, extract_issue_number_from_ref};
pub use coordination::{check, publish_comment};
pub use error::{Error, ErrorKind, Result};
pub use extract::extract_info;
pub use http::GitHubApiClient;
pub use traits::IssueApi;
pub use types::{
    AdapterInfo, BotInfo, CheckSettings, ExtensionType, Issue, IssueNumber, PluginInfo,
    PullRequestContext, RegistrationRecord, RepoInfo, RunOutcome, BRANCH_NAME_PREFIX,
};

/// Synchronous variant of [`check`]
///
/// This creates a current-thread Tokio runtime and blocks on the async version.
/// Prefer the async version if you're already in an async context.
pub fn check_sync<A>(api: &A, ctx: &PullRequestContext, settings: &CheckSettings) -> Result<RunOutcome>
where
    A: IssueApi + Sync,
{
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| Error::Other(format!("failed to create runtime: {}", e)))?
        .block_on(check(api, ctx, settings))
}
