//! GitHub pull request event payload loading
//!
//! Actions writes the webhook payload that triggered the workflow to the file
//! named by `GITHUB_EVENT_PATH`. Only the handful of fields the check needs are
//! deserialized; everything else in the payload is ignored.

use crate::error::{Error, Result};
use crate::types::{PullRequestContext, RepoInfo};
use serde::Deserialize;
use std::path::Path;

/// Event names that carry a `pull_request` object
pub const SUPPORTED_EVENTS: [&str; 2] = ["pull_request", "pull_request_target"];

/// Whether the check understands this `GITHUB_EVENT_NAME`
#[inline]
pub fn is_supported_event(name: &str) -> bool {
    SUPPORTED_EVENTS.contains(&name)
}

#[derive(Debug, Deserialize)]
struct PullRequestEvent {
    pull_request: PullRequestPayload,
    #[serde(default)]
    repository: Option<RepositoryPayload>,
}

#[derive(Debug, Deserialize)]
struct PullRequestPayload {
    /// Labels are objects in webhook payloads; bare strings are tolerated and skipped
    #[serde(default)]
    labels: Option<Vec<LabelPayload>>,
    head: HeadPayload,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LabelPayload {
    Object { name: String },
    Other(serde_json::Value),
}

#[derive(Debug, Deserialize)]
struct HeadPayload {
    #[serde(rename = "ref")]
    reference: String,
}

#[derive(Debug, Deserialize)]
struct RepositoryPayload {
    name: String,
    owner: OwnerPayload,
}

#[derive(Debug, Deserialize)]
struct OwnerPayload {
    login: String,
}

impl PullRequestContext {
    /// Parse a pull request event payload.
    ///
    /// `repository` overrides the payload's repository (e.g. from
    /// `GITHUB_REPOSITORY`); one of the two must be present.
    pub fn from_event_json(json: &str, repository: Option<RepoInfo>) -> Result<Self> {
        let event: PullRequestEvent = serde_json::from_str(json)
            .map_err(|e| Error::EventParse(format!("not a pull request event: {}", e)))?;

        let repo = repository
            .or_else(|| {
                event
                    .repository
                    .map(|r| RepoInfo::new(r.owner.login, r.name))
            })
            .ok_or_else(|| {
                Error::Config("repository is neither in the event nor configured".to_string())
            })?;

        let labels = event
            .pull_request
            .labels
            .unwrap_or_default()
            .into_iter()
            .filter_map(|label| match label {
                LabelPayload::Object { name } => Some(name),
                LabelPayload::Other(_) => None,
            })
            .collect();

        Ok(Self {
            repo,
            labels,
            head_ref: event.pull_request.head.reference,
        })
    }

    /// Read and parse the payload file at `path`
    pub fn from_event_file(path: &Path, repository: Option<RepoInfo>) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            Error::EventParse(format!("cannot read event file {}: {}", path.display(), e))
        })?;
        Self::from_event_json(&json, repository)
    }
}
