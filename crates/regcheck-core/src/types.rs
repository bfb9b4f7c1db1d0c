//! Core type definitions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default head-branch prefix linking a pull request to its registration issue
pub const BRANCH_NAME_PREFIX: &str = "issue-";

/// Kind of extension being registered
///
/// Serializes as the label name the registry repository uses for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ExtensionType {
    /// Chat bot built on the framework
    Bot,
    /// Protocol adapter
    Adapter,
    /// Plugin package
    Plugin,
}

impl ExtensionType {
    /// All variants in label-matching order
    pub const ALL: [ExtensionType; 3] = [Self::Bot, Self::Adapter, Self::Plugin];

    /// Pull request label name for this type
    #[inline]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Bot => "Bot",
            Self::Adapter => "Adapter",
            Self::Plugin => "Plugin",
        }
    }

    /// Parse from an exact label name
    #[inline]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Bot" => Some(Self::Bot),
            "Adapter" => Some(Self::Adapter),
            "Plugin" => Some(Self::Plugin),
            _ => None,
        }
    }
}

impl fmt::Display for ExtensionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Positive issue number in the registry repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct IssueNumber(u64);

impl IssueNumber {
    /// Wrap a raw number; zero is not a valid issue number.
    #[inline]
    pub const fn new(value: u64) -> Option<Self> {
        if value == 0 {
            None
        } else {
            Some(Self(value))
        }
    }

    /// Raw value for API paths and outputs
    #[inline]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for IssueNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Repository coordinates for API calls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoInfo {
    /// Owner (user or organization) login
    pub owner: String,
    /// Repository name
    pub repo: String,
}

impl RepoInfo {
    /// Create from owner and repository name
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// Parse the `owner/repo` form used by `GITHUB_REPOSITORY`
    pub fn parse(full_name: &str) -> Option<Self> {
        let (owner, repo) = full_name.split_once('/')?;
        if owner.is_empty() || repo.is_empty() || repo.contains('/') {
            return None;
        }
        Some(Self::new(owner, repo))
    }
}

impl fmt::Display for RepoInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Snapshot of the triggering pull request
///
/// Built once at the entry point and passed by reference to every component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestContext {
    /// Repository the pull request (and its linked issue) lives in
    pub repo: RepoInfo,
    /// Label names attached to the pull request, in payload order
    pub labels: Vec<String>,
    /// Head branch name
    pub head_ref: String,
}

/// Author of an issue as returned by the issues API
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct IssueUser {
    /// Login name
    #[serde(default)]
    pub login: String,
}

/// Registration issue as returned by `GET /repos/{owner}/{repo}/issues/{n}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Issue {
    /// Issue number
    pub number: u64,
    /// Issue title
    #[serde(default)]
    pub title: String,
    /// Body text (null for an empty issue)
    #[serde(default)]
    pub body: Option<String>,
    /// Author (null for deleted accounts)
    #[serde(default)]
    pub user: Option<IssueUser>,
    /// `open` or `closed`
    #[serde(default)]
    pub state: String,
}

impl Issue {
    /// Body text, empty when absent
    #[inline]
    pub fn body_text(&self) -> &str {
        self.body.as_deref().unwrap_or("")
    }

    /// Author login, empty when absent
    #[inline]
    pub fn author_login(&self) -> &str {
        self.user.as_ref().map(|u| u.login.as_str()).unwrap_or("")
    }
}

/// Metadata extracted from a bot registration issue
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BotInfo {
    /// Display name
    pub name: String,
    /// Issue author login
    pub author: String,
    /// Short description
    pub description: Option<String>,
    /// Project homepage URL
    pub homepage: Option<String>,
    /// Store tags
    pub tags: Vec<String>,
}

/// Metadata extracted from an adapter registration issue
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AdapterInfo {
    /// Display name
    pub name: String,
    /// Issue author login
    pub author: String,
    /// Short description
    pub description: Option<String>,
    /// Package index project name
    pub project_link: Option<String>,
    /// Import module name
    pub module_name: Option<String>,
    /// Project homepage URL
    pub homepage: Option<String>,
    /// Store tags
    pub tags: Vec<String>,
}

/// Metadata extracted from a plugin registration issue
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PluginInfo {
    /// Display name
    pub name: String,
    /// Issue author login
    pub author: String,
    /// Short description
    pub description: Option<String>,
    /// Package index project name
    pub project_link: Option<String>,
    /// Import module name
    pub module_name: Option<String>,
    /// Project homepage URL
    pub homepage: Option<String>,
    /// Store tags
    pub tags: Vec<String>,
    /// Contents of the fenced configuration block, if any
    pub config: Option<String>,
}

/// Typed registration record, one variant per [`ExtensionType`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum RegistrationRecord {
    /// Bot registration
    Bot(BotInfo),
    /// Adapter registration
    Adapter(AdapterInfo),
    /// Plugin registration
    Plugin(PluginInfo),
}

impl RegistrationRecord {
    /// Discriminant; always the type the record was extracted for
    #[inline]
    pub const fn extension_type(&self) -> ExtensionType {
        match self {
            Self::Bot(_) => ExtensionType::Bot,
            Self::Adapter(_) => ExtensionType::Adapter,
            Self::Plugin(_) => ExtensionType::Plugin,
        }
    }

    /// Extension display name (may be empty)
    #[inline]
    pub fn name(&self) -> &str {
        match self {
            Self::Bot(info) => &info.name,
            Self::Adapter(info) => &info.name,
            Self::Plugin(info) => &info.name,
        }
    }

    /// Issue author login (may be empty)
    #[inline]
    pub fn author(&self) -> &str {
        match self {
            Self::Bot(info) => &info.author,
            Self::Adapter(info) => &info.author,
            Self::Plugin(info) => &info.author,
        }
    }
}

/// Settings for a single check run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckSettings {
    /// Head-branch prefix preceding the issue number
    pub branch_prefix: String,
}

impl Default for CheckSettings {
    fn default() -> Self {
        Self {
            branch_prefix: BRANCH_NAME_PREFIX.to_string(),
        }
    }
}

/// Successful end state of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The event is unrelated to the registration workflow
    Skipped {
        /// Human-readable reason
        reason: String,
    },
    /// A validator ran against the linked issue
    Validated {
        /// Type selected from the pull request labels
        extension_type: ExtensionType,
        /// Linked registration issue
        issue_number: IssueNumber,
        /// Extracted extension name
        name: String,
        /// Whether a comment was posted to the issue
        commented: bool,
    },
}

impl RunOutcome {
    /// Short machine-readable result name
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Skipped { .. } => "skipped",
            Self::Validated { .. } => "validated",
        }
    }
}
