//! End-to-end tests for the check run against an in-memory issue tracker

use assert_matches::assert_matches;
use regcheck_core::{
    check, check_sync, CheckSettings, Error, ExtensionType, Issue, IssueApi, IssueNumber,
    PullRequestContext, RepoInfo, Result, RunOutcome,
};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    GetIssue(u64),
    CreateComment(u64, String),
}

/// Records every call; serves issues from a map
#[derive(Default)]
struct FakeIssueApi {
    issues: HashMap<u64, Issue>,
    fail_comments: bool,
    calls: Mutex<Vec<Call>>,
}

impl FakeIssueApi {
    fn with_issue(number: u64, body: Option<&str>, author: Option<&str>) -> Self {
        let issue: Issue = serde_json::from_value(serde_json::json!({
            "number": number,
            "title": "Registration",
            "body": body,
            "user": author.map(|login| serde_json::json!({ "login": login })),
            "state": "open",
        }))
        .unwrap();

        let mut api = Self::default();
        api.issues.insert(number, issue);
        api
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

impl IssueApi for FakeIssueApi {
    fn get_issue<'a>(
        &'a self,
        _repo: &'a RepoInfo,
        number: IssueNumber,
    ) -> impl Future<Output = Result<Issue>> + Send + 'a {
        async move {
            self.calls.lock().unwrap().push(Call::GetIssue(number.get()));
            self.issues
                .get(&number.get())
                .cloned()
                .ok_or_else(|| Error::IssueNotFound(format!("issue {}", number)))
        }
    }

    fn create_comment<'a>(
        &'a self,
        _repo: &'a RepoInfo,
        number: IssueNumber,
        body: &'a str,
    ) -> impl Future<Output = Result<()>> + Send + 'a {
        async move {
            self.calls
                .lock()
                .unwrap()
                .push(Call::CreateComment(number.get(), body.to_string()));
            if self.fail_comments {
                return Err(Error::Http("GitHub API returned 502 Bad Gateway".into()));
            }
            Ok(())
        }
    }
}

fn context(labels: &[&str], head_ref: &str) -> PullRequestContext {
    PullRequestContext {
        repo: RepoInfo::new("org", "registry"),
        labels: labels.iter().map(|s| s.to_string()).collect(),
        head_ref: head_ref.to_string(),
    }
}

fn form_body(name: &str) -> String {
    format!("### Name\n\n{name}\n\n### Description\n\nSomething useful\n\n### Homepage\n\nhttps://example.com\n")
}

#[tokio::test]
async fn test_plugin_registration_comments_on_issue() {
    let body = form_body("echo-plugin");
    let api = FakeIssueApi::with_issue(42, Some(&body), Some("alice"));
    let ctx = context(&["Plugin"], "issue-42");

    let outcome = check(&api, &ctx, &CheckSettings::default()).await.unwrap();

    assert_eq!(
        outcome,
        RunOutcome::Validated {
            extension_type: ExtensionType::Plugin,
            issue_number: IssueNumber::new(42).unwrap(),
            name: "echo-plugin".to_string(),
            commented: true,
        }
    );

    let calls = api.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], Call::GetIssue(42));
    assert_matches!(&calls[1], Call::CreateComment(42, text) if text.contains("echo-plugin"));
}

#[tokio::test]
async fn test_bot_registration_posts_nothing() {
    let body = form_body("weatherbot");
    let api = FakeIssueApi::with_issue(7, Some(&body), Some("bob"));
    let ctx = context(&["Bot"], "issue-7");

    let outcome = check(&api, &ctx, &CheckSettings::default()).await.unwrap();

    assert_matches!(
        outcome,
        RunOutcome::Validated { extension_type: ExtensionType::Bot, ref name, commented: false, .. }
            if name == "weatherbot"
    );
    assert_eq!(api.calls(), vec![Call::GetIssue(7)]);
}

#[tokio::test]
async fn test_adapter_registration_posts_nothing() {
    let body = form_body("OneBot");
    let api = FakeIssueApi::with_issue(3, Some(&body), None);
    let ctx = context(&["Publish", "Adapter"], "refs/heads/issue-3");

    let outcome = check(&api, &ctx, &CheckSettings::default()).await.unwrap();

    assert_matches!(
        outcome,
        RunOutcome::Validated { extension_type: ExtensionType::Adapter, commented: false, .. }
    );
    assert_eq!(api.calls(), vec![Call::GetIssue(3)]);
}

#[tokio::test]
async fn test_unlabelled_pull_request_skipped_without_calls() {
    let api = FakeIssueApi::default();
    let ctx = context(&[], "issue-42");

    let outcome = check(&api, &ctx, &CheckSettings::default()).await.unwrap();

    assert_matches!(outcome, RunOutcome::Skipped { ref reason } if reason.contains("skipped"));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_unrelated_labels_skipped_without_calls() {
    let api = FakeIssueApi::default();
    let ctx = context(&["documentation", "Publish"], "issue-42");

    let outcome = check(&api, &ctx, &CheckSettings::default()).await.unwrap();

    assert_eq!(outcome.as_str(), "skipped");
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_unresolvable_branch_fails_before_fetch() {
    let api = FakeIssueApi::default();
    let ctx = context(&["Adapter"], "not-an-issue-branch");

    let err = check(&api, &ctx, &CheckSettings::default()).await.unwrap_err();

    assert_matches!(err, Error::IssueNotResolved(_));
    assert!(err.to_string().contains("cannot resolve linked issue"));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_missing_issue_propagates() {
    let api = FakeIssueApi::default();
    let ctx = context(&["Plugin"], "issue-99");

    let err = check(&api, &ctx, &CheckSettings::default()).await.unwrap_err();

    assert_matches!(err, Error::IssueNotFound(_));
    assert_eq!(api.calls(), vec![Call::GetIssue(99)]);
}

#[tokio::test]
async fn test_comment_failure_propagates() {
    let body = form_body("echo-plugin");
    let mut api = FakeIssueApi::with_issue(42, Some(&body), Some("alice"));
    api.fail_comments = true;
    let ctx = context(&["Plugin"], "issue-42");

    let err = check(&api, &ctx, &CheckSettings::default()).await.unwrap_err();

    assert_matches!(err, Error::Http(_));
    assert_eq!(api.calls().len(), 2);
}

#[tokio::test]
async fn test_empty_issue_still_dispatched() {
    let api = FakeIssueApi::with_issue(5, None, None);
    let ctx = context(&["Plugin"], "issue-5");

    let outcome = check(&api, &ctx, &CheckSettings::default()).await.unwrap();

    assert_matches!(
        outcome,
        RunOutcome::Validated { ref name, commented: true, .. } if name.is_empty()
    );
}

#[tokio::test]
async fn test_custom_branch_prefix() {
    let body = form_body("echo-plugin");
    let api = FakeIssueApi::with_issue(76, Some(&body), Some("alice"));
    let ctx = context(&["Plugin"], "publish/issue76");
    let settings = CheckSettings {
        branch_prefix: "publish/issue".to_string(),
    };

    let outcome = check(&api, &ctx, &settings).await.unwrap();

    assert_eq!(outcome.as_str(), "validated");
    assert_eq!(api.calls()[0], Call::GetIssue(76));
}

#[test]
fn test_check_sync() {
    let body = form_body("weatherbot");
    let api = FakeIssueApi::with_issue(7, Some(&body), Some("bob"));
    let ctx = context(&["Bot"], "issue-7");

    let outcome = check_sync(&api, &ctx, &CheckSettings::default()).unwrap();

    assert_eq!(outcome.as_str(), "validated");
}

#[test]
fn test_event_file_to_outcome() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("event.json");
    std::fs::write(
        &path,
        r#"{"pull_request": {"labels": [], "head": {"ref": "issue-1"}},
            "repository": {"name": "registry", "owner": {"login": "org"}}}"#,
    )
    .unwrap();

    let ctx = PullRequestContext::from_event_file(&path, None).unwrap();
    let api = FakeIssueApi::default();
    let outcome = check_sync(&api, &ctx, &CheckSettings::default()).unwrap();

    assert_eq!(outcome.as_str(), "skipped");
    assert!(api.calls().is_empty());
}
