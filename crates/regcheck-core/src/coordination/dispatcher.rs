//! Dispatcher: the linear check run for one pull request event

use super::validators::{
    AdapterValidator, BotValidator, PluginValidator, ValidationContext, Validator,
};
use crate::classify::{classify_labels, extract_issue_number_from_ref};
use crate::error::{Error, Result};
use crate::extract::extract_info;
use crate::traits::IssueApi;
use crate::types::{CheckSettings, PullRequestContext, RegistrationRecord, RunOutcome};

/// Reason reported when no label names an extension type
pub const SKIP_UNRELATED: &str = "pull request unrelated to the registration workflow, skipped";

/// Run the check for one pull request.
///
/// Steps, in order: classify labels (no match ends the run as
/// [`RunOutcome::Skipped`] with no network calls), resolve the issue number
/// from the head branch (failure is [`Error::IssueNotResolved`], again before
/// any call), fetch the issue once, extract the record, then run exactly one
/// validator.
#[tracing::instrument(skip_all, fields(repo = %ctx.repo, head_ref = %ctx.head_ref))]
pub async fn check<A>(api: &A, ctx: &PullRequestContext, settings: &CheckSettings) -> Result<RunOutcome>
where
    A: IssueApi + Sync,
{
    let Some(extension_type) = classify_labels(&ctx.labels) else {
        tracing::info!(labels = ?ctx.labels, "{}", SKIP_UNRELATED);
        return Ok(RunOutcome::Skipped {
            reason: SKIP_UNRELATED.to_string(),
        });
    };

    let issue_number = extract_issue_number_from_ref(&ctx.head_ref, &settings.branch_prefix)
        .ok_or_else(|| {
            Error::IssueNotResolved(format!(
                "branch '{}' does not match '{}<number>'",
                ctx.head_ref, settings.branch_prefix
            ))
        })?;

    tracing::info!(%extension_type, issue = %issue_number, "checking registration");

    let issue = api.get_issue(&ctx.repo, issue_number).await?;
    let record = extract_info(extension_type, issue.body_text(), issue.author_login());

    if record.name().is_empty() {
        tracing::warn!(issue = %issue_number, "registration issue has no recognizable name");
    }

    let vctx = ValidationContext {
        api,
        repo: &ctx.repo,
        issue_number,
    };

    let commented = match &record {
        RegistrationRecord::Bot(info) => BotValidator.validate(&vctx, info).await?,
        RegistrationRecord::Adapter(info) => AdapterValidator.validate(&vctx, info).await?,
        RegistrationRecord::Plugin(info) => PluginValidator.validate(&vctx, info).await?,
    };

    Ok(RunOutcome::Validated {
        extension_type: record.extension_type(),
        issue_number,
        name: record.name().to_string(),
        commented,
    })
}
