//! Per-type registration validators
//!
//! Bot and adapter registrations have no checks yet; their validators only
//! record that they ran. The plugin validator acknowledges the registration
//! with a comment on the issue. New checks slot in behind the same
//! [`Validator`] interface without touching the dispatcher.

use std::future::Future;

use super::comment::publish_comment;
use crate::error::Result;
use crate::traits::IssueApi;
use crate::types::{AdapterInfo, BotInfo, IssueNumber, PluginInfo, RepoInfo};

/// Acknowledgement posted for plugin registrations; `{name}` is the plugin name
pub const PLUGIN_ACK_TEMPLATE: &str =
    "Thanks for registering the plugin **{name}**! The registration has been received and will be checked.";

/// Everything a validator may need besides the record itself
#[derive(Debug)]
pub struct ValidationContext<'a, A> {
    /// Issue-tracker handle
    pub api: &'a A,
    /// Repository holding the registration issue
    pub repo: &'a RepoInfo,
    /// Registration issue resolved from the head branch
    pub issue_number: IssueNumber,
}

/// Type-specific validation step
pub trait Validator {
    /// Record variant this validator accepts
    type Info;

    /// Validate a registration; resolves to `true` if a comment was posted.
    fn validate<'a, A>(
        &'a self,
        ctx: &'a ValidationContext<'a, A>,
        info: &'a Self::Info,
    ) -> impl Future<Output = Result<bool>> + Send + 'a
    where
        A: IssueApi + Sync + 'a;
}

/// Bot registrations
#[derive(Debug, Default, Clone, Copy)]
pub struct BotValidator;

impl Validator for BotValidator {
    type Info = BotInfo;

    fn validate<'a, A>(
        &'a self,
        ctx: &'a ValidationContext<'a, A>,
        info: &'a BotInfo,
    ) -> impl Future<Output = Result<bool>> + Send + 'a
    where
        A: IssueApi + Sync + 'a,
    {
        async move {
            tracing::info!(issue = %ctx.issue_number, name = %info.name, "bot registration received");
            Ok(false)
        }
    }
}

/// Adapter registrations
#[derive(Debug, Default, Clone, Copy)]
pub struct AdapterValidator;

impl Validator for AdapterValidator {
    type Info = AdapterInfo;

    fn validate<'a, A>(
        &'a self,
        ctx: &'a ValidationContext<'a, A>,
        info: &'a AdapterInfo,
    ) -> impl Future<Output = Result<bool>> + Send + 'a
    where
        A: IssueApi + Sync + 'a,
    {
        async move {
            tracing::info!(issue = %ctx.issue_number, name = %info.name, "adapter registration received");
            Ok(false)
        }
    }
}

/// Plugin registrations
#[derive(Debug, Default, Clone, Copy)]
pub struct PluginValidator;

impl Validator for PluginValidator {
    type Info = PluginInfo;

    fn validate<'a, A>(
        &'a self,
        ctx: &'a ValidationContext<'a, A>,
        info: &'a PluginInfo,
    ) -> impl Future<Output = Result<bool>> + Send + 'a
    where
        A: IssueApi + Sync + 'a,
    {
        async move {
            let text = render_plugin_ack(&info.name);
            publish_comment(ctx.api, ctx.repo, ctx.issue_number, &text).await?;
            Ok(true)
        }
    }
}

/// Fill [`PLUGIN_ACK_TEMPLATE`] with the plugin name
pub fn render_plugin_ack(name: &str) -> String {
    PLUGIN_ACK_TEMPLATE.replace("{name}", name)
}
