//! Flattened view of a run result for the output formats

use crate::error::Result;
use crate::types::{ExtensionType, IssueNumber, RunOutcome};

/// What a run reports to the host environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// `skipped`, `validated`, or `failed`
    pub result: &'static str,
    /// Human-readable explanation
    pub message: String,
    /// Extension type, when a validator ran
    pub extension_type: Option<ExtensionType>,
    /// Linked issue, when a validator ran
    pub issue_number: Option<IssueNumber>,
    /// Extracted name, when a validator ran
    pub name: Option<String>,
    /// Whether a comment was posted
    pub commented: bool,
}

impl Report {
    /// Build from the dispatcher's result
    pub fn from_result(result: &Result<RunOutcome>) -> Self {
        match result {
            Ok(RunOutcome::Skipped { reason }) => Self {
                result: "skipped",
                message: reason.clone(),
                extension_type: None,
                issue_number: None,
                name: None,
                commented: false,
            },
            Ok(RunOutcome::Validated {
                extension_type,
                issue_number,
                name,
                commented,
            }) => Self {
                result: "validated",
                message: format!("{} registration {} checked", extension_type, issue_number),
                extension_type: Some(*extension_type),
                issue_number: Some(*issue_number),
                name: Some(name.clone()),
                commented: *commented,
            },
            Err(e) => Self {
                result: "failed",
                message: e.to_string(),
                extension_type: None,
                issue_number: None,
                name: None,
                commented: false,
            },
        }
    }

    /// Whether the host should treat the run as failed
    #[inline]
    pub fn is_failure(&self) -> bool {
        self.result == "failed"
    }

    /// Process exit code: 0 for skipped or validated, 1 for failed
    #[inline]
    pub fn exit_code(&self) -> i32 {
        i32::from(self.is_failure())
    }

    /// Step output name/value pairs
    pub fn output_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("result", self.result.to_string()),
            ("message", self.message.clone()),
        ];
        if let Some(ty) = self.extension_type {
            pairs.push(("type", ty.label().to_string()));
        }
        if let Some(n) = self.issue_number {
            pairs.push(("issue_number", n.get().to_string()));
        }
        if let Some(ref name) = self.name {
            pairs.push(("name", name.clone()));
        }
        pairs.push(("commented", self.commented.to_string()));
        pairs
    }

    /// One markdown line for the job summary
    pub fn summary_line(&self) -> String {
        match (self.extension_type, self.issue_number, &self.name) {
            (Some(ty), Some(n), Some(name)) => format!(
                "Registration check: **{}** `{}` ({}): {}",
                ty,
                if name.is_empty() { "<unnamed>" } else { name },
                n,
                self.result
            ),
            _ => format!("Registration check {}: {}", self.result, self.message),
        }
    }

    /// Workflow command for the job log (`::notice::` or `::error::`)
    pub fn workflow_command(&self) -> String {
        let level = if self.is_failure() { "error" } else { "notice" };
        format!("::{}::{}", level, super::safe_output_escape(&self.message))
    }

    /// Full JSON object
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "result": self.result,
            "message": self.message,
            "type": self.extension_type,
            "issue_number": self.issue_number,
            "name": self.name,
            "commented": self.commented,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn validated() -> Result<RunOutcome> {
        Ok(RunOutcome::Validated {
            extension_type: ExtensionType::Plugin,
            issue_number: IssueNumber::new(42).unwrap(),
            name: "echo-plugin".to_string(),
            commented: true,
        })
    }

    #[test]
    fn test_validated_report() {
        let report = Report::from_result(&validated());
        assert_eq!(report.result, "validated");
        assert_eq!(report.exit_code(), 0);
        let pairs = report.output_pairs();
        assert!(pairs.contains(&("type", "Plugin".to_string())));
        assert!(pairs.contains(&("issue_number", "42".to_string())));
        assert!(pairs.contains(&("name", "echo-plugin".to_string())));
        assert!(pairs.contains(&("commented", "true".to_string())));
        assert!(report.summary_line().contains("`echo-plugin`"));
        assert!(report.workflow_command().starts_with("::notice::"));
    }

    #[test]
    fn test_skipped_report() {
        let result = Ok(RunOutcome::Skipped {
            reason: "unrelated".to_string(),
        });
        let report = Report::from_result(&result);
        assert_eq!(report.result, "skipped");
        assert_eq!(report.exit_code(), 0);
        assert_eq!(report.output_pairs().len(), 3);
        assert_eq!(report.workflow_command(), "::notice::unrelated");
    }

    #[test]
    fn test_failed_report() {
        let result = Err(Error::IssueNotResolved("branch 'main'".to_string()));
        let report = Report::from_result(&result);
        assert!(report.is_failure());
        assert_eq!(report.exit_code(), 1);
        assert!(report.message.contains("cannot resolve linked issue"));
        assert!(report.workflow_command().starts_with("::error::cannot resolve linked issue"));
    }

    #[test]
    fn test_json_shape() {
        let json = Report::from_result(&validated()).to_json();
        assert_eq!(json["result"], "validated");
        assert_eq!(json["type"], "Plugin");
        assert_eq!(json["issue_number"], 42);
        assert_eq!(json["name"], "echo-plugin");

        let json = Report::from_result(&Ok(RunOutcome::Skipped { reason: "x".into() })).to_json();
        assert!(json["type"].is_null());
        assert!(json["issue_number"].is_null());
    }
}
