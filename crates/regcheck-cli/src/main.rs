#[cfg(target_env = "musl")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::Context;
use clap::Parser;
use regcheck_core::event::is_supported_event;
use regcheck_core::http::DEFAULT_API_URL;
use regcheck_core::output::{OutputWriter, Report};
use regcheck_core::{
    CheckSettings, GitHubApiClient, PullRequestContext, RepoInfo, RunOutcome, BRANCH_NAME_PREFIX,
};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "regcheck", version, about = "Extension registration pull request checks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Check the pull request that triggered this workflow
    Check(CheckArgs),
}

#[derive(clap::Args)]
struct CheckArgs {
    /// Path to the webhook event payload
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    event_path: Option<PathBuf>,

    /// Name of the triggering event
    #[arg(long, env = "GITHUB_EVENT_NAME")]
    event_name: Option<String>,

    /// GitHub token for API access
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// GitHub REST API base URL
    #[arg(long, env = "GITHUB_API_URL")]
    api_url: Option<String>,

    /// Repository as owner/repo (default: from the event payload)
    #[arg(long, env = "GITHUB_REPOSITORY")]
    repository: Option<String>,

    /// Head branch prefix preceding the issue number
    #[arg(long, env = "REGCHECK_BRANCH_PREFIX")]
    branch_prefix: Option<String>,

    /// Output format: gha, json, text (default: auto-detect)
    #[arg(long, env = "REGCHECK_OUTPUT_FORMAT")]
    output_format: Option<String>,
}

/// Output format for the CLI
enum OutputFormat {
    /// GitHub Actions: write to $GITHUB_OUTPUT + workflow command to stdout
    Gha,
    /// Full JSON to stdout
    Json,
    /// Human-readable text to stdout
    Text,
}

impl OutputFormat {
    fn detect(explicit: Option<&str>) -> Self {
        match explicit {
            Some("gha") => OutputFormat::Gha,
            Some("json") => OutputFormat::Json,
            Some("text") => OutputFormat::Text,
            _ => {
                if std::env::var("GITHUB_ACTIONS").is_ok() {
                    OutputFormat::Gha
                } else {
                    OutputFormat::Text
                }
            }
        }
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let code = match cli.command {
        Commands::Check(args) => run_check(args),
    };
    std::process::exit(code);
}

/// Logs go to stderr so stdout stays clean for workflow commands and JSON.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("REGCHECK_LOG_JSON").is_ok_and(|v| !v.is_empty());

    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Filter empty string from Option (env vars may produce "" for empty values)
fn clean_opt(v: &Option<String>) -> Option<&str> {
    v.as_deref().filter(|s| !s.is_empty())
}

fn run_check(args: CheckArgs) -> i32 {
    let output_format = OutputFormat::detect(clean_opt(&args.output_format));

    let result = execute(&args).map_err(|e| match e.downcast::<regcheck_core::Error>() {
        Ok(err) => err,
        Err(other) => regcheck_core::Error::Other(format!("{other:#}")),
    });
    if let Err(ref e) = result {
        tracing::error!("{e}");
    }
    let report = Report::from_result(&result);

    match output_format {
        OutputFormat::Gha => write_gha_output(&report),
        OutputFormat::Json => write_json_output(&report),
        OutputFormat::Text => write_text_output(&report),
    }

    report.exit_code()
}

/// Build the run inputs and drive the dispatcher on a current-thread runtime
fn execute(args: &CheckArgs) -> anyhow::Result<RunOutcome> {
    let event_name = clean_opt(&args.event_name).unwrap_or("pull_request");
    if !is_supported_event(event_name) {
        tracing::info!(event_name, "unsupported event, skipped");
        return Ok(RunOutcome::Skipped {
            reason: format!("unsupported event '{event_name}', skipped"),
        });
    }

    let event_path = args
        .event_path
        .as_deref()
        .filter(|p| !p.as_os_str().is_empty())
        .context("GITHUB_EVENT_PATH not set; pass --event-path")?;

    let repository = clean_opt(&args.repository)
        .map(|s| {
            RepoInfo::parse(s).ok_or_else(|| {
                regcheck_core::Error::Config(format!("Invalid repository format: {s}"))
            })
        })
        .transpose()?;

    let ctx = PullRequestContext::from_event_file(event_path, repository)?;

    let settings = CheckSettings {
        branch_prefix: clean_opt(&args.branch_prefix)
            .unwrap_or(BRANCH_NAME_PREFIX)
            .to_string(),
    };

    let api = GitHubApiClient::new(
        clean_opt(&args.api_url).unwrap_or(DEFAULT_API_URL).to_string(),
        clean_opt(&args.token).map(str::to_string),
    );

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to create runtime")?;

    Ok(rt.block_on(regcheck_core::check(&api, &ctx, &settings))?)
}

/// Write outputs to $GITHUB_OUTPUT, the job summary, and a workflow command to stdout
fn write_gha_output(report: &Report) {
    match std::env::var_os("GITHUB_OUTPUT") {
        Some(path) => {
            if let Err(e) = OutputWriter::write_outputs(Path::new(&path), &report.output_pairs()) {
                tracing::warn!("cannot write GITHUB_OUTPUT: {e}");
            }
        }
        None => tracing::warn!("GITHUB_OUTPUT not set, outputs not recorded"),
    }

    if let Some(path) = std::env::var_os("GITHUB_STEP_SUMMARY") {
        if let Err(e) = OutputWriter::append_summary(Path::new(&path), &report.summary_line()) {
            tracing::warn!("cannot write GITHUB_STEP_SUMMARY: {e}");
        }
    }

    let stdout = std::io::stdout();
    let mut w = stdout.lock();
    let _ = writeln!(w, "{}", report.workflow_command());
}

/// Write full JSON output to stdout
fn write_json_output(report: &Report) {
    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    let _ = serde_json::to_writer(&mut lock, &report.to_json());
    let _ = writeln!(lock);
}

/// Write human-readable text to stdout
fn write_text_output(report: &Report) {
    let stdout = std::io::stdout();
    let mut w = stdout.lock();

    let _ = writeln!(w, "Registration Check");
    let _ = writeln!(w, "==================");
    let _ = writeln!(w, "Result: {}", report.result);
    let _ = writeln!(w, "Message: {}", report.message);
    if let Some(ty) = report.extension_type {
        let _ = writeln!(w, "Type: {ty}");
    }
    if let Some(n) = report.issue_number {
        let _ = writeln!(w, "Issue: {n}");
    }
    if let Some(ref name) = report.name {
        let _ = writeln!(w, "Name: {name}");
    }
    let _ = writeln!(w, "Commented: {}", report.commented);
}
