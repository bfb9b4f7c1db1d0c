//! GitHub Actions file-command writer
//!
//! Outputs go to `$GITHUB_OUTPUT` and the job summary to
//! `$GITHUB_STEP_SUMMARY`; both files are appended to, never truncated, since
//! earlier steps in the job may have written to them.

use crate::error::Result;
use std::borrow::Cow;
use std::io::Write;
use std::path::Path;

const DELIMITER: &str = "REGCHECK_EOF";

/// Escape for workflow commands and single-line outputs (percent-encoding special chars)
pub fn safe_output_escape(s: &str) -> String {
    s.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Delimiter that no line of `value` equals
fn delimiter_for(value: &str) -> Cow<'static, str> {
    let collides = |candidate: &str| value.lines().any(|line| line == candidate);
    if !collides(DELIMITER) {
        return Cow::Borrowed(DELIMITER);
    }
    (1usize..)
        .map(|n| format!("{DELIMITER}_{n}"))
        .find(|candidate| !collides(candidate.as_str()))
        .map(Cow::Owned)
        .unwrap_or(Cow::Borrowed(DELIMITER))
}

/// Appends step outputs and summaries
pub struct OutputWriter;

impl OutputWriter {
    /// Append `name<<DELIM` blocks for each pair to the output file.
    ///
    /// Values are written verbatim; the runner does not decode anything
    /// inside a delimited block.
    pub fn write_outputs(path: &Path, pairs: &[(&str, String)]) -> Result<()> {
        let mut f = std::fs::OpenOptions::new()
            .append(true)
            .create(true)
            .open(path)?;

        for (name, value) in pairs {
            let delimiter = delimiter_for(value);
            writeln!(f, "{name}<<{delimiter}")?;
            writeln!(f, "{value}")?;
            writeln!(f, "{delimiter}")?;
        }
        Ok(())
    }

    /// Append one markdown line to the job summary
    pub fn append_summary(path: &Path, line: &str) -> Result<()> {
        let mut f = std::fs::OpenOptions::new()
            .append(true)
            .create(true)
            .open(path)?;
        writeln!(f, "{line}")?;
        Ok(())
    }
}
