//! Per-file outcomes and the summary of one create or delete run.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::domain::entities::render_context::RenderContext;

/// What happened to one file during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "reason", rename_all = "snake_case")]
pub enum FileOutcome {
    Written,
    /// The destination existed and the user answered `n`.
    Declined,
    Deleted,
    Failed(String),
}

impl FileOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Outcome for one resolved destination path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    #[serde(flatten)]
    pub outcome: FileOutcome,
}

impl FileReport {
    pub fn new(path: impl Into<PathBuf>, outcome: FileOutcome) -> Self {
        Self {
            path: path.into(),
            outcome,
        }
    }
}

/// Success report for one create or delete run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandResult {
    pub template: String,
    pub bindings: RenderContext,
    pub files: Vec<FileReport>,
    pub notice: Option<String>,
    pub message: String,
}

impl CommandResult {
    pub fn new(
        template: impl Into<String>,
        bindings: RenderContext,
        files: Vec<FileReport>,
        notice: Option<String>,
    ) -> Self {
        let template = template.into();
        let message = summarize(&template, &bindings, &files, notice.as_deref());
        Self {
            template,
            bindings,
            files,
            notice,
            message,
        }
    }

    pub fn written(&self) -> impl Iterator<Item = &FileReport> {
        self.with_outcome(|o| matches!(o, FileOutcome::Written))
    }

    pub fn deleted(&self) -> impl Iterator<Item = &FileReport> {
        self.with_outcome(|o| matches!(o, FileOutcome::Deleted))
    }

    pub fn failed(&self) -> impl Iterator<Item = &FileReport> {
        self.with_outcome(FileOutcome::is_failure)
    }

    pub fn has_failures(&self) -> bool {
        self.failed().next().is_some()
    }

    fn with_outcome(&self, pred: fn(&FileOutcome) -> bool) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(move |f| pred(&f.outcome))
    }
}

impl fmt::Display for CommandResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

fn summarize(
    template: &str,
    bindings: &RenderContext,
    files: &[FileReport],
    notice: Option<&str>,
) -> String {
    let mut out = format!("Template: {template}\n");

    if !bindings.is_empty() {
        out.push_str("Arguments:\n");
        for line in bindings.describe() {
            out.push_str(&format!("  {line}\n"));
        }
    }

    let section = |out: &mut String, title: &str, pick: fn(&FileOutcome) -> bool| {
        let matching: Vec<_> = files.iter().filter(|f| pick(&f.outcome)).collect();
        if matching.is_empty() {
            return;
        }
        out.push_str(title);
        out.push('\n');
        for report in matching {
            match &report.outcome {
                FileOutcome::Failed(reason) => {
                    out.push_str(&format!("  {}: {}\n", report.path.display(), reason))
                }
                _ => out.push_str(&format!("  {}\n", report.path.display())),
            }
        }
    };

    section(&mut out, "Files written:", |o| matches!(o, FileOutcome::Written));
    section(&mut out, "Files deleted:", |o| matches!(o, FileOutcome::Deleted));
    section(&mut out, "Not overwritten:", |o| {
        matches!(o, FileOutcome::Declined)
    });
    section(&mut out, "Failed:", FileOutcome::is_failure);

    if files
        .iter()
        .all(|f| !matches!(f.outcome, FileOutcome::Written | FileOutcome::Deleted))
    {
        out.push_str("No files changed\n");
    }

    if let Some(notice) = notice {
        out.push('\n');
        out.push_str(notice);
        out.push('\n');
    }

    out
}
