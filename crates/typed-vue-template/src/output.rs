//! Per-file reports.

use camino::{Utf8Path, Utf8PathBuf};
use std::error::Error as StdError;
use text_span::{LineCol, LineIndex, Span};
use vue_injector::{Injection, TransformError};

/// What happened to one file.
#[derive(Debug)]
pub enum Outcome {
    /// The transformed document was written to this path.
    Written(Utf8PathBuf),
    /// The transformed document was printed.
    Printed,
    /// Nothing to inject.
    Unchanged,
    /// The template compiler rejected the template.
    CompileFailed(Vec<String>),
    /// The transform or file I/O failed.
    Failed {
        message: String,
        location: Option<LineCol>,
    },
}

#[derive(Debug)]
pub struct FileReport {
    pub path: Utf8PathBuf,
    pub outcome: Outcome,
}

impl FileReport {
    pub fn failed(path: &Utf8Path, message: impl Into<String>) -> Self {
        Self {
            path: path.to_owned(),
            outcome: Outcome::Failed {
                message: message.into(),
                location: None,
            },
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(
            self.outcome,
            Outcome::Failed { .. } | Outcome::CompileFailed(_)
        )
    }

    /// Formats the report for the terminal, or `None` for quiet outcomes.
    pub fn render(&self, workspace: &Utf8Path) -> Option<String> {
        let relative = self.path.strip_prefix(workspace).unwrap_or(&self.path);
        match &self.outcome {
            Outcome::Written(_) | Outcome::Printed | Outcome::Unchanged => None,
            Outcome::CompileFailed(errors) => {
                let mut out = format!("{relative}\nError: template failed to compile\n");
                for error in errors {
                    out.push_str(&format!("  - {error}\n"));
                }
                Some(out)
            }
            Outcome::Failed { message, location } => Some(match location {
                Some(at) => format!("{relative}:{at}\nError: {message}\n"),
                None => format!("{relative}\nError: {message}\n"),
            }),
        }
    }
}

/// Totals over a run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub files: usize,
    pub injected: usize,
    pub unchanged: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn record(&mut self, report: &FileReport) {
        self.files += 1;
        match report.outcome {
            Outcome::Written(_) | Outcome::Printed => self.injected += 1,
            Outcome::Unchanged => self.unchanged += 1,
            Outcome::CompileFailed(_) | Outcome::Failed { .. } => self.failed += 1,
        }
    }
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} files: {} transformed, {} unchanged, {} failed",
            self.files, self.injected, self.unchanged, self.failed
        )
    }
}

/// Maps an injection result onto an outcome for a document that was not
/// written anywhere.
pub fn unwritten_outcome(injection: Injection) -> Outcome {
    match injection {
        Injection::CompileFailed(errors) => Outcome::CompileFailed(errors),
        _ => Outcome::Unchanged,
    }
}

/// Builds a failure outcome, locating the error in `source` when possible.
pub fn transform_failure(source: &str, err: &TransformError) -> Outcome {
    Outcome::Failed {
        message: error_chain(err),
        location: locate_error(source, err),
    }
}

/// The message of `err` followed by its sources.
pub fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn locate_error(source: &str, err: &TransformError) -> Option<LineCol> {
    let index = LineIndex::new(source);
    if let TransformError::Sfc(parse) = err {
        return index.line_col(parse.span.start);
    }

    let span = err.script_span()?;
    let document = vue_sfc::parse(source).ok()?;
    let script = document.script?;
    script_to_file(&index, &script.content, script.content_span, span)
}

/// Maps a span in de-indented script content back to the file. Lines map
/// one to one; columns are exact on the first content line only.
fn script_to_file(
    file_index: &LineIndex,
    content: &str,
    content_span: Span,
    span: Span,
) -> Option<LineCol> {
    let in_script = LineIndex::new(content).line_col(span.start)?;
    let content_start = file_index.line_col(content_span.start)?;
    Some(if in_script.line == 0 {
        LineCol::new(content_start.line, content_start.col + in_script.col)
    } else {
        LineCol::new(content_start.line + in_script.line, in_script.col)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use vue_injector::ToolchainError;

    #[test]
    fn test_script_error_location() {
        let source = "<template><div/></template>\n<script lang=\"ts\">\nexport default class A {\n  x = ;\n}\n</script>";
        let err = vue_injector::ScriptSnapshot::parse("A.vue", "\nexport default class A {\n  x = ;\n}\n")
            .unwrap_err();
        let Outcome::Failed { location, .. } = transform_failure(source, &err) else {
            panic!("expected a failure");
        };
        let location = location.unwrap();
        // Line 4 of the file holds `  x = ;`.
        assert_eq!(location.line, 3);
    }

    #[test]
    fn test_block_error_location() {
        let source = "<template>\n<div/>\n</template>\n<script>";
        let err = vue_injector::TransformError::from(vue_sfc::parse(source).unwrap_err());
        let Outcome::Failed { location, .. } = transform_failure(source, &err) else {
            panic!("expected a failure");
        };
        assert_eq!(location.map(|at| at.line), Some(3));
    }

    #[test]
    fn test_error_chain() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err = TransformError::from(ToolchainError::with_source("node toolchain failed", io));
        assert_eq!(error_chain(&err), "node toolchain failed: pipe closed");
    }

    #[test]
    fn test_summary() {
        let mut summary = RunSummary::default();
        summary.record(&FileReport {
            path: "a.vue".into(),
            outcome: Outcome::Printed,
        });
        summary.record(&FileReport::failed(Utf8Path::new("b.vue"), "boom"));
        assert_eq!(summary.to_string(), "2 files: 1 transformed, 0 unchanged, 1 failed");
    }

    #[test]
    fn test_render_failure() {
        let report = FileReport {
            path: "/ws/src/A.vue".into(),
            outcome: Outcome::Failed {
                message: "component class must be named".to_string(),
                location: Some(LineCol::new(4, 0)),
            },
        };
        assert_eq!(
            report.render(Utf8Path::new("/ws")).unwrap(),
            "src/A.vue:5:1\nError: component class must be named\n"
        );
    }
}
