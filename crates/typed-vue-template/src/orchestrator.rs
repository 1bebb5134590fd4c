//! Main orchestration logic.

use crate::cli::Args;
use crate::config::{ConfigError, ProjectConfig};
use crate::output::{self, FileReport, Outcome, RunSummary};
use camino::{Utf8Path, Utf8PathBuf};
use globset::{Glob, GlobSet, GlobSetBuilder};
use node_runner::{NodeError, NodeRunner};
use rayon::prelude::*;
use std::fs;
use std::io::Write;
use std::sync::{Mutex, OnceLock};
use thiserror::Error;
use vue_injector::{runtime, transform_document, Toolchain, TransformOptions};
use walkdir::WalkDir;

/// Suffix of generated files written next to their source.
const OUTPUT_SUFFIX: &str = ".typed.vue";

/// Orchestration errors.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Invalid glob pattern.
    #[error("invalid glob pattern: {0}")]
    InvalidGlob(String),

    #[error("path does not exist: {0}")]
    MissingPath(Utf8PathBuf),

    #[error(transparent)]
    Node(#[from] NodeError),

    #[error("failed to write {path}: {source}")]
    Write {
        path: Utf8PathBuf,
        source: std::io::Error,
    },
}

/// Where transformed documents go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// `Foo.vue` becomes `Foo.typed.vue` in the same directory.
    Sibling,
    /// Mirror workspace-relative paths under a directory.
    OutDir(Utf8PathBuf),
    Stdout,
}

/// Settings shared by every file of a run.
#[derive(Debug, Clone)]
pub struct Job {
    pub workspace: Utf8PathBuf,
    pub options: TransformOptions,
    pub destination: Destination,
}

/// Runs the transform over all files.
pub fn run(args: &Args) -> Result<RunSummary, OrchestratorError> {
    let workspace = absolute(&args.workspace);

    if let Some(dir) = &args.emit_runtime {
        emit_runtime(&absolute(dir))?;
        return Ok(RunSummary::default());
    }

    let config = ProjectConfig::load(&workspace)?;
    let job = Job {
        options: transform_options(args, &config),
        destination: match (&args.out_dir, args.stdout) {
            (_, true) => Destination::Stdout,
            (Some(dir), false) => Destination::OutDir(absolute(dir)),
            (None, false) => Destination::Sibling,
        },
        workspace,
    };

    let patterns = config.ignore.iter().chain(&args.ignore);
    let ignore_set = build_ignore_set(patterns)?;

    let roots: Vec<Utf8PathBuf> = if args.paths.is_empty() {
        vec![job.workspace.clone()]
    } else {
        args.paths.iter().map(|p| absolute(p)).collect()
    };
    let files = discover_files(&job.workspace, &roots, &ignore_set)?;
    tracing::info!(count = files.len(), "found .vue files");

    if files.is_empty() {
        return Ok(RunSummary::default());
    }

    let runner = NodeRunner::discover(&job.workspace)?;
    let reports = transform_files(&files, &job, || {
        runner.spawn_worker().map_err(|e| e.to_string())
    });

    let mut summary = RunSummary::default();
    let stderr = std::io::stderr();
    let mut stderr = stderr.lock();
    for report in &reports {
        if let Outcome::Written(target) = &report.outcome {
            tracing::info!(path = %target, "wrote transformed component");
        }
        if report.is_failure() {
            if let Some(text) = report.render(&job.workspace) {
                let _ = writeln!(stderr, "{text}");
            }
        }
        summary.record(report);
    }
    let _ = writeln!(stderr, "{summary}");

    Ok(summary)
}

/// Transforms `files` in parallel, one toolchain per rayon worker thread.
///
/// Toolchains are checked out of an idle pool and returned after each file,
/// so no more are started than files are processed concurrently. After the
/// first startup failure no further toolchain is started.
///
/// Reports come back in the order of `files`.
pub fn transform_files<F, T>(files: &[Utf8PathBuf], job: &Job, make_toolchain: F) -> Vec<FileReport>
where
    F: Fn() -> Result<T, String> + Sync + Send,
    T: Toolchain + Send,
{
    let idle: Mutex<Vec<T>> = Mutex::new(Vec::new());
    let startup_error: OnceLock<String> = OnceLock::new();

    files
        .par_iter()
        .map(|path| {
            let pooled = idle.lock().ok().and_then(|mut idle| idle.pop());
            let toolchain = match pooled {
                Some(toolchain) => toolchain,
                None => {
                    if let Some(message) = startup_error.get() {
                        return FileReport::failed(path, message.clone());
                    }
                    match make_toolchain() {
                        Ok(toolchain) => toolchain,
                        Err(message) => {
                            let message = startup_error.get_or_init(|| message).clone();
                            return FileReport::failed(path, message);
                        }
                    }
                }
            };

            let report = process_file(&toolchain, job, path);
            if let Ok(mut idle) = idle.lock() {
                idle.push(toolchain);
            }
            report
        })
        .collect()
}

/// Transforms one file and delivers the result.
pub fn process_file<T: Toolchain + ?Sized>(toolchain: &T, job: &Job, path: &Utf8Path) -> FileReport {
    let report = |outcome| FileReport {
        path: path.to_owned(),
        outcome,
    };

    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => return FileReport::failed(path, format!("failed to read file: {e}")),
    };

    let output = match transform_document(&source, path.as_str(), toolchain, &job.options) {
        Ok(output) => output,
        Err(err) => return report(output::transform_failure(&source, &err)),
    };

    if !output.injection.is_injected() {
        return report(output::unwritten_outcome(output.injection));
    }

    let target = match &job.destination {
        Destination::Stdout => {
            let stdout = std::io::stdout();
            let mut stdout = stdout.lock();
            let _ = writeln!(stdout, "{}", output.code);
            return report(Outcome::Printed);
        }
        Destination::Sibling => sibling_output_path(path),
        Destination::OutDir(dir) => {
            let relative = path.strip_prefix(&job.workspace).unwrap_or(path);
            dir.join(relative)
        }
    };

    match write_file(&target, &output.code) {
        Ok(()) => report(Outcome::Written(target)),
        Err(err) => FileReport::failed(path, err.to_string()),
    }
}

/// Combines CLI flags, the config file and defaults; flags win.
pub fn transform_options(args: &Args, config: &ProjectConfig) -> TransformOptions {
    let defaults = TransformOptions::default();
    TransformOptions {
        runtime_module: args
            .runtime_module
            .clone()
            .or_else(|| config.runtime_module.clone())
            .unwrap_or(defaults.runtime_module),
        built_in_module: args
            .built_in_module
            .clone()
            .or_else(|| config.built_in_module.clone())
            .unwrap_or(defaults.built_in_module),
        typed_lang: defaults.typed_lang,
    }
}

fn build_ignore_set<'a>(patterns: impl Iterator<Item = &'a String>) -> Result<GlobSet, OrchestratorError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| OrchestratorError::InvalidGlob(e.to_string()))?;
        builder.add(glob);
    }

    // Add default ignores
    for pattern in ["**/node_modules/**", "**/dist/**"] {
        if let Ok(glob) = Glob::new(pattern) {
            builder.add(glob);
        }
    }

    builder
        .build()
        .map_err(|e| OrchestratorError::InvalidGlob(e.to_string()))
}

/// Collects `.vue` files under `roots`, skipping ignored paths and earlier
/// outputs. Explicitly named files are always kept.
fn discover_files(
    workspace: &Utf8Path,
    roots: &[Utf8PathBuf],
    ignore_set: &GlobSet,
) -> Result<Vec<Utf8PathBuf>, OrchestratorError> {
    let mut files = Vec::new();
    for root in roots {
        if root.is_file() {
            files.push(root.clone());
            continue;
        }
        if !root.is_dir() {
            return Err(OrchestratorError::MissingPath(root.clone()));
        }

        let found = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter_map(|e| Utf8PathBuf::try_from(e.into_path()).ok())
            .filter(|p| {
                let file_name = p.file_name().unwrap_or("");
                file_name.ends_with(".vue") && !file_name.ends_with(OUTPUT_SUFFIX)
            })
            .filter(|p| {
                let relative = p.strip_prefix(workspace).unwrap_or(p);
                !ignore_set.is_match(relative.as_str())
            });
        files.extend(found);
    }
    files.sort();
    files.dedup();
    Ok(files)
}

fn sibling_output_path(path: &Utf8Path) -> Utf8PathBuf {
    let stem = path.file_stem().unwrap_or("component");
    path.with_file_name(format!("{stem}{OUTPUT_SUFFIX}"))
}

fn write_file(path: &Utf8Path, contents: &str) -> Result<(), OrchestratorError> {
    let write = || -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)
    };
    write().map_err(|source| OrchestratorError::Write {
        path: path.to_owned(),
        source,
    })
}

fn emit_runtime(dir: &Utf8Path) -> Result<(), OrchestratorError> {
    write_file(&dir.join("runtime.ts"), &runtime::runtime_source())?;
    write_file(&dir.join("built-in.ts"), &runtime::built_in_source())?;
    tracing::info!(dir = %dir, "wrote runtime modules");
    Ok(())
}

fn absolute(path: &Utf8Path) -> Utf8PathBuf {
    if path.is_relative() {
        std::env::current_dir()
            .ok()
            .and_then(|p| Utf8PathBuf::try_from(p).ok())
            .unwrap_or_default()
            .join(path)
    } else {
        path.to_owned()
    }
}
