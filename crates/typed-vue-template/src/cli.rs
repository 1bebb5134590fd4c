//! CLI argument parsing.

use camino::Utf8PathBuf;
use clap::Parser;

/// Compiles Vue templates into render functions that TypeScript can check.
#[derive(Debug, Parser)]
#[command(name = "typed-vue-template")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Files or directories to transform (defaults to the workspace)
    pub paths: Vec<Utf8PathBuf>,

    /// Root used for file discovery, config lookup and node resolution
    #[arg(long, default_value = ".")]
    pub workspace: Utf8PathBuf,

    /// Write results under this directory, mirroring workspace-relative paths
    #[arg(long = "out-dir", conflicts_with = "stdout")]
    pub out_dir: Option<Utf8PathBuf>,

    /// Print results to stdout instead of writing files
    #[arg(long)]
    pub stdout: bool,

    /// Glob patterns to ignore
    #[arg(long)]
    pub ignore: Vec<String>,

    /// Import path of the module exporting `inject`
    #[arg(long = "runtime-module")]
    pub runtime_module: Option<String>,

    /// Import path of the module exporting `ReservedTag`
    #[arg(long = "built-in-module")]
    pub built_in_module: Option<String>,

    /// Write runtime.ts and built-in.ts into this directory and exit
    #[arg(long = "emit-runtime")]
    pub emit_runtime: Option<Utf8PathBuf>,

    /// Enable debug logging
    #[arg(long, short)]
    pub verbose: bool,
}
