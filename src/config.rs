/*!
 * Configuration handling for promptfs
 */

use std::path::{Path, PathBuf};

use clap::error::ErrorKind;
use clap::Parser;
use clap_complete::Shell;

use crate::error::Result;
use crate::order::normalize_path;
use crate::utils::DEFAULT_OUTPUT_FILE;
use crate::{bail, ensure};

/// Command-line arguments for promptfs
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "promptfs",
    version = env!("CARGO_PKG_VERSION"),
    about = "Snapshot a project's folder tree and source files into one text file",
    long_about = "Walks a project directory, filters folders and files with ignore/only/additional patterns, and writes the directory tree followed by every selected file's contents, oldest modification first, for use as Large Language Model context."
)]
pub struct Args {
    /// Project directory to snapshot
    #[clap(default_value = ".")]
    pub directory_path: String,

    /// Include test and mock files and folders (test, tests, *_test.*, mock)
    #[clap(short = 't', long = "include-tests")]
    pub include_tests: bool,

    /// Ignore a folder or file pattern (trailing '/' for folders, globs allowed)
    #[clap(short = 'i', long = "ignore", value_name = "PATTERN")]
    pub ignore_patterns: Vec<String>,

    /// Restrict to a folder (trailing '/') or replace the default file selectors
    #[clap(short = 'O', long = "only", value_name = "PATTERN")]
    pub only_patterns: Vec<String>,

    /// Add a folder (trailing '/', exempt from ignores) or an extra file selector
    #[clap(short = 'a', long = "additional", value_name = "PATTERN")]
    pub additional_patterns: Vec<String>,

    /// Output file
    #[clap(
        short = 'o',
        long = "output",
        value_name = "FILE",
        default_value = DEFAULT_OUTPUT_FILE,
        overrides_with = "stdout"
    )]
    pub output_file: String,

    /// Write to standard output instead of a file
    #[clap(long, overrides_with = "output_file")]
    pub stdout: bool,

    /// Honour the project's .gitignore in addition to the ignore patterns
    #[clap(long)]
    pub respect_gitignore: bool,

    /// Path to custom .gitignore file (implies --respect-gitignore)
    #[clap(long, value_name = "FILE")]
    pub gitignore_path: Option<String>,

    /// Number of threads to use for timestamp lookups
    #[clap(long, default_value = "4")]
    pub threads: usize,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[clap(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress warnings, progress and the run report
    #[clap(short = 'q', long)]
    pub quiet: bool,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Where the snapshot is written
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputTarget {
    /// A named file, created or truncated
    File(PathBuf),
    /// Standard output
    Stdout,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Project root; every pattern and printed path is relative to it
    pub target_dir: PathBuf,

    /// Output destination
    pub output: OutputTarget,

    /// `-i` patterns
    pub ignore_patterns: Vec<String>,

    /// `-O` patterns
    pub only_patterns: Vec<String>,

    /// `-a` patterns
    pub additional_patterns: Vec<String>,

    /// Keep test and mock artifacts
    pub include_tests: bool,

    /// Number of threads to use for timestamp lookups
    pub num_threads: usize,

    /// Whether to respect the project's .gitignore
    pub respect_gitignore: bool,

    /// Path to custom .gitignore file
    pub gitignore_path: Option<PathBuf>,

    /// Suppress progress and report output
    pub quiet: bool,
}

impl Config {
    /// Configuration with default rules for a project directory
    pub fn new(target_dir: impl Into<PathBuf>) -> Self {
        Self {
            target_dir: target_dir.into(),
            output: OutputTarget::File(PathBuf::from(DEFAULT_OUTPUT_FILE)),
            ignore_patterns: Vec::new(),
            only_patterns: Vec::new(),
            additional_patterns: Vec::new(),
            include_tests: false,
            num_threads: 4,
            respect_gitignore: false,
            gitignore_path: None,
            quiet: false,
        }
    }

    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Self {
        let output = if args.stdout {
            OutputTarget::Stdout
        } else {
            OutputTarget::File(PathBuf::from(args.output_file))
        };

        Self {
            target_dir: PathBuf::from(args.directory_path),
            output,
            ignore_patterns: args.ignore_patterns,
            only_patterns: args.only_patterns,
            additional_patterns: args.additional_patterns,
            include_tests: args.include_tests,
            num_threads: args.threads,
            respect_gitignore: args.respect_gitignore || args.gitignore_path.is_some(),
            gitignore_path: args.gitignore_path.map(PathBuf::from),
            quiet: args.quiet,
        }
    }

    /// Ignore pattern for the output file so a run never reads its own output.
    ///
    /// The path relative to the project root when the output lies inside it,
    /// otherwise the bare file name.
    pub fn output_ignore_pattern(&self) -> Option<String> {
        let OutputTarget::File(path) = &self.output else {
            return None;
        };
        let name = path.file_name()?;

        let parent = match path.parent() {
            Some(parent) if parent != Path::new("") => parent,
            _ => Path::new("."),
        };
        let inside = match (parent.canonicalize(), self.target_dir.canonicalize()) {
            (Ok(parent), Ok(root)) => parent
                .strip_prefix(&root)
                .ok()
                .map(|rel| normalize_path(&rel.join(name).to_string_lossy())),
            _ => None,
        };

        Some(inside.unwrap_or_else(|| name.to_string_lossy().to_string()))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.target_dir.is_dir(),
            PathNotFound,
            "Target directory not found: {}",
            self.target_dir.display()
        );

        // Check if output file directory exists
        if let OutputTarget::File(path) = &self.output {
            if let Some(parent) = path.parent() {
                if parent != Path::new("") && !parent.is_dir() {
                    bail!(Config, "Output directory not found: {}", parent.display());
                }
            }
        }

        // Check if custom gitignore file exists
        if let Some(path) = &self.gitignore_path {
            ensure!(
                path.is_file(),
                PathNotFound,
                "Custom .gitignore file not found: {}",
                path.display()
            );
        }

        ensure!(self.num_threads > 0, Config, "--threads must be at least 1");

        Ok(())
    }
}

/// Process exit code for a failed argument parse: 0 for help and version,
/// 1 for every usage error
pub fn exit_code_for(err: &clap::Error) -> u8 {
    match err.kind() {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => 0,
        _ => 1,
    }
}
