/*!
 * promptfs - Snapshot a project directory into a single text file
 *
 * This library selects project folders and files with layered
 * ignore/only/additional patterns and writes the folder tree followed by
 * the selected files' contents, oldest modification first, for use as
 * context for Large Language Models.
 */

pub mod config;
pub mod error;
pub mod matcher;
pub mod order;
pub mod pattern;
pub mod report;
pub mod rules;
pub mod scanner;
pub mod types;
pub mod utils;
pub mod writer;


// Re-export main components for easier access
pub use config::{Config, OutputTarget};
pub use error::{PromptFsError, Result};
pub use matcher::PathMatcher;
pub use pattern::{MatchMode, Pattern, PatternScope};
pub use report::{FileReportInfo, Reporter, ScanReport};
pub use rules::RuleSet;
pub use scanner::Scanner;
pub use types::{DirectoryListing, ResolvedScope, ScanResult, ScopeTree, SelectedFile};
pub use writer::PromptWriter;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
