/*!
 * Plain-text snapshot writer for promptfs
 */

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use crate::config::{Config, OutputTarget};
use crate::error::{PromptFsError, Result};
use crate::report::FileReportInfo;
use crate::types::{DirectoryListing, ScanResult, ScopeTree, SelectedFile};

/// What was actually written
#[derive(Debug, Clone, Default)]
pub struct WriteSummary {
    /// Directories printed in the tree section
    pub directories: usize,
    /// Files whose contents were emitted, in output order
    pub files: Vec<(String, FileReportInfo)>,
    /// Sum of emitted file sizes in bytes
    pub total_bytes: u64,
}

/// Writer for the folder tree and file contents
pub struct PromptWriter {
    /// Writer configuration
    config: Config,
}

impl PromptWriter {
    /// Create a new writer
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Write the snapshot to the configured output target
    pub fn write(&self, result: &ScanResult) -> Result<WriteSummary> {
        match &self.config.output {
            OutputTarget::File(path) => {
                let file = File::create(path).map_err(|source| PromptFsError::Output {
                    path: path.clone(),
                    source,
                })?;
                let mut writer = BufWriter::new(file);
                let summary = self.render(result, &mut writer)?;
                writer.flush()?;
                Ok(summary)
            }
            OutputTarget::Stdout => {
                let stdout = io::stdout();
                let mut writer = BufWriter::new(stdout.lock());
                let summary = self.render(result, &mut writer)?;
                writer.flush()?;
                Ok(summary)
            }
        }
    }

    /// Render the snapshot into any writer
    pub fn render<W: Write>(&self, result: &ScanResult, writer: &mut W) -> Result<WriteSummary> {
        let mut summary = WriteSummary {
            directories: result.listing.directory_count(),
            ..WriteSummary::default()
        };

        writeln!(writer, "Project Folder Structure:")?;
        writeln!(writer, "========================")?;
        self.write_listing(&result.listing, writer)?;

        writeln!(writer)?;
        writeln!(writer, "Files with Contents:")?;
        writeln!(writer, "====================")?;

        for file in &result.files {
            if let Some(info) = self.write_file(file, writer)? {
                summary.total_bytes += info.bytes;
                summary.files.push((file.path.clone(), info));
            }
        }

        Ok(summary)
    }

    /// Write the directory trees, two spaces per level below each scope root
    fn write_listing<W: Write>(
        &self,
        listing: &DirectoryListing,
        writer: &mut W,
    ) -> io::Result<()> {
        for (index, tree) in listing.trees.iter().enumerate() {
            if listing.headered {
                if index > 0 {
                    writeln!(writer)?;
                }
                writeln!(writer, "Directory subtree for: {}", tree.scope.display_name())?;
            }
            self.write_tree(tree, writer)?;
        }
        Ok(())
    }

    fn write_tree<W: Write>(&self, tree: &ScopeTree, writer: &mut W) -> io::Result<()> {
        for directory in &tree.directories {
            let below_scope = if tree.scope.path.is_empty() {
                directory.as_str()
            } else {
                directory
                    .strip_prefix(tree.scope.path.as_str())
                    .map(|rest| rest.trim_start_matches('/'))
                    .unwrap_or(directory)
            };
            let depth = below_scope.split('/').count();
            let name = below_scope.rsplit('/').next().unwrap_or(below_scope);
            writeln!(writer, "{}{}", "  ".repeat(depth), name)?;
        }
        Ok(())
    }

    /// Write one file block; files that vanished since scanning are skipped
    fn write_file<W: Write>(
        &self,
        file: &SelectedFile,
        writer: &mut W,
    ) -> Result<Option<FileReportInfo>> {
        let path: PathBuf = self.config.target_dir.join(&file.path);
        let content = match fs::read(&path) {
            Ok(content) => content,
            Err(e) => {
                log::warn!("Skipping {}: {}", file.path, e);
                return Ok(None);
            }
        };

        writeln!(writer)?;
        writeln!(writer, "==== {} ====", file.path)?;
        writeln!(writer)?;
        writer.write_all(&content)?;
        writeln!(writer)?;

        Ok(Some(FileReportInfo::from_bytes(&content)))
    }
}
