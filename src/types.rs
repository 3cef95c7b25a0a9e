/*!
 * Core types and data structures for the promptfs application
 */

/// A folder scope after glob expansion against the project root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedScope {
    /// Directory relative to the project root, `/`-separated; empty for the root
    pub path: String,
    /// Exempt from ignore rules matching the scope or its ancestors
    pub forced: bool,
    /// Named on the command line rather than the implicit root
    pub explicit: bool,
}

impl ResolvedScope {
    /// The project root used when no `-O` folder scope is given
    pub fn implicit_root() -> Self {
        Self {
            path: String::new(),
            forced: false,
            explicit: false,
        }
    }

    /// Name printed in subtree headers
    pub fn display_name(&self) -> &str {
        if self.path.is_empty() {
            "."
        } else {
            &self.path
        }
    }
}

/// A file that survived pruning and matched a selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// Path relative to the project root, `/`-separated
    pub path: String,
    /// Last modification time in whole seconds since the Unix epoch
    pub modified: i64,
}

/// The non-pruned directories under one scope, in pre-order
#[derive(Debug, Clone)]
pub struct ScopeTree {
    /// Scope the directories were listed from
    pub scope: ResolvedScope,
    /// Directory paths relative to the project root, scope root excluded
    pub directories: Vec<String>,
}

/// Directory section of the output
#[derive(Debug, Clone, Default)]
pub struct DirectoryListing {
    /// Whether each subtree is preceded by a "Directory subtree for" line
    pub headered: bool,
    /// One tree per resolved scope
    pub trees: Vec<ScopeTree>,
}

impl DirectoryListing {
    /// Total number of directories across all subtrees
    pub fn directory_count(&self) -> usize {
        self.trees.iter().map(|tree| tree.directories.len()).sum()
    }
}

/// Everything a single scan produces for the renderer
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    /// Directory tree section
    pub listing: DirectoryListing,
    /// Files oldest first
    pub files: Vec<SelectedFile>,
}
