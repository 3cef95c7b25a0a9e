/*!
 * Scope resolution and directory traversal
 */

use std::path::{Path, PathBuf};
use std::sync::Arc;

use glob_match::glob_match;
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use indicatif::ProgressBar;
use walkdir::{DirEntry, WalkDir};

use crate::config::Config;
use crate::error::Result;
use crate::matcher::PathMatcher;
use crate::order::{normalize_path, order, FsTimeSource};
use crate::pattern::Pattern;
use crate::rules::RuleSet;
use crate::types::{DirectoryListing, ResolvedScope, ScanResult, ScopeTree};

/// Scanner for a project directory
pub struct Scanner {
    /// Scanner configuration
    config: Config,
    /// Rules derived from the configuration
    rules: RuleSet,
    /// Progress bar
    pub progress: Arc<ProgressBar>,
}

impl Scanner {
    /// Create a new scanner
    pub fn new(config: Config, progress: Arc<ProgressBar>) -> Self {
        let rules = RuleSet::from_config(&config);
        Self {
            config,
            rules,
            progress,
        }
    }

    /// Rules this scanner applies
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Resolve scopes, list directories and files, dedupe and order them
    pub fn scan(&self) -> Result<ScanResult> {
        let base = self.base_matcher()?;
        let resolved = self.resolve_scopes(&base);
        let matcher = base.with_forced_includes(
            resolved
                .iter()
                .filter(|scope| scope.forced)
                .map(|scope| scope.path.as_str()),
        );

        // A scope inside a pruned subtree contributes no header and no files
        let scopes: Vec<ResolvedScope> = resolved
            .into_iter()
            .filter(|scope| {
                let pruned = matcher.should_prune(&scope.path, true);
                if pruned {
                    log::info!(
                        "Scope '{}' is excluded by an ignore pattern",
                        scope.display_name()
                    );
                }
                !pruned
            })
            .collect();
        let selectors = self.rules.effective_selectors();

        self.progress.set_prefix("Scanning");

        let headered = !(scopes.len() == 1 && !scopes[0].explicit);
        let mut listing = DirectoryListing {
            headered,
            trees: Vec::with_capacity(scopes.len()),
        };
        let mut discovered = Vec::new();

        for scope in &scopes {
            listing.trees.push(ScopeTree {
                scope: scope.clone(),
                directories: self.list_directories(scope, &matcher),
            });
            discovered.extend(self.list_files(scope, &matcher, &selectors));
        }

        self.progress.set_prefix("Ordering");
        self.progress
            .set_message(format!("{} candidate files", discovered.len()));

        let files = order(discovered, &FsTimeSource::new(&self.config.target_dir));
        log::info!(
            "Selected {} files across {} scope(s)",
            files.len(),
            scopes.len()
        );

        Ok(ScanResult { listing, files })
    }

    /// Expand `-O` and `-a` folder patterns into existing directories.
    ///
    /// Without `-O` folders the project root is the primary scope. `-a`
    /// folders are appended and marked forced; a directory named twice is
    /// kept once. Glob patterns never descend into directories `matcher`
    /// prunes, except that an `-a` pattern's literal leading components are
    /// exempt from ignores.
    pub fn resolve_scopes(&self, matcher: &PathMatcher) -> Vec<ResolvedScope> {
        let mut scopes = Vec::new();

        if self.rules.only_folders.is_empty() {
            scopes.push(ResolvedScope::implicit_root());
        } else {
            for pattern in &self.rules.only_folders {
                for path in self.expand_folder_pattern(pattern, matcher) {
                    push_scope(&mut scopes, path, false);
                }
            }
        }

        for pattern in &self.rules.additional_folders {
            let exempt = matcher
                .clone()
                .with_forced_includes([pattern.literal_prefix()]);
            for path in self.expand_folder_pattern(pattern, &exempt) {
                push_scope(&mut scopes, path, true);
            }
        }

        scopes
    }

    /// Matcher for the rule set's ignores and the optional gitignore, with
    /// no forced includes
    pub fn base_matcher(&self) -> Result<PathMatcher> {
        Ok(PathMatcher::new(&self.rules).with_gitignore(self.load_gitignore()?))
    }

    /// Every non-pruned directory under a scope, in pre-order, scope root excluded
    pub fn list_directories(&self, scope: &ResolvedScope, matcher: &PathMatcher) -> Vec<String> {
        let mut directories = Vec::new();
        self.walk_scope(scope, matcher, |rel_path, entry| {
            if entry.file_type().is_dir() {
                directories.push(rel_path.to_string());
            }
        });
        directories
    }

    /// Every non-pruned regular file under a scope matching a selector
    pub fn list_files(
        &self,
        scope: &ResolvedScope,
        matcher: &PathMatcher,
        selectors: &[&Pattern],
    ) -> Vec<String> {
        let mut files = Vec::new();
        self.walk_scope(scope, matcher, |rel_path, entry| {
            if entry.file_type().is_file() && matcher.matches_selector(rel_path, selectors) {
                self.progress.inc(1);
                self.progress.set_message(format!("Found: {}", rel_path));
                files.push(rel_path.to_string());
            }
        });
        files
    }

    /// Walk one scope in file-name order, skipping pruned subtrees entirely
    fn walk_scope<F>(&self, scope: &ResolvedScope, matcher: &PathMatcher, mut visit: F)
    where
        F: FnMut(&str, &DirEntry),
    {
        if matcher.should_prune(&scope.path, true) {
            return;
        }

        let root = self.scope_root(scope);
        let walker = WalkDir::new(&root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                let rel_path = self.relative(entry.path());
                !matcher.should_prune(&rel_path, entry.file_type().is_dir())
            });

        for entry in walker {
            match entry {
                Ok(entry) => {
                    let rel_path = self.relative(entry.path());
                    visit(&rel_path, &entry);
                }
                Err(e) => {
                    let path = e
                        .path()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| root.display().to_string());
                    log::warn!("Skipping unreadable entry {}: {}", path, e);
                }
            }
        }
    }

    /// Directories under the project root matching a folder pattern
    fn expand_folder_pattern(&self, pattern: &Pattern, matcher: &PathMatcher) -> Vec<String> {
        let text = pattern.text();

        if text.is_empty() {
            return vec![String::new()];
        }

        if !pattern.has_wildcard() {
            let path = self.config.target_dir.join(text);
            if path.is_dir() {
                return vec![text.to_string()];
            }
            if path.exists() {
                log::warn!(
                "Pattern '{}' matches a non-directory; skipping",
                pattern.raw()
            );
            } else {
                log::warn!("Pattern '{}' matches no directory; skipping", pattern.raw());
            }
            return Vec::new();
        }

        let max_depth = if text.contains("**") {
            usize::MAX
        } else {
            text.split('/').count()
        };

        let matches: Vec<String> = WalkDir::new(&self.config.target_dir)
            .min_depth(1)
            .max_depth(max_depth)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                entry.file_type().is_dir()
                    && !matcher.should_prune(&self.relative(entry.path()), true)
            })
            .filter_map(|entry| entry.ok())
            .map(|entry| self.relative(entry.path()))
            .filter(|rel_path| glob_match(text, rel_path))
            .collect();

        if matches.is_empty() {
            log::warn!("Pattern '{}' matches no directory; skipping", pattern.raw());
        }

        matches
    }

    fn load_gitignore(&self) -> Result<Option<Gitignore>> {
        if !self.config.respect_gitignore {
            return Ok(None);
        }

        let path = self
            .config
            .gitignore_path
            .clone()
            .unwrap_or_else(|| self.config.target_dir.join(".gitignore"));
        if !path.is_file() {
            log::debug!("No gitignore at {}", path.display());
            return Ok(None);
        }

        let mut builder = GitignoreBuilder::new(&self.config.target_dir);
        if let Some(err) = builder.add(&path) {
            return Err(err.into());
        }
        Ok(Some(builder.build()?))
    }

    fn scope_root(&self, scope: &ResolvedScope) -> PathBuf {
        if scope.path.is_empty() {
            self.config.target_dir.clone()
        } else {
            self.config.target_dir.join(&scope.path)
        }
    }

    /// Path relative to the project root, `/`-separated
    fn relative(&self, path: &Path) -> String {
        let rel = path.strip_prefix(&self.config.target_dir).unwrap_or(path);
        normalize_path(&rel.to_string_lossy())
    }
}

fn push_scope(scopes: &mut Vec<ResolvedScope>, path: String, forced: bool) {
    if let Some(existing) = scopes.iter_mut().find(|scope| scope.path == path) {
        existing.forced |= forced;
        existing.explicit = true;
        return;
    }
    scopes.push(ResolvedScope {
        path,
        forced,
        explicit: true,
    });
}
