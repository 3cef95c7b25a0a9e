/*!
 * Prune and selector decisions for relative paths
 */

use ignore::gitignore::Gitignore;

use crate::pattern::Pattern;
use crate::rules::{IgnoreRule, RuleSet};

/// A folder scope exempt from ignores at or above it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForcedInclude {
    path: String,
    depth: usize,
}

impl ForcedInclude {
    pub fn new(path: &str) -> Self {
        let depth = if path.is_empty() {
            0
        } else {
            path.split('/').count()
        };
        Self {
            path: path.to_string(),
            depth,
        }
    }

    /// Whether `rel_path` is the forced directory or lies beneath it
    fn covers(&self, rel_path: &str) -> bool {
        self.path.is_empty()
            || rel_path == self.path
            || rel_path
                .strip_prefix(self.path.as_str())
                .is_some_and(|rest| rest.starts_with('/'))
    }
}

/// Decides which paths are pruned and which files are selected.
///
/// An ignore match on a component at or above a covering forced include is
/// suppressed; a match on a component inside the forced scope still prunes.
#[derive(Debug, Clone)]
pub struct PathMatcher {
    ignore: Vec<IgnoreRule>,
    forced: Vec<ForcedInclude>,
    gitignore: Option<Gitignore>,
}

impl PathMatcher {
    /// Create a matcher from a rule set's ignore patterns
    pub fn new(rules: &RuleSet) -> Self {
        Self {
            ignore: rules.ignore.clone(),
            forced: Vec::new(),
            gitignore: None,
        }
    }

    /// Exempt these directories from ignores matching them or their ancestors
    pub fn with_forced_includes<'a>(mut self, paths: impl IntoIterator<Item = &'a str>) -> Self {
        self.forced.extend(paths.into_iter().map(ForcedInclude::new));
        self
    }

    /// Also prune whatever this gitignore matcher ignores
    pub fn with_gitignore(mut self, gitignore: Option<Gitignore>) -> Self {
        self.gitignore = gitignore;
        self
    }

    /// Whether `rel_path` and its whole subtree are excluded
    pub fn should_prune(&self, rel_path: &str, is_dir: bool) -> bool {
        if rel_path.is_empty() {
            return false;
        }

        let shield = self.forced_depth(rel_path);

        for rule in &self.ignore {
            if let Some(depth) = rule.pattern.deepest_match(rel_path, is_dir) {
                if depth > shield {
                    log::trace!(
                        "Pruning {} ({:?} ignore '{}')",
                        rel_path,
                        rule.origin,
                        rule.pattern.raw()
                    );
                    return true;
                }
            }
        }

        if let Some(depth) = self.gitignore_depth(rel_path, is_dir) {
            if depth > shield {
                log::trace!("Pruning {} (gitignore)", rel_path);
                return true;
            }
        }

        false
    }

    /// Whether a file path matches any of the selectors
    pub fn matches_selector(&self, rel_path: &str, selectors: &[&Pattern]) -> bool {
        selectors.iter().any(|selector| selector.matches(rel_path))
    }

    /// Depth of the deepest forced include covering `rel_path`, or 0
    fn forced_depth(&self, rel_path: &str) -> usize {
        self.forced
            .iter()
            .filter(|forced| forced.covers(rel_path))
            .map(|forced| forced.depth)
            .max()
            .unwrap_or(0)
    }

    fn gitignore_depth(&self, rel_path: &str, is_dir: bool) -> Option<usize> {
        let gitignore = self.gitignore.as_ref()?;
        let components: Vec<&str> = rel_path.split('/').collect();
        let mut deepest = None;

        for depth in 1..=components.len() {
            let prefix = components[..depth].join("/");
            let prefix_is_dir = depth < components.len() || is_dir;
            if gitignore.matched(&prefix, prefix_is_dir).is_ignore() {
                deepest = Some(depth);
            }
        }

        deepest
    }
}
