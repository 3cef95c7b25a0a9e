/*!
 * Rule set derived from defaults and command-line patterns
 *
 * Patterns are classified once and partitioned here. Nothing downstream
 * re-classifies or mutates them.
 */

use crate::config::Config;
use crate::pattern::Pattern;
use crate::utils::{DEFAULT_IGNORE, DEFAULT_SELECTORS, TEST_MARKERS};

/// Where an ignore pattern came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreOrigin {
    /// Built-in artifact directory list
    Default,
    /// Injected because test artifacts were not requested
    TestMarker,
    /// Output file, by project-relative path or basename
    OutputFile,
    /// Given with `-i`
    User,
}

/// An ignore pattern and its origin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreRule {
    pub pattern: Pattern,
    pub origin: IgnoreOrigin,
}

/// Resolved, read-only configuration for one run
#[derive(Debug, Clone)]
pub struct RuleSet {
    /// Ignore patterns in insertion order, without duplicates
    pub ignore: Vec<IgnoreRule>,
    /// `-O` patterns with a trailing separator
    pub only_folders: Vec<Pattern>,
    /// `-O` patterns without a trailing separator
    pub only_files: Vec<Pattern>,
    /// `-a` patterns with a trailing separator
    pub additional_folders: Vec<Pattern>,
    /// `-a` patterns without a trailing separator
    pub additional_files: Vec<Pattern>,
    /// Built-in file selectors
    pub default_selectors: Vec<Pattern>,
    /// Whether test and mock artifacts are kept
    pub include_tests: bool,
}

impl RuleSet {
    /// Build the rule set for a configuration
    pub fn from_config(config: &Config) -> Self {
        let mut rules = Self {
            ignore: Vec::new(),
            only_folders: Vec::new(),
            only_files: Vec::new(),
            additional_folders: Vec::new(),
            additional_files: Vec::new(),
            default_selectors: DEFAULT_SELECTORS
                .iter()
                .map(|raw| Pattern::classify(raw))
                .collect(),
            include_tests: config.include_tests,
        };

        for raw in DEFAULT_IGNORE.iter() {
            rules.push_ignore(raw, IgnoreOrigin::Default);
        }
        for raw in &config.ignore_patterns {
            rules.push_ignore(raw, IgnoreOrigin::User);
        }
        if !config.include_tests {
            for raw in TEST_MARKERS {
                rules.push_ignore(raw, IgnoreOrigin::TestMarker);
            }
        }
        if let Some(output) = config.output_ignore_pattern() {
            rules.push_ignore(&output, IgnoreOrigin::OutputFile);
        }

        for raw in &config.only_patterns {
            let pattern = Pattern::classify(raw);
            if pattern.is_folder() {
                rules.only_folders.push(pattern);
            } else {
                rules.only_files.push(pattern);
            }
        }

        for raw in &config.additional_patterns {
            let pattern = Pattern::classify(raw);
            if pattern.is_folder() {
                rules.additional_folders.push(pattern);
            } else {
                rules.additional_files.push(pattern);
            }
        }

        log::debug!(
            "Rule set: {} ignore, {} only folders, {} only files, \
             {} additional folders, {} additional files",
            rules.ignore.len(),
            rules.only_folders.len(),
            rules.only_files.len(),
            rules.additional_folders.len(),
            rules.additional_files.len()
        );

        rules
    }

    fn push_ignore(&mut self, raw: &str, origin: IgnoreOrigin) {
        let pattern = Pattern::classify(raw);
        if pattern.text().is_empty() {
            log::warn!("Ignoring empty ignore pattern '{}'", raw);
            return;
        }
        let duplicate = self.ignore.iter().any(|rule| {
            rule.pattern.text() == pattern.text() && rule.pattern.scope() == pattern.scope()
        });
        if duplicate {
            return;
        }
        self.ignore.push(IgnoreRule { pattern, origin });
    }

    /// File selectors in effect: `-O` files replace the defaults, `-a`
    /// files are always appended
    pub fn effective_selectors(&self) -> Vec<&Pattern> {
        let base = if self.only_files.is_empty() {
            &self.default_selectors
        } else {
            &self.only_files
        };

        base.iter().chain(self.additional_files.iter()).collect()
    }
}
