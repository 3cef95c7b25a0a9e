/*!
 * Pattern classification for ignore, only and additional rules
 *
 * A raw pattern string is classified exactly once into a scope (folder or
 * file/path) and a matching mode. Every later comparison goes through the
 * mode chosen here.
 */

use std::path::is_separator;

use glob_match::glob_match;

use crate::order::normalize_path;

/// What a pattern selects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternScope {
    /// Raw text ended with a path separator
    Folder,
    /// A file name or a relative path
    FileOrPath,
}

/// How a pattern is compared against a relative path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Literal comparison against the last path component
    ExactBasename,
    /// Literal comparison against the whole relative path
    ExactPath,
    /// Glob against the last path component
    GlobBasename,
    /// Glob against the whole relative path
    GlobPath,
}

/// A classified, immutable user or default pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    raw: String,
    text: String,
    scope: PatternScope,
    has_wildcard: bool,
    has_separator: bool,
    mode: MatchMode,
}

impl Pattern {
    /// Classify a raw pattern string. Never fails.
    pub fn classify(raw: &str) -> Self {
        let scope = if raw.ends_with(is_separator) {
            PatternScope::Folder
        } else {
            PatternScope::FileOrPath
        };

        let text = normalize_path(raw.trim_end_matches(is_separator));
        let has_wildcard = text.contains(['*', '?', '[']);
        let has_separator = text.contains('/');

        let mode = match (has_wildcard, has_separator) {
            (true, true) => MatchMode::GlobPath,
            (true, false) => MatchMode::GlobBasename,
            (false, true) => MatchMode::ExactPath,
            (false, false) => MatchMode::ExactBasename,
        };

        Self {
            raw: raw.to_string(),
            text,
            scope,
            has_wildcard,
            has_separator,
            mode,
        }
    }

    /// The text as given on the command line
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Cleaned text: trailing separator and `./` prefixes removed.
    /// Empty for patterns naming the project root.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn scope(&self) -> PatternScope {
        self.scope
    }

    pub fn is_folder(&self) -> bool {
        self.scope == PatternScope::Folder
    }

    pub fn has_wildcard(&self) -> bool {
        self.has_wildcard
    }

    pub fn has_separator(&self) -> bool {
        self.has_separator
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Selector matching: compare a `/`-separated relative path per this
    /// pattern's mode.
    pub fn matches(&self, rel_path: &str) -> bool {
        let basename = rel_path.rsplit('/').next().unwrap_or(rel_path);
        match self.mode {
            MatchMode::ExactBasename => self.text == basename,
            MatchMode::ExactPath => self.text == rel_path,
            MatchMode::GlobBasename => glob_match(&self.text, basename),
            MatchMode::GlobPath => glob_match(&self.text, rel_path),
        }
    }

    /// Ignore matching: the number of leading components of `rel_path` up to
    /// the deepest component this pattern matches, if any.
    ///
    /// Patterns without a separator are compared against each component,
    /// patterns with one against each leading prefix of the path. Folder
    /// patterns never match the final component of a non-directory.
    pub fn deepest_match(&self, rel_path: &str, is_dir: bool) -> Option<usize> {
        if rel_path.is_empty() || self.text.is_empty() {
            return None;
        }

        let components: Vec<&str> = rel_path.split('/').collect();
        let last = components.len() - 1;
        let mut end = 0;
        let mut deepest = None;

        for (i, component) in components.iter().copied().enumerate() {
            end = if i == 0 {
                component.len()
            } else {
                end + 1 + component.len()
            };

            if i == last && !is_dir && self.is_folder() {
                break;
            }

            let matched = match self.mode {
                MatchMode::ExactBasename => self.text == component,
                MatchMode::ExactPath => self.text == rel_path[..end],
                MatchMode::GlobBasename => glob_match(&self.text, component),
                MatchMode::GlobPath => glob_match(&self.text, &rel_path[..end]),
            };

            if matched {
                deepest = Some(i + 1);
            }
        }

        deepest
    }

    /// Leading components before the first one containing a wildcard
    pub fn literal_prefix(&self) -> &str {
        let mut end = 0;
        for component in self.text.split('/') {
            if component.contains(['*', '?', '[']) {
                break;
            }
            end = if end == 0 {
                component.len()
            } else {
                end + 1 + component.len()
            };
        }
        &self.text[..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_separator_means_folder() {
        for raw in ["src/", "*/", "a/b/", "[ab]?/", "./"] {
            assert_eq!(Pattern::classify(raw).scope(), PatternScope::Folder, "{raw}");
        }
        for raw in ["src", "*.py", "a/b", "[ab]?", "docs/*.md"] {
            assert_eq!(Pattern::classify(raw).scope(), PatternScope::FileOrPath, "{raw}");
        }
    }

    #[test]
    fn modes_follow_wildcard_and_separator() {
        assert_eq!(Pattern::classify("Makefile").mode(), MatchMode::ExactBasename);
        assert_eq!(Pattern::classify("src/main.rs").mode(), MatchMode::ExactPath);
        assert_eq!(Pattern::classify("*.rs").mode(), MatchMode::GlobBasename);
        assert_eq!(Pattern::classify("src/*.rs").mode(), MatchMode::GlobPath);
        assert_eq!(Pattern::classify("src/").mode(), MatchMode::ExactBasename);
    }

    #[test]
    fn cleaned_text_drops_prefix_and_separator() {
        let pattern = Pattern::classify("./docs/");
        assert_eq!(pattern.text(), "docs");
        assert_eq!(pattern.raw(), "./docs/");
        assert!(!pattern.has_separator());

        assert_eq!(Pattern::classify("./").text(), "");
    }

    #[test]
    fn exact_patterns_do_not_match_substrings() {
        let pattern = Pattern::classify("main.py");
        assert!(pattern.matches("src/main.py"));
        assert!(!pattern.matches("src/main.pyc"));
        assert!(!pattern.matches("src/old_main.py"));

        let path = Pattern::classify("src/main.py");
        assert!(path.matches("src/main.py"));
        assert!(!path.matches("lib/src/main.py"));
    }

    #[test]
    fn glob_patterns_match_basename_or_path() {
        let basename = Pattern::classify("*.md");
        assert!(basename.matches("docs/guide/intro.md"));
        assert!(!basename.matches("docs/intro.rs"));

        let path = Pattern::classify("docs/*.md");
        assert!(path.matches("docs/intro.md"));
        assert!(!path.matches("docs/guide/intro.md"));
    }

    #[test]
    fn ignore_matches_whole_components_only() {
        let test = Pattern::classify("test");
        assert_eq!(test.deepest_match("src/test/util.py", false), Some(2));
        assert_eq!(test.deepest_match("latest/util.py", false), None);
        assert_eq!(test.deepest_match("test", true), Some(1));

        let nested = Pattern::classify("vendor");
        assert_eq!(nested.deepest_match("vendor/keep/vendor/x.go", false), Some(3));
    }

    #[test]
    fn ignore_with_separator_matches_prefixes() {
        let pattern = Pattern::classify("vendor/old");
        assert_eq!(pattern.deepest_match("vendor/old/a.go", false), Some(2));
        assert_eq!(pattern.deepest_match("vendor/older/a.go", false), None);
        assert_eq!(pattern.deepest_match("src/vendor/old", true), None);
    }

    #[test]
    fn folder_ignore_skips_plain_files() {
        let pattern = Pattern::classify("build/");
        assert_eq!(pattern.deepest_match("build", false), None);
        assert_eq!(pattern.deepest_match("build", true), Some(1));
        assert_eq!(pattern.deepest_match("build/out.py", false), Some(1));
    }

    #[test]
    fn glob_ignore_matches_components() {
        let pattern = Pattern::classify("*_test.*");
        assert_eq!(pattern.deepest_match("pkg/api_test.go", false), Some(2));
        assert_eq!(pattern.deepest_match("pkg/api.go", false), None);
    }

    #[test]
    fn literal_prefix_stops_at_first_wildcard() {
        assert_eq!(Pattern::classify("vendor/*/").literal_prefix(), "vendor");
        assert_eq!(Pattern::classify("a/b/*/c/").literal_prefix(), "a/b");
        assert_eq!(Pattern::classify("**/src/").literal_prefix(), "");
        assert_eq!(Pattern::classify("docs/").literal_prefix(), "docs");
    }
}
