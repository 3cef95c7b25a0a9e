/*!
 * Deduplication and chronological ordering of selected files
 */

use std::collections::HashSet;
use std::fs;
use std::path::{PathBuf, MAIN_SEPARATOR};
use std::time::UNIX_EPOCH;

use rayon::prelude::*;

use crate::types::SelectedFile;

/// Source of modification timestamps, in whole seconds
pub trait TimeSource: Sync {
    /// Timestamp for a path relative to the project root, `None` if unreadable
    fn modified(&self, path: &str) -> Option<i64>;
}

/// Reads timestamps from filesystem metadata under a project root
#[derive(Debug, Clone)]
pub struct FsTimeSource {
    root: PathBuf,
}

impl FsTimeSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl TimeSource for FsTimeSource {
    fn modified(&self, path: &str) -> Option<i64> {
        let modified = fs::metadata(self.root.join(path)).ok()?.modified().ok()?;
        let seconds = match modified.duration_since(UNIX_EPOCH) {
            Ok(elapsed) => elapsed.as_secs() as i64,
            Err(before) => -(before.duration().as_secs() as i64),
        };
        Some(seconds)
    }
}

/// Normalize a relative path: `/` separators, no `.` components, no
/// leading `./`, no trailing separator. The project root becomes `""`.
pub fn normalize_path(path: &str) -> String {
    let unified;
    let path = if MAIN_SEPARATOR != '/' {
        unified = path.replace(MAIN_SEPARATOR, "/");
        unified.as_str()
    } else {
        path
    };

    path.split('/')
        .filter(|component| !component.is_empty() && *component != ".")
        .collect::<Vec<_>>()
        .join("/")
}

/// Drop repeated file identities, keeping the first occurrence
pub fn dedupe(paths: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    paths
        .into_iter()
        .map(|path| normalize_path(&path))
        .filter(|path| seen.insert(path.clone()))
        .collect()
}

/// Deduplicate, timestamp and stable-sort files, oldest first.
///
/// Files whose timestamp cannot be read are dropped. Equal timestamps keep
/// discovery order.
pub fn order<T: TimeSource>(files: Vec<String>, time_source: &T) -> Vec<SelectedFile> {
    let unique = dedupe(files);

    // Indexed parallel collect keeps discovery order
    let stamped: Vec<Option<SelectedFile>> = unique
        .into_par_iter()
        .map(|path| match time_source.modified(&path) {
            Some(modified) => Some(SelectedFile { path, modified }),
            None => {
                log::debug!("Dropping {}: modification time unavailable", path);
                None
            }
        })
        .collect();

    let mut selected: Vec<SelectedFile> = stamped.into_iter().flatten().collect();
    selected.sort_by_key(|file| file.modified);
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct FixedTimes(HashMap<&'static str, i64>);

    impl TimeSource for FixedTimes {
        fn modified(&self, path: &str) -> Option<i64> {
            self.0.get(path).copied()
        }
    }

    fn paths(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| item.to_string()).collect()
    }

    #[test]
    fn normalizes_current_dir_markers() {
        assert_eq!(normalize_path("./src/a.py"), "src/a.py");
        assert_eq!(normalize_path("././src//a.py"), "src/a.py");
        assert_eq!(normalize_path("src/./lib/"), "src/lib");
        assert_eq!(normalize_path("."), "");
        assert_eq!(normalize_path(""), "");
    }

    #[test]
    fn dedupe_keeps_first_occurrence() {
        let unique = dedupe(paths(&["src/a.py", "./src/b.py", "./src/a.py", "src/b.py"]));
        assert_eq!(unique, paths(&["src/a.py", "src/b.py"]));
    }

    #[test]
    fn orders_ascending_by_timestamp() {
        let times = FixedTimes(HashMap::from([("a", 300), ("b", 100), ("c", 200)]));
        let ordered = order(paths(&["a", "b", "c"]), &times);
        let names: Vec<_> = ordered.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(names, ["b", "c", "a"]);
        assert!(ordered.windows(2).all(|w| w[0].modified < w[1].modified));
    }

    #[test]
    fn equal_timestamps_keep_discovery_order() {
        let times = FixedTimes(HashMap::from([("z.py", 50), ("a.py", 50), ("m.py", 10)]));
        let ordered = order(paths(&["z.py", "a.py", "m.py"]), &times);
        let names: Vec<_> = ordered.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(names, ["m.py", "z.py", "a.py"]);
    }

    #[test]
    fn unreadable_timestamps_are_dropped() {
        let times = FixedTimes(HashMap::from([("kept.py", 1)]));
        let ordered = order(paths(&["gone.py", "kept.py"]), &times);
        assert_eq!(
            ordered,
            vec![SelectedFile {
                path: "kept.py".to_string(),
                modified: 1
            }]
        );
    }
}
