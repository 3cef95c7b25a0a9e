/*!
 * Built-in pattern lists and small helpers for promptfs
 */

use once_cell::sync::Lazy;

/// Name of the output file when `-o` is not given
pub const DEFAULT_OUTPUT_FILE: &str = "prompt_script.txt";

/// Ignore patterns injected unless test artifacts are requested with `-t`
pub const TEST_MARKERS: &[&str] = &["test", "tests", "*_test.*", "mock"];

/// Format a human-readable file size
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}

/// Default patterns to ignore.
///
/// Mostly build, dependency, VCS and editor directory names. Each entry is
/// matched against whole path components, so `build` prunes `build/` and
/// `web/build/` but leaves `builder/` alone. Override with `-a`.
pub static DEFAULT_IGNORE: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        // Version Control
        ".git",
        ".svn",
        ".hg",
        ".bzr",
        // Dependencies
        "node_modules",
        "bower_components",
        ".npm",
        ".yarn",
        ".pnpm-store",
        "vendor",
        "package-lock.json",
        "yarn.lock",
        "pnpm-lock.yaml",
        "composer.lock",
        "poetry.lock",
        "Cargo.lock",
        // Build & Dist
        "dist",
        "build",
        "out",
        "bin",
        "obj",
        "install",
        "*.min.js",
        "*.min.css",
        // Python
        "__pycache__",
        ".pytest_cache",
        ".mypy_cache",
        ".ruff_cache",
        ".tox",
        "venv",
        ".venv",
        "env",
        "*.egg-info",
        // Rust
        "target",
        ".cargo",
        // IDEs & Editors
        ".idea",
        ".vscode",
        ".vs",
        // Caches & Temp
        ".cache",
        ".sass-cache",
        "tmp",
        "temp",
        "logs",
        // Other Build Tools
        ".gradle",
        ".m2",
        "CMakeFiles",
        // JavaScript/TypeScript
        "coverage",
        ".nyc_output",
        ".next",
        ".nuxt",
        ".turbo",
        ".parcel-cache",
        // Mobile Development
        "Pods/",
        "xcuserdata",
        ".expo",
        ".dart_tool",
        // Infrastructure
        ".terraform",
        ".kube",
    ]
});

/// File selectors used when no `-O` file pattern is given.
///
/// Source and configuration files worth showing a language model. Replaced
/// wholesale by `-O <pattern>`, extended by `-a <pattern>`.
pub static DEFAULT_SELECTORS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        // Systems
        "*.rs",
        "*.c",
        "*.h",
        "*.cc",
        "*.cpp",
        "*.hpp",
        "*.go",
        "*.zig",
        // JVM & .NET
        "*.java",
        "*.kt",
        "*.kts",
        "*.scala",
        "*.cs",
        "*.gradle",
        // Scripting
        "*.py",
        "*.rb",
        "*.php",
        "*.pl",
        "*.lua",
        "*.sh",
        "*.bash",
        "*.zsh",
        "*.ps1",
        // Web
        "*.js",
        "*.jsx",
        "*.mjs",
        "*.cjs",
        "*.ts",
        "*.tsx",
        "*.vue",
        "*.svelte",
        "*.html",
        "*.css",
        "*.scss",
        // Mobile
        "*.swift",
        "*.m",
        "*.dart",
        // Functional
        "*.hs",
        "*.ml",
        "*.ex",
        "*.exs",
        "*.erl",
        "*.clj",
        // Data & schema
        "*.sql",
        "*.proto",
        "*.graphql",
        // Config
        "*.toml",
        "*.yaml",
        "*.yml",
        "*.json",
        "*.xml",
        "*.ini",
        "*.cfg",
        // Build files
        "Dockerfile",
        "Makefile",
        "CMakeLists.txt",
        "requirements.txt",
        "Gemfile",
        "Pipfile",
    ]
});
