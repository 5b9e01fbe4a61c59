//! Force-ignore value object
//!
//! Loads `.forceignore` patterns and matches paths with gitignore semantics.
//! Resolution consults it before adapter dispatch; transformers consult it
//! before emitting a write.

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

use crate::domain::ports::IgnoreFilter;

/// Default ignore file name
pub const FORCE_IGNORE_FILE: &str = ".forceignore";

/// Maximum file size for the ignore file (64KB)
const MAX_FILE_SIZE: u64 = 65536;

/// Maximum number of patterns allowed
const MAX_PATTERNS: usize = 1000;

/// Patterns that apply even without an ignore file
const DEFAULT_PATTERNS: [&str; 4] = [
    "**/*.dup",
    "**/.*",
    "**/package2-descriptor.json",
    "**/package2-manifest.json",
];

/// Patterns loaded from a `.forceignore` file.
///
/// Uses the `ignore` crate for gitignore-compatible pattern matching.
#[derive(Debug)]
pub struct ForceIgnore {
    root: PathBuf,
    matcher: Gitignore,
    pattern_count: usize,
}

impl Default for ForceIgnore {
    fn default() -> Self {
        Self::empty()
    }
}

impl ForceIgnore {
    /// A filter that denies nothing, not even the default patterns.
    pub fn empty() -> Self {
        Self {
            root: PathBuf::new(),
            matcher: Gitignore::empty(),
            pattern_count: 0,
        }
    }

    /// Only the built-in default patterns, rooted at `root`.
    pub fn with_defaults(root: &Path) -> Result<Self, IgnoreError> {
        Self::from_content(root, &root.join(FORCE_IGNORE_FILE), "")
    }

    /// Load `<root>/<file_name>` plus the default patterns.
    ///
    /// A missing file yields the defaults only.
    pub fn load(root: &Path, file_name: &str) -> Result<Self, IgnoreError> {
        let ignore_path = root.join(file_name);

        if !ignore_path.exists() {
            return Self::with_defaults(root);
        }

        let metadata = fs::metadata(&ignore_path).map_err(IgnoreError::Io)?;
        if metadata.len() > MAX_FILE_SIZE {
            return Err(IgnoreError::FileTooLarge {
                path: ignore_path,
                size: metadata.len(),
                limit: MAX_FILE_SIZE,
            });
        }

        let content = fs::read_to_string(&ignore_path).map_err(IgnoreError::Io)?;
        Self::from_content(root, &ignore_path, &content)
    }

    /// Parse patterns from string content, on top of the defaults.
    pub fn from_content(root: &Path, source_path: &Path, content: &str) -> Result<Self, IgnoreError> {
        let mut builder = GitignoreBuilder::new(root);
        for pattern in DEFAULT_PATTERNS {
            builder
                .add_line(None, pattern)
                .map_err(|e| IgnoreError::BuildFailed(e.to_string()))?;
        }

        let mut pattern_count = 0;
        for (line_num, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            pattern_count += 1;
            if pattern_count > MAX_PATTERNS {
                return Err(IgnoreError::TooManyPatterns {
                    path: source_path.to_path_buf(),
                    count: pattern_count,
                    limit: MAX_PATTERNS,
                });
            }

            if let Err(e) = builder.add_line(Some(source_path.to_path_buf()), trimmed) {
                return Err(IgnoreError::InvalidPattern {
                    path: source_path.to_path_buf(),
                    line: line_num + 1,
                    pattern: line.to_string(),
                    message: e.to_string(),
                });
            }
        }

        let matcher = builder
            .build()
            .map_err(|e| IgnoreError::BuildFailed(e.to_string()))?;

        Ok(Self {
            root: root.to_path_buf(),
            matcher,
            pattern_count,
        })
    }

    /// Check whether a path is ignored.
    ///
    /// Absolute paths outside the root are never ignored.
    pub fn is_ignored(&self, path: &Path, is_dir: bool) -> bool {
        let Some(relative) = self.relative(path) else {
            return false;
        };
        if relative.as_os_str().is_empty() {
            return false;
        }
        self.matcher
            .matched_path_or_any_parents(&relative, is_dir)
            .is_ignore()
    }

    fn relative(&self, path: &Path) -> Option<PathBuf> {
        let stripped = if path.has_root() {
            if !self.root.has_root() {
                return None;
            }
            path.strip_prefix(&self.root).ok()?
        } else {
            path.strip_prefix(&self.root).unwrap_or(path)
        };
        Some(
            stripped
                .components()
                .filter(|c| matches!(c, Component::Normal(_)))
                .collect(),
        )
    }

    /// Number of user patterns loaded (defaults excluded).
    pub fn pattern_count(&self) -> usize {
        self.pattern_count
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl IgnoreFilter for ForceIgnore {
    fn denies(&self, path: &Path) -> bool {
        self.is_ignored(path, false)
    }

    fn denies_dir(&self, path: &Path) -> bool {
        self.is_ignored(path, true)
    }
}

/// Errors that can occur when loading ignore patterns.
#[derive(Debug, Error)]
pub enum IgnoreError {
    #[error("{} exceeds {}KB limit ({size} bytes)", .path.display(), .limit / 1024)]
    FileTooLarge { path: PathBuf, size: u64, limit: u64 },

    #[error("{} has {count} patterns, exceeds {limit} limit", .path.display())]
    TooManyPatterns {
        path: PathBuf,
        count: usize,
        limit: usize,
    },

    #[error("invalid pattern at {}:{line}: '{pattern}' - {message}", .path.display())]
    InvalidPattern {
        path: PathBuf,
        line: usize,
        pattern: String,
        message: String,
    },

    #[error("failed to build ignore matcher: {0}")]
    BuildFailed(String),

    #[error("IO error reading ignore file: {0}")]
    Io(#[source] std::io::Error),
}
