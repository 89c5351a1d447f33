use crate::core::{ReleaseError, ReleaseResult};
use crate::di::Reporter;
use glob::{MatchOptions, Pattern};
use std::collections::{HashMap, HashSet};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};

/// Ordered, duplicate-free list of absolute file paths to upload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadPlan {
    pub files: Vec<PathBuf>,
}

impl UploadPlan {
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathBuf> {
        self.files.iter()
    }
}

/// Expands patterns relative to a root directory
pub struct AssetCollector<'a> {
    root: PathBuf,
    reporter: &'a dyn Reporter,
}

impl<'a> AssetCollector<'a> {
    pub fn new(root: impl Into<PathBuf>, reporter: &'a dyn Reporter) -> Self {
        Self {
            root: root.into(),
            reporter,
        }
    }

    /// Expand every pattern and build the upload plan
    ///
    /// Patterns matching nothing are reported as warnings. Fails with
    /// `NoFilesFound` only once every pattern has been tried.
    pub fn collect(&self, patterns: &[String]) -> ReleaseResult<UploadPlan> {
        let root = self.absolute_root()?;
        let mut seen = HashSet::new();
        let mut files = Vec::new();

        for pattern in patterns {
            let matched = expand(&root, pattern)?;
            if matched.is_empty() {
                self.reporter
                    .warning(&format!("No files matched pattern '{}'", pattern));
                continue;
            }

            debug!(pattern = %pattern, count = matched.len(), "pattern expanded");
            for path in matched {
                if seen.insert(path.clone()) {
                    files.push(path);
                }
            }
        }

        if files.is_empty() {
            return Err(ReleaseError::NoFilesFound(patterns.to_vec()));
        }

        self.warn_duplicate_names(&files);
        info!(count = files.len(), "collected files to upload");
        Ok(UploadPlan { files })
    }

    fn absolute_root(&self) -> ReleaseResult<PathBuf> {
        if self.root.is_absolute() {
            Ok(self.root.clone())
        } else {
            Ok(std::env::current_dir()?.join(&self.root))
        }
    }

    /// Different directories can yield the same asset name
    fn warn_duplicate_names(&self, files: &[PathBuf]) {
        let mut by_name: HashMap<&std::ffi::OsStr, &Path> = HashMap::new();
        for file in files {
            let Some(name) = file.file_name() else {
                continue;
            };
            if let Some(first) = by_name.get(name) {
                let message = format!(
                    "{} and {} share the asset name '{}'; the later upload collides with the earlier one",
                    first.display(),
                    file.display(),
                    name.to_string_lossy()
                );
                self.reporter.warning(&message);
            } else {
                by_name.insert(name, file);
            }
        }
    }
}

/// Regular files matching one pattern, in glob order
fn expand(root: &Path, pattern: &str) -> ReleaseResult<Vec<PathBuf>> {
    let (full_pattern, base) = if Path::new(pattern).is_absolute() {
        (pattern.to_string(), literal_prefix(Path::new(pattern)))
    } else {
        let escaped_root = Pattern::escape(&root.to_string_lossy());
        (
            format!("{}/{}", escaped_root.trim_end_matches('/'), pattern),
            root.join(literal_prefix(Path::new(pattern))),
        )
    };

    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    };
    let entries = glob::glob_with(&full_pattern, options).map_err(|e| {
        ReleaseError::InvalidInput(format!("Invalid pattern '{}': {}", pattern, e))
    })?;

    let base = normalize(&base);
    let mut files = Vec::new();
    for entry in entries {
        let path = match entry {
            Ok(path) => normalize(&path),
            Err(e) => {
                debug!(error = %e, "skipping unreadable match");
                continue;
            }
        };
        if is_regular_file(&path) && !under_symlink(&path, &base) {
            files.push(path);
        } else {
            debug!(path = %path.display(), "skipping non-regular match");
        }
    }
    Ok(files)
}

/// Leading components free of glob metacharacters
fn literal_prefix(pattern: &Path) -> PathBuf {
    pattern
        .components()
        .take_while(|c| {
            let s = c.as_os_str().to_string_lossy();
            !s.contains(&['*', '?', '['][..])
        })
        .collect()
}

/// Drop `.` components so `./dist/a` and `dist/a` dedupe
fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// Regular file per `lstat`; symlinks are not followed
fn is_regular_file(path: &Path) -> bool {
    std::fs::symlink_metadata(path)
        .map(|m| m.file_type().is_file())
        .unwrap_or(false)
}

/// Whether a directory between `base` and `path` is a symlink
fn under_symlink(path: &Path, base: &Path) -> bool {
    path.ancestors()
        .skip(1)
        .take_while(|dir| *dir != base && dir.starts_with(base))
        .any(|dir| {
            std::fs::symlink_metadata(dir)
                .map(|m| m.file_type().is_symlink())
                .unwrap_or(false)
        })
}
