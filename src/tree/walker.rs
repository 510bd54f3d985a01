//! Walker - lazy, pruned iteration over candidate source files

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::Config;
use crate::error::Error;

/// Depth-first iterator over files under a base directory.
///
/// Directories whose path (relative to the base, forward-slash joined)
/// appears in the blacklist are pruned before descent, so nothing beneath
/// them is ever visited. Only files whose name ends with the configured
/// extension are yielded. Entries at each level are visited in file-name
/// order, which keeps traversal deterministic for a fixed filesystem
/// snapshot.
#[derive(Debug)]
pub struct Walker {
    base: PathBuf,
    extension: String,
    blacklist: HashSet<String>,
    // Pending paths, reverse-sorted so pop() yields name order.
    stack: Vec<PathBuf>,
}

impl Walker {
    /// Errors if the base directory does not exist.
    pub fn new(config: &Config) -> Result<Self, Error> {
        let base = config.base_path.clone();
        if !base.is_dir() {
            return Err(Error::MissingBaseDir(base));
        }

        let blacklist = config
            .blacklisted_subdirs
            .iter()
            .map(|s| s.trim_matches('/').to_string())
            .collect();

        let mut walker = Self {
            base,
            extension: config.file_extension.clone(),
            blacklist,
            stack: Vec::new(),
        };
        let root = walker.base.clone();
        walker.push_dir(&root);
        Ok(walker)
    }

    /// The path relative to the base, forward-slash joined.
    fn relative_key(&self, path: &Path) -> Option<String> {
        let rel = path.strip_prefix(&self.base).ok()?;
        let parts: Vec<String> = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        Some(parts.join("/"))
    }

    fn push_dir(&mut self, dir: &Path) {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "skipping unreadable directory");
                return;
            }
        };
        let mut paths: Vec<PathBuf> = entries.filter_map(|e| e.ok()).map(|e| e.path()).collect();
        paths.sort();
        paths.reverse();
        self.stack.extend(paths);
    }
}

impl Iterator for Walker {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        while let Some(path) = self.stack.pop() {
            // Skip symlinks to prevent cycles from symlinked directories.
            if path.is_symlink() {
                continue;
            }
            if path.is_dir() {
                if let Some(key) = self.relative_key(&path) {
                    if self.blacklist.contains(&key) {
                        debug!(dir = %path.display(), "pruning blacklisted subtree");
                        continue;
                    }
                }
                self.push_dir(&path);
            } else if path.is_file() {
                let matches = path
                    .file_name()
                    .is_some_and(|n| n.to_string_lossy().ends_with(&self.extension));
                if matches {
                    return Some(path);
                }
            }
        }
        None
    }
}
