//! Config loading and validation
//!
//! The config is a single JSON document holding every convention the
//! generator applies: where to scan, how filenames route and rename, and
//! the skeleton tree the discovered files are grafted onto. It is loaded
//! once and never mutated.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Error;
use crate::naming::NamingConvention;
use crate::tree::TreeNode;

/// Generator configuration.
///
/// All fields except `namingConvention` are required; a missing field is a
/// fatal parse error. `basePath` and `outputPath` are resolved relative to
/// the config file's directory.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Manifest name emitted at the top of the output document.
    pub name: String,
    /// Root directory to scan for source files.
    pub base_path: PathBuf,
    /// Prefix prepended to every emitted file reference.
    pub source_path_prefix: String,
    /// Filename suffix selecting candidate files, e.g. ".luau".
    pub file_extension: String,
    /// Where the manifest is written.
    pub output_path: PathBuf,
    /// Substrings of a base name that send the file to the routed root.
    pub routing_keywords: Vec<String>,
    /// Base names (case-insensitive) that promote their parent folder.
    pub promoted_names: Vec<String>,
    /// Base names whose node name is prefixed with the parent folder name.
    pub compound_names: Vec<String>,
    #[serde(default)]
    pub naming_convention: NamingConvention,
    /// Subtrees (relative to `basePath`, forward slashes) pruned entirely.
    pub blacklisted_subdirs: Vec<String>,
    /// Key path of the shared root inside the skeleton tree.
    pub shared_root_path: Vec<String>,
    /// Key path of the routed root inside the skeleton tree.
    pub routed_root_path: Vec<String>,
    /// Starting tree shape; discovered files are inserted under the two
    /// root anchors.
    pub tree: TreeNode,
}

impl Config {
    /// Load a config from a JSON file, resolving relative paths against
    /// the file's directory.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let text = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Config =
            serde_json::from_str(&text).map_err(|source| Error::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;

        if let Some(dir) = path.parent() {
            if config.base_path.is_relative() {
                config.base_path = dir.join(&config.base_path);
            }
            if config.output_path.is_relative() {
                config.output_path = dir.join(&config.output_path);
            }
        }
        Ok(config)
    }

    /// Check whether a lowercased base name routes to the routed root.
    pub fn routes(&self, base_name: &str) -> bool {
        let lowered = base_name.to_lowercase();
        self.routing_keywords
            .iter()
            .any(|kw| lowered.contains(&kw.to_lowercase()))
    }

    /// Case-insensitive membership in `promotedNames`.
    pub fn is_promoted(&self, base_name: &str) -> bool {
        self.promoted_names
            .iter()
            .any(|n| n.eq_ignore_ascii_case(base_name))
    }

    /// Case-insensitive membership in `compoundNames`.
    pub fn is_compound(&self, base_name: &str) -> bool {
        self.compound_names
            .iter()
            .any(|n| n.eq_ignore_ascii_case(base_name))
    }
}
