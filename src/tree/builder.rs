//! TreeBuilder - folds discovered files into the manifest tree
//!
//! Each file is decomposed, routed to one of the two root anchors,
//! classified against the naming conventions, and inserted. Promotion
//! claims are tracked per run in a set owned by the builder, so separate
//! runs never see each other's state.

use std::collections::HashSet;
use std::path::Path;

use tracing::debug;

use crate::config::Config;
use crate::error::Error;
use crate::naming::Namer;
use crate::tree::node::{Manifest, TreeNode};

/// Where a file lands and what it is called there.
#[derive(Debug, PartialEq)]
struct Placement {
    promoted: bool,
    routed: bool,
    /// Namer-transformed directory segments from the scan root to the
    /// file's containing folder.
    folder: Vec<String>,
    name: String,
    /// Forward-slash file reference, prefixed with the source path prefix.
    source: String,
}

#[derive(Debug)]
pub struct TreeBuilder<'a> {
    config: &'a Config,
    namer: Namer,
    tree: TreeNode,
    claimed: HashSet<String>,
}

impl<'a> TreeBuilder<'a> {
    /// Seed a builder with the config's skeleton tree.
    ///
    /// Errors if either root anchor path does not resolve to a folder in
    /// the skeleton.
    pub fn new(config: &'a Config) -> Result<Self, Error> {
        let tree = config.tree.clone();
        for (which, path) in [
            ("shared", &config.shared_root_path),
            ("routed", &config.routed_root_path),
        ] {
            let mut node = &tree;
            for key in path {
                node = node.child(key).ok_or_else(|| Error::RootNotFound {
                    which,
                    path: path.clone(),
                })?;
            }
            if !node.is_folder() {
                return Err(Error::RootNotFound {
                    which,
                    path: path.clone(),
                });
            }
        }
        Ok(Self {
            config,
            namer: Namer::new(config.naming_convention),
            tree,
            claimed: HashSet::new(),
        })
    }

    /// Fold one discovered file into the tree.
    pub fn insert(&mut self, file: &Path) -> Result<(), Error> {
        let placement = self.place(file)?;
        // Claim keys are case-folded so that case-variant directories,
        // which merge into one tree node, also share one claim.
        let folder_key = placement.folder.join("/").to_ascii_lowercase();

        if placement.promoted {
            // The file stands in for its parent folder: insert on the
            // grandparent and claim the folder's own key.
            let parent = &placement.folder[..placement.folder.len().saturating_sub(1)];
            let root_path = self.root_path(placement.routed);
            let node = Self::resolve(&mut self.tree, &root_path, parent);
            node.set_child(&placement.name, TreeNode::leaf(placement.source));
            self.claimed.insert(folder_key);
            return Ok(());
        }

        if self.is_claimed(&placement.folder) {
            debug!(file = %file.display(), folder = %folder_key, "dropping file in claimed folder");
            return Ok(());
        }

        let root_path = self.root_path(placement.routed);
        let node = Self::resolve(&mut self.tree, &root_path, &placement.folder);
        node.set_child(&placement.name, TreeNode::leaf(placement.source));
        Ok(())
    }

    /// Consume the builder, producing the finished manifest.
    pub fn finish(self) -> Manifest {
        Manifest {
            name: self.config.name.clone(),
            tree: self.tree,
        }
    }

    fn root_path(&self, routed: bool) -> Vec<String> {
        if routed {
            self.config.routed_root_path.clone()
        } else {
            self.config.shared_root_path.clone()
        }
    }

    /// Whether the folder, or any folder above it, has been promoted.
    /// Prefixes are case-folded to match the keys in `claimed`.
    fn is_claimed(&self, folder: &[String]) -> bool {
        let mut key = String::new();
        for segment in folder {
            if !key.is_empty() {
                key.push('/');
            }
            key.push_str(&segment.to_ascii_lowercase());
            if self.claimed.contains(&key) {
                return true;
            }
        }
        // A promoted file at the scan root claims the empty key.
        self.claimed.contains("")
    }

    /// Walk from the tree root through the anchor keys, then through the
    /// folder segments, creating folders as needed.
    fn resolve<'t>(tree: &'t mut TreeNode, anchor: &[String], folder: &[String]) -> &'t mut TreeNode {
        let mut node = tree;
        for key in anchor {
            node = node.ensure_folder(key);
        }
        for segment in folder {
            node = node.ensure_folder(segment);
        }
        node
    }

    /// Decompose, route, and classify a file path.
    fn place(&self, file: &Path) -> Result<Placement, Error> {
        let rel = file
            .strip_prefix(&self.config.base_path)
            .map_err(|_| Error::OutsideBasePath(file.to_path_buf()))?;
        let parts: Vec<String> = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();

        let file_name = parts.last().cloned().unwrap_or_default();
        let base_name = file_name
            .strip_suffix(&self.config.file_extension)
            .unwrap_or(&file_name)
            .to_string();

        let dir_parts = &parts[..parts.len().saturating_sub(1)];
        let folder: Vec<String> = dir_parts.iter().map(|p| self.namer.apply(p)).collect();
        let parent_name = folder.last().cloned().unwrap_or_default();

        let routed = self.config.routes(&base_name);
        let promoted = self.config.is_promoted(&base_name);

        let name = if promoted {
            parent_name
        } else if self.config.is_compound(&base_name) {
            format!("{}{}", parent_name, self.namer.apply(&base_name))
        } else {
            base_name.clone()
        };

        // Promoted files reference their containing directory; the build
        // tool resolves the concrete file from there.
        let source_parts = if promoted { dir_parts } else { &parts[..] };
        let mut source = self.config.source_path_prefix.clone();
        for part in source_parts {
            if !source.is_empty() {
                source.push('/');
            }
            source.push_str(part);
        }

        Ok(Placement {
            promoted,
            routed,
            folder,
            name,
            source,
        })
    }
}
