//! Virtual tree construction
//!
//! The walker discovers candidate files and the builder folds each one
//! into the manifest tree, applying routing, naming, and promotion rules.

mod builder;
mod node;
mod walker;

pub use builder::TreeBuilder;
pub use node::{Manifest, TreeNode};
pub use walker::Walker;

use crate::config::Config;
use crate::error::Error;

/// Run the full transform: walk the base directory and fold every
/// candidate file into the config's skeleton tree.
pub fn build_manifest(config: &Config) -> Result<Manifest, Error> {
    let walker = Walker::new(config)?;
    let mut builder = TreeBuilder::new(config)?;
    for file in walker {
        builder.insert(&file)?;
    }
    Ok(builder.finish())
}
