//! Graft - maps a source directory onto a virtual instance tree manifest

pub mod config;
pub mod error;
pub mod naming;
pub mod output;
pub mod tree;

pub use config::Config;
pub use error::Error;
pub use naming::{Namer, NamingConvention};
pub use output::{to_json, write_manifest};
pub use tree::{Manifest, TreeBuilder, TreeNode, Walker, build_manifest};
