//! Manifest serialization

use std::fs;
use std::path::Path;

use crate::error::Error;
use crate::tree::Manifest;

/// Render the manifest as pretty-printed JSON with a trailing newline.
///
/// Key order follows insertion order, so output is stable run to run.
pub fn to_json(manifest: &Manifest) -> Result<String, Error> {
    let mut json = serde_json::to_string_pretty(manifest)?;
    json.push('\n');
    Ok(json)
}

/// Write the manifest to `path`, overwriting any existing file.
pub fn write_manifest(manifest: &Manifest, path: &Path) -> Result<(), Error> {
    let json = to_json(manifest)?;
    fs::write(path, json).map_err(|source| Error::WriteManifest {
        path: path.to_path_buf(),
        source,
    })
}
