//! Reads a deploy spec document from disk.

use std::path::Path;

use qd2_common::QudittoDeploySpec;

use crate::domain::error::SpecError;
use crate::domain::spec::parse_document;

/// Read and parse the spec at `path`. Semantic validation is left to the
/// use-case that knows what the spec is for.
///
/// # Errors
///
/// Returns [`SpecError::Read`] when the file cannot be read and
/// [`SpecError::Malformed`] when it is not a well-formed spec document.
pub fn load_spec(path: &Path) -> Result<QudittoDeploySpec, SpecError> {
    let document = std::fs::read_to_string(path).map_err(|source| SpecError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = document.len(), "read deploy spec");
    parse_document(&document)
}
