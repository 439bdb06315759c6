//! Writing projections to disk.

use std::path::Path;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tracing::debug;

use crate::error::{ProjectError, ProjectResult};

const INDENT: &[u8] = b"    ";

/// Serialize `value` as JSON indented by four spaces, without a trailing
/// newline.
pub fn to_json_bytes<T: Serialize>(value: &T) -> serde_json::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    value.serialize(&mut ser)?;
    Ok(buf)
}

/// Write `value` to `path`, replacing whatever is there.
pub fn persist_projection<T: Serialize>(value: &T, path: &Path) -> ProjectResult<()> {
    let bytes = to_json_bytes(value).map_err(|e| ProjectError::Io {
        path: path.to_path_buf(),
        source: std::io::Error::other(e),
    })?;
    std::fs::write(path, &bytes).map_err(|source| ProjectError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), size = bytes.len(), "wrote projection");
    Ok(())
}
