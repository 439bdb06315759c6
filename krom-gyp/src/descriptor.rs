//! The JSON build descriptor written by `kmake --json`.

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{ProjectError, ProjectResult};

/// Parsed descriptor.
///
/// Keys are kept optional at parse time so that a missing key surfaces as
/// [`ProjectError::MissingField`] from the step that needs it, rather than
/// as a parse failure or an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpstreamDescriptor {
    #[serde(default)]
    pub files: Option<Vec<String>>,
    #[serde(default)]
    pub includes: Option<Vec<String>>,
    #[serde(default)]
    pub defines: Option<Vec<String>>,
    #[serde(default)]
    pub libraries: Option<Vec<String>>,
}

fn required<'a>(value: &'a Option<Vec<String>>, field: &'static str) -> ProjectResult<&'a [String]> {
    value
        .as_deref()
        .ok_or(ProjectError::MissingField { field })
}

impl UpstreamDescriptor {
    pub fn files(&self) -> ProjectResult<&[String]> {
        required(&self.files, "files")
    }

    pub fn includes(&self) -> ProjectResult<&[String]> {
        required(&self.includes, "includes")
    }

    pub fn defines(&self) -> ProjectResult<&[String]> {
        required(&self.defines, "defines")
    }

    pub fn libraries(&self) -> ProjectResult<&[String]> {
        required(&self.libraries, "libraries")
    }

    /// Parse a descriptor from JSON text. `path` is only used for errors.
    ///
    /// The top level must be a JSON object.
    pub fn from_json(text: &str, path: &Path) -> ProjectResult<Self> {
        let parse_error = |source: serde_json::Error| ProjectError::Parse {
            path: path.to_path_buf(),
            source,
        };
        let value: Value = serde_json::from_str(text).map_err(parse_error)?;
        if !value.is_object() {
            return Err(parse_error(serde::de::Error::custom(
                "descriptor must be a JSON object",
            )));
        }
        serde_json::from_value(value).map_err(parse_error)
    }
}

/// Read and parse the descriptor at `path`.
pub fn load_descriptor(path: &Path) -> ProjectResult<UpstreamDescriptor> {
    let text = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ProjectError::DescriptorNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ProjectError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    let descriptor = UpstreamDescriptor::from_json(&text, path)?;
    debug!(
        path = %path.display(),
        files = descriptor.files.as_ref().map_or(0, Vec::len),
        includes = descriptor.includes.as_ref().map_or(0, Vec::len),
        defines = descriptor.defines.as_ref().map_or(0, Vec::len),
        libraries = descriptor.libraries.as_ref().map_or(0, Vec::len),
        "loaded descriptor"
    );
    Ok(descriptor)
}
