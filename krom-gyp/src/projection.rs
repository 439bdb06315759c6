//! Descriptor → gyp include projections.

use serde::{Deserialize, Serialize};

use crate::config::{LibrariesConfig, SourcesConfig};
use crate::descriptor::UpstreamDescriptor;
use crate::error::ProjectResult;
use crate::platform::Platform;

/// Contents of `krom.gypi`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceProjection {
    pub sources: Vec<String>,
    pub include_dirs: Vec<String>,
    pub defines: Vec<String>,
}

/// Contents of `krom_libs.gypi`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryProjection {
    pub libraries: Vec<String>,
}

/// Replace every backslash with a forward slash. Nothing else is touched.
pub fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}

/// Build the source projection: the entry point followed by the
/// descriptor's files, its include dirs, and the fixed define followed by
/// the descriptor's defines. Input order is preserved.
pub fn project_sources(
    descriptor: &UpstreamDescriptor,
    cfg: &SourcesConfig,
) -> ProjectResult<SourceProjection> {
    let files = descriptor.files()?;
    let includes = descriptor.includes()?;
    let defines = descriptor.defines()?;

    let sources = std::iter::once(cfg.entry_point.clone())
        .chain(files.iter().map(|f| normalize_path(f)))
        .collect();
    let include_dirs = includes.iter().map(|i| normalize_path(i)).collect();
    let defines = std::iter::once(cfg.define.clone())
        .chain(defines.iter().cloned())
        .collect();

    Ok(SourceProjection {
        sources,
        include_dirs,
        defines,
    })
}

/// Build the library projection. On `cfg.platform` the fixed library comes
/// first; on any other platform the descriptor's libraries are copied as-is.
pub fn project_libraries(
    descriptor: &UpstreamDescriptor,
    platform: &Platform,
    cfg: &LibrariesConfig,
) -> ProjectResult<LibraryProjection> {
    let libs = descriptor.libraries()?;

    let mut libraries = Vec::with_capacity(libs.len() + 1);
    if platform.is(&cfg.platform) {
        libraries.push(cfg.library.clone());
    }
    libraries.extend(libs.iter().cloned());

    Ok(LibraryProjection { libraries })
}
