//! krom-gyp — project `kmake --json` build descriptors into gyp include files.
//!
//! Runs the Kinc build-description generator, reads the JSON descriptor it
//! leaves behind and writes two gyp include files: `krom.gypi` (sources,
//! include dirs, defines) and `krom_libs.gypi` (link libraries).
//!
//! # Quick start
//!
//! ```no_run
//! use std::path::Path;
//! use krom_gyp::platform::Platform;
//!
//! // Reads the config, runs kmake, writes both .gypi files.
//! krom_gyp::run(Some(Path::new("krom-gyp.toml")), &Platform::host()).unwrap();
//! ```
//!
//! Or project an existing descriptor without touching the disk:
//!
//! ```no_run
//! use std::path::Path;
//! use krom_gyp::{config::Config, platform::Platform};
//!
//! let (sources, libraries) =
//!     krom_gyp::project(&Config::default(), Path::new("."), &Platform::from("linux")).unwrap();
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

pub mod config;
pub mod descriptor;
pub mod error;
pub mod generator;
pub mod persist;
pub mod platform;
pub mod projection;

use config::Config;
use platform::Platform;
use projection::{LibraryProjection, SourceProjection};

/// Paths of the files written by [`run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Written {
    pub sources: PathBuf,
    pub libraries: PathBuf,
}

/// Run the full pipeline from a config file.
///
/// With `config_path` set, the file is loaded and relative paths resolve
/// against its directory. Without it the built-in defaults apply, relative
/// to the current directory.
pub fn run(config_path: Option<&Path>, platform: &Platform) -> Result<Written> {
    let cfg = match config_path {
        Some(path) => config::load_config(path)?,
        None => Config::default(),
    };
    run_from_config(&cfg, base_dir_for(config_path), platform)
}

/// The directory relative paths resolve against: the config file's parent,
/// or `.` when there is no config file.
pub fn base_dir_for(config_path: Option<&Path>) -> &Path {
    config_path
        .and_then(Path::parent)
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
}

/// Generate the descriptor, project it and write both projections.
///
/// Steps run in order and the first failure ends the run. A failure after
/// `krom.gypi` is written leaves that file in place.
pub fn run_from_config(cfg: &Config, base_dir: &Path, platform: &Platform) -> Result<Written> {
    if cfg.generator.enabled {
        generator::generate_descriptor(&cfg.generator, base_dir)
            .context("generating build descriptor")?;
    }

    let descriptor = load(cfg, base_dir)?;

    let sources_path = Config::resolve(&cfg.sources.output, base_dir);
    let sources = projection::project_sources(&descriptor, &cfg.sources)?;
    persist::persist_projection(&sources, &sources_path)?;
    info!(
        path = %sources_path.display(),
        sources = sources.sources.len(),
        include_dirs = sources.include_dirs.len(),
        defines = sources.defines.len(),
        "wrote source projection"
    );

    let libraries_path = Config::resolve(&cfg.libraries.output, base_dir);
    let libraries = projection::project_libraries(&descriptor, platform, &cfg.libraries)?;
    persist::persist_projection(&libraries, &libraries_path)?;
    info!(
        path = %libraries_path.display(),
        platform = %platform,
        libraries = libraries.libraries.len(),
        "wrote library projection"
    );

    Ok(Written {
        sources: sources_path,
        libraries: libraries_path,
    })
}

/// Load the descriptor on disk and return both projections without running
/// the generator or writing anything.
pub fn project(
    cfg: &Config,
    base_dir: &Path,
    platform: &Platform,
) -> Result<(SourceProjection, LibraryProjection)> {
    let descriptor = load(cfg, base_dir)?;
    let sources = projection::project_sources(&descriptor, &cfg.sources)?;
    let libraries = projection::project_libraries(&descriptor, platform, &cfg.libraries)?;
    Ok((sources, libraries))
}

fn load(cfg: &Config, base_dir: &Path) -> Result<descriptor::UpstreamDescriptor> {
    let path = Config::resolve(&cfg.descriptor.path, base_dir);
    let descriptor = descriptor::load_descriptor(&path)?;
    info!(path = %path.display(), "loaded descriptor");
    Ok(descriptor)
}
