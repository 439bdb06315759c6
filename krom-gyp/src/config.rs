//! Configuration types for `krom-gyp.toml`.
//!
//! Every key is optional. The defaults reproduce the Krom layout: `kmake`
//! under `Kinc/Tools/windows_x64`, the descriptor at `build/Krom.json` and
//! the two gyp include files next to the config.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Root configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub generator: GeneratorConfig,
    pub descriptor: DescriptorConfig,
    pub sources: SourcesConfig,
    pub libraries: LibrariesConfig,
}

/// The external build-description generator.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Executable to run, relative to the base directory unless absolute
    /// or a bare command name.
    pub program: PathBuf,
    /// Arguments passed to the generator (the JSON output flag).
    pub args: Vec<String>,
    /// When false, the descriptor on disk is projected as-is.
    pub enabled: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from("Kinc/Tools/windows_x64/kmake.exe"),
            args: vec!["--json".to_string()],
            enabled: true,
        }
    }
}

/// Where the generator deposits its JSON descriptor.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DescriptorConfig {
    pub path: PathBuf,
}

impl Default for DescriptorConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("build/Krom.json"),
        }
    }
}

/// Settings for the source projection (`krom.gypi`).
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourcesConfig {
    /// Always emitted first in `sources`.
    pub entry_point: String,
    /// Always emitted first in `defines`.
    pub define: String,
    pub output: PathBuf,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            entry_point: "src/krom/main.cpp".to_string(),
            define: "KINC_NO_MAIN".to_string(),
            output: PathBuf::from("krom.gypi"),
        }
    }
}

/// Settings for the library projection (`krom_libs.gypi`).
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LibrariesConfig {
    /// The one platform identifier that gets `library` prepended.
    pub platform: String,
    pub library: String,
    pub output: PathBuf,
}

impl Default for LibrariesConfig {
    fn default() -> Self {
        Self {
            platform: "win32".to_string(),
            library: "OleAut32".to_string(),
            output: PathBuf::from("krom_libs.gypi"),
        }
    }
}

impl Config {
    /// Resolve `path` against `base_dir` unless it is already absolute.
    pub fn resolve(path: &Path, base_dir: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            base_dir.join(path)
        }
    }
}

/// Load and parse a `krom-gyp.toml` configuration file.
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read config file {}: {}", path.display(), e))?;
    let config: Config = toml::from_str(&content)
        .map_err(|e| anyhow::anyhow!("failed to parse config file {}: {}", path.display(), e))?;
    Ok(config)
}
