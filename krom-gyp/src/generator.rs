//! Running the external build-description generator (`kmake --json`).

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, info, warn};

use crate::config::GeneratorConfig;
use crate::error::{ProjectError, ProjectResult};

/// Captured output of a successful generator run.
#[derive(Debug, Clone, Default)]
pub struct GeneratorOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Work out what to execute for `program`.
///
/// Bare command names are left for `PATH` lookup. Anything with a directory
/// component is resolved against `base_dir`, and that directory must exist.
fn resolve_program(program: &Path, base_dir: &Path) -> ProjectResult<PathBuf> {
    let has_dir = program
        .parent()
        .is_some_and(|p| !p.as_os_str().is_empty());
    if !has_dir {
        return Ok(program.to_path_buf());
    }

    let joined = if program.is_absolute() {
        program.to_path_buf()
    } else {
        base_dir.join(program)
    };
    let resolved = std::path::absolute(&joined).map_err(|source| ProjectError::Io {
        path: joined.clone(),
        source,
    })?;

    match resolved.parent() {
        Some(dir) if !dir.is_dir() => Err(ProjectError::Environment {
            path: dir.to_path_buf(),
        }),
        _ => Ok(resolved),
    }
}

/// Run the generator in `base_dir` and wait for it to finish.
///
/// The generator is expected to write its descriptor as a side effect.
/// Its output is not interpreted: stdout is logged at debug level and, on
/// success, stderr is logged as warnings.
pub fn generate_descriptor(cfg: &GeneratorConfig, base_dir: &Path) -> ProjectResult<GeneratorOutput> {
    let program = resolve_program(&cfg.program, base_dir)?;
    let program_name = cfg.program.display().to_string();
    info!(program = %program_name, args = ?cfg.args, "running generator");

    let output = Command::new(&program)
        .args(&cfg.args)
        .current_dir(base_dir)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| ProjectError::Process {
            program: program_name.clone(),
            reason: e.to_string(),
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    for line in stdout.lines() {
        debug!(target: "krom_gyp::generator::stdout", "{line}");
    }

    if !output.status.success() {
        let mut reason = match output.status.code() {
            Some(code) => format!("exit code {code}"),
            None => "terminated by signal".to_string(),
        };
        let stderr = stderr.trim();
        if !stderr.is_empty() {
            reason.push_str(": ");
            reason.push_str(stderr);
        }
        return Err(ProjectError::Process {
            program: program_name,
            reason,
        });
    }

    for line in stderr.lines().filter(|l| !l.trim().is_empty()) {
        warn!(target: "krom_gyp::generator::stderr", "{line}");
    }

    Ok(GeneratorOutput { stdout, stderr })
}
