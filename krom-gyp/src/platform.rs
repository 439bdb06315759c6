//! Host platform identifier.

use std::fmt;

/// A platform identifier such as `win32` or `linux`.
///
/// Passed explicitly to [`project_libraries`](crate::projection::project_libraries)
/// so the platform branch does not depend on the process it runs in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Platform(String);

impl Platform {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier of the platform this binary was compiled for.
    pub fn host() -> Self {
        let id = match std::env::consts::OS {
            "windows" => "win32",
            "macos" => "darwin",
            other => other,
        };
        Self::new(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this platform has the identifier `id`.
    pub fn is(&self, id: &str) -> bool {
        self.0 == id
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Platform {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}
