//! Package identity, build options and export resolution.
//!
//! Consumers pin the library as `name/version`; [`PackageInfo::satisfies`]
//! checks such a pin against what this build provides.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use walkdir::WalkDir;

use crate::config::{Config, DEFAULT_EXTRA_OUTPUTS};
use crate::error::LoggerError;

/// Boolean build options exposed to consumers.
///
/// `Default` returns the documented defaults; [`BuildOptions::enabled`]
/// reports the features this build was compiled with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuildOptions {
    pub with_color: bool,
    pub with_time: bool,
    pub with_extra_outputs: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            with_color: true,
            with_time: false,
            with_extra_outputs: false,
        }
    }
}

impl BuildOptions {
    pub const fn enabled() -> Self {
        Self {
            with_color: cfg!(feature = "color"),
            with_time: cfg!(feature = "time"),
            with_extra_outputs: cfg!(feature = "extra_outputs"),
        }
    }

    /// Seeds a runtime configuration from these options.
    pub fn apply(&self, config: &mut Config) {
        config.color = self.with_color;
        config.time = self.with_time;
        config.extra_outputs = if self.with_extra_outputs {
            DEFAULT_EXTRA_OUTPUTS
        } else {
            0
        };
    }
}

/// Static description of the package.
#[derive(Clone, Copy, Debug)]
pub struct PackageInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub license: &'static str,
    pub description: &'static str,
    pub topics: &'static [&'static str],
    pub options: BuildOptions,
    pub exports: &'static [&'static str],
}

/// This crate.
pub const PACKAGE: PackageInfo = PackageInfo {
    name: env!("CARGO_PKG_NAME"),
    version: env!("CARGO_PKG_VERSION"),
    license: env!("CARGO_PKG_LICENSE"),
    description: env!("CARGO_PKG_DESCRIPTION"),
    topics: &["logging", "embedded", "minimal", "color"],
    options: BuildOptions::enabled(),
    exports: &["Cargo.toml", "README.md", "LICENSE", "src/*"],
};

impl PackageInfo {
    /// `name/version`, the form consumers pin.
    pub fn reference(&self) -> String {
        format!("{}/{}", self.name, self.version)
    }

    pub fn satisfies(&self, requirement: &Requirement) -> Result<(), LoggerError> {
        if requirement.name != self.name {
            return Err(LoggerError::PackageMismatch {
                required: requirement.name.clone(),
                provided: self.name.to_string(),
            });
        }
        if requirement.version != self.version {
            return Err(LoggerError::VersionMismatch {
                required: requirement.version.clone(),
                provided: self.version.to_string(),
            });
        }
        Ok(())
    }

    /// Resolves every export under `root`.
    ///
    /// Plain entries must name an existing file. Entries ending in `/*` take
    /// every file below that directory and must match at least one.
    pub fn resolve_exports(&self, root: &Path) -> Result<Vec<PathBuf>, LoggerError> {
        let mut files = Vec::new();
        for export in self.exports {
            match export.strip_suffix("/*") {
                Some(dir) => {
                    let before = files.len();
                    for entry in WalkDir::new(root.join(dir)).sort_by_file_name() {
                        let entry = entry.map_err(|_| LoggerError::NotFound)?;
                        if entry.file_type().is_file() {
                            files.push(entry.into_path());
                        }
                    }
                    if files.len() == before {
                        return Err(LoggerError::NotFound);
                    }
                }
                None => {
                    let path = root.join(export);
                    if !path.is_file() {
                        return Err(LoggerError::NotFound);
                    }
                    files.push(path);
                }
            }
        }
        Ok(files)
    }
}

/// A consumer's pin on a package, written `name/version`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Requirement {
    pub name: String,
    pub version: String,
}

impl FromStr for Requirement {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || LoggerError::InvalidRequirement(s.to_string());
        let (name, version) = s.trim().split_once('/').ok_or_else(invalid)?;
        if name.is_empty() || version.is_empty() || version.contains('/') {
            return Err(invalid());
        }
        Ok(Self {
            name: name.to_string(),
            version: version.to_string(),
        })
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.version)
    }
}
