//! The scriptoid environment: a home directory of scriptoid packages and
//! the `bin/` directory of symlinks that exposes them on `PATH`.
//!
//! The filesystem is the only source of truth. Every query re-reads disk
//! state, so edits made outside this process are picked up without any
//! cache invalidation.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::descriptor::{self, DescriptorError, DEFAULT_DESCRIPTOR_FILENAME};
use crate::record::ScriptoidRecord;

/// Name reserved for the link directory; never a scriptoid.
const BIN_DIRECTORY_NAME: &str = "bin";

/// Errors returned by environment operations.
#[derive(Debug, Error)]
pub enum EnvironmentError {
    #[error("no scriptoid named '{0}' was found")]
    NotFound(String),

    #[error("scriptoid '{name}' has an invalid descriptor: {source}")]
    InvalidDescriptor {
        name: String,
        #[source]
        source: DescriptorError,
    },

    #[error("directory '{directory}' declares its name as '{declared}'; the two must match")]
    NameMismatch { directory: String, declared: String },

    #[error("scriptoid '{0}' is already linked")]
    AlreadyLinked(String),

    #[error("scriptoid '{0}' is not linked")]
    NotLinked(String),

    #[error("links directory {} does not exist; nothing is linked", .0.display())]
    NoLinksDirectory(PathBuf),

    #[error("scriptoid '{scriptoid}' requires '{program}' on your PATH, but it was not found")]
    UnresolvedPathDependency { scriptoid: String, program: String },

    #[error("scriptoid '{scriptoid}' requires '{dependency}' {required}, but {found} is present")]
    VersionMismatch {
        scriptoid: String,
        dependency: String,
        required: semver::Version,
        found: semver::Version,
    },

    #[error("dependency cycle detected while linking: {0}")]
    CyclicDependency(String),

    #[error("scriptoid '{name}' names entry file '{entry_file}', which does not exist")]
    MissingEntryFile { name: String, entry_file: String },

    #[error("failed to create required directory {}", .path.display())]
    EnvironmentInit {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("access to {} failed: {source}", .path.display())]
    Permission {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// One scriptoid home directory and its `bin/` link directory.
///
/// Construction is cheap and performs no I/O; the required directories are
/// created lazily by [`Environment::link_scriptoid`].
#[derive(Debug, Clone)]
pub struct Environment {
    home_directory: PathBuf,
    bin_directory: PathBuf,
    descriptor_filename: String,
}

impl Environment {
    /// Environment rooted at `home`, using the default descriptor filename.
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self::with_descriptor_filename(home, DEFAULT_DESCRIPTOR_FILENAME)
    }

    /// Environment rooted at `home` with a non-default descriptor filename.
    pub fn with_descriptor_filename(
        home: impl Into<PathBuf>,
        descriptor_filename: impl Into<String>,
    ) -> Self {
        let home_directory = home.into();
        let bin_directory = home_directory.join(BIN_DIRECTORY_NAME);
        Self {
            home_directory,
            bin_directory,
            descriptor_filename: descriptor_filename.into(),
        }
    }

    pub fn home_directory(&self) -> &Path {
        &self.home_directory
    }

    pub fn bin_directory(&self) -> &Path {
        &self.bin_directory
    }

    pub fn descriptor_filename(&self) -> &str {
        &self.descriptor_filename
    }

    fn scriptoid_dir(&self, name: &str) -> PathBuf {
        self.home_directory.join(name)
    }

    fn descriptor_path(&self, name: &str) -> PathBuf {
        self.scriptoid_dir(name).join(&self.descriptor_filename)
    }

    fn link_path(&self, name: &str) -> PathBuf {
        self.bin_directory.join(name)
    }

    /// Whether a directory named `name` containing a descriptor file exists
    /// under the home directory.
    ///
    /// A structural probe only; the descriptor is not parsed. The reserved
    /// name `bin` never counts as a scriptoid.
    pub fn scriptoid_exists(&self, name: &str) -> bool {
        name != BIN_DIRECTORY_NAME
            && self.scriptoid_dir(name).is_dir()
            && self.descriptor_path(name).is_file()
    }

    /// Names of every scriptoid under the home directory, sorted.
    pub fn list_scriptoids(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(&self.home_directory) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .flatten()
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| self.scriptoid_exists(name))
            .collect();
        names.sort();
        names
    }

    /// Read and parse the descriptor of `name`.
    ///
    /// The declared `name` field must match the directory name; the `bin/`
    /// entry is keyed by that single validated name.
    pub fn get_scriptoid(&self, name: &str) -> Result<ScriptoidRecord, EnvironmentError> {
        if !self.scriptoid_exists(name) {
            return Err(EnvironmentError::NotFound(name.to_string()));
        }

        let path = self.descriptor_path(name);
        let text = fs::read_to_string(&path).map_err(|source| EnvironmentError::Permission {
            path: path.clone(),
            source,
        })?;

        let record =
            descriptor::parse(&text).map_err(|source| EnvironmentError::InvalidDescriptor {
                name: name.to_string(),
                source,
            })?;

        if record.name() != name {
            return Err(EnvironmentError::NameMismatch {
                directory: name.to_string(),
                declared: record.name().to_string(),
            });
        }

        Ok(record)
    }

    /// Whether `name` exists and has a symlink in the bin directory.
    pub fn scriptoid_is_linked(&self, name: &str) -> bool {
        self.scriptoid_exists(name) && is_symlink(&self.link_path(name))
    }

    /// Expose `name` on the search path by symlinking its entry file into
    /// the bin directory, then link any unlinked script dependencies.
    ///
    /// Dependencies are checked for major-version compatibility against the
    /// declared requirement, and a dependency that re-enters the active
    /// link chain is reported as [`EnvironmentError::CyclicDependency`].
    /// Steps already completed when a later one fails are kept; nothing is
    /// rolled back.
    pub fn link_scriptoid(&self, name: &str) -> Result<(), EnvironmentError> {
        let mut linking = Vec::new();
        self.link_with_stack(name, &mut linking)
    }

    fn link_with_stack(
        &self,
        name: &str,
        linking: &mut Vec<String>,
    ) -> Result<(), EnvironmentError> {
        linking.push(name.to_string());

        let record = self.get_scriptoid(name)?;

        for program in record.path_dependencies() {
            if which::which(program).is_err() {
                return Err(EnvironmentError::UnresolvedPathDependency {
                    scriptoid: name.to_string(),
                    program: program.clone(),
                });
            }
        }

        self.create_required_directories()?;

        let entry = self.scriptoid_dir(name).join(record.entry_file());
        if !entry.is_file() {
            return Err(EnvironmentError::MissingEntryFile {
                name: name.to_string(),
                entry_file: record.entry_file().to_string(),
            });
        }
        let target = fs::canonicalize(&entry).map_err(|source| EnvironmentError::Permission {
            path: entry.clone(),
            source,
        })?;

        let link = self.link_path(record.name());
        if link.symlink_metadata().is_ok() {
            return Err(EnvironmentError::AlreadyLinked(name.to_string()));
        }

        tracing::debug!(name, target = %target.display(), "creating link");
        make_symlink(&target, &link).map_err(|source| EnvironmentError::Permission {
            path: link.clone(),
            source,
        })?;
        set_owner_executable(&link).map_err(|source| EnvironmentError::Permission {
            path: link.clone(),
            source,
        })?;

        for dependency in record.script_dependencies() {
            if !self.scriptoid_exists(dependency.name()) {
                return Err(EnvironmentError::NotFound(dependency.name().to_string()));
            }

            let found = self.get_scriptoid(dependency.name())?;
            if !found.fulfills_requirement(dependency.name(), dependency.version()) {
                return Err(EnvironmentError::VersionMismatch {
                    scriptoid: name.to_string(),
                    dependency: dependency.name().to_string(),
                    required: dependency.version().clone(),
                    found: found.version().clone(),
                });
            }

            if linking.iter().any(|active| active == dependency.name()) {
                let mut chain: Vec<&str> = linking.iter().map(String::as_str).collect();
                chain.push(dependency.name());
                return Err(EnvironmentError::CyclicDependency(chain.join(" -> ")));
            }

            if !self.scriptoid_is_linked(dependency.name()) {
                self.link_with_stack(dependency.name(), linking)?;
            }
        }

        linking.pop();
        Ok(())
    }

    /// Remove the bin entry for `name`. The link target is never touched.
    pub fn unlink_scriptoid(&self, name: &str) -> Result<(), EnvironmentError> {
        if !self.bin_directory.is_dir() {
            return Err(EnvironmentError::NoLinksDirectory(
                self.bin_directory.clone(),
            ));
        }

        let link = self.link_path(name);
        if !is_symlink(&link) {
            return Err(EnvironmentError::NotLinked(name.to_string()));
        }

        tracing::debug!(name, "removing link");
        fs::remove_file(&link).map_err(|source| EnvironmentError::Permission {
            path: link,
            source,
        })?;
        Ok(())
    }

    fn create_required_directories(&self) -> Result<(), EnvironmentError> {
        for path in [&self.home_directory, &self.bin_directory] {
            fs::create_dir_all(path).map_err(|source| EnvironmentError::EnvironmentInit {
                path: path.clone(),
                source,
            })?;
        }
        Ok(())
    }
}

fn is_symlink(path: &Path) -> bool {
    path.symlink_metadata()
        .map(|meta| meta.file_type().is_symlink())
        .unwrap_or(false)
}

#[cfg(unix)]
fn make_symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn make_symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(target, link)
}

/// Set the owner-executable bit, keeping every other mode bit.
///
/// `fs::metadata` and `fs::set_permissions` follow the symlink, so the bit
/// lands on the entry file itself, which is what the shell consults when it
/// resolves the linked command.
#[cfg(unix)]
fn set_owner_executable(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut permissions = fs::metadata(path)?.permissions();
    permissions.set_mode(permissions.mode() | 0o100);
    fs::set_permissions(path, permissions)
}

#[cfg(not(unix))]
fn set_owner_executable(_path: &Path) -> io::Result<()> {
    Ok(())
}
