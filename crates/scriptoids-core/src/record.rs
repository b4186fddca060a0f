//! The scriptoid record: validated identity and requirements of one scriptoid.

use semver::Version;

/// One entry from `script_dependencies`: another scriptoid this one needs
/// linked, and the version it was written against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptDependency {
    name: String,
    version: Version,
}

impl ScriptDependency {
    pub fn new(name: impl Into<String>, version: Version) -> Self {
        Self {
            name: name.into(),
            version,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Required version. Only the major component participates in
    /// compatibility checks (see [`ScriptoidRecord::fulfills_requirement`]).
    pub fn version(&self) -> &Version {
        &self.version
    }
}

/// Immutable description of one scriptoid, as declared by its descriptor.
///
/// Records are produced by [`crate::descriptor::parse`]; an invalid
/// descriptor never yields a record. Equality is by value across all
/// fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptoidRecord {
    name: String,
    version: Version,
    entry_file: String,
    description: String,
    script_dependencies: Vec<ScriptDependency>,
    path_dependencies: Vec<String>,
}

impl ScriptoidRecord {
    /// Record with the three required fields and every optional field at
    /// its default.
    pub fn new(name: impl Into<String>, version: Version, entry_file: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version,
            entry_file: entry_file.into(),
            description: String::new(),
            script_dependencies: Vec::new(),
            path_dependencies: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_script_dependencies(mut self, dependencies: Vec<ScriptDependency>) -> Self {
        self.script_dependencies = dependencies;
        self
    }

    pub fn with_path_dependencies(mut self, programs: Vec<String>) -> Self {
        self.path_dependencies = programs;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Path of the file to link, relative to the scriptoid's own directory.
    pub fn entry_file(&self) -> &str {
        &self.entry_file
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Other scriptoids this one needs linked, in declaration order.
    pub fn script_dependencies(&self) -> &[ScriptDependency] {
        &self.script_dependencies
    }

    /// External programs that must resolve on `PATH` for this scriptoid to
    /// function once linked.
    pub fn path_dependencies(&self) -> &[String] {
        &self.path_dependencies
    }

    /// Whether this record satisfies a dependency on `name` at `required`.
    ///
    /// Compatibility is a major-version lock: minor and patch are ignored.
    pub fn fulfills_requirement(&self, name: &str, required: &Version) -> bool {
        self.name == name && self.version.major == required.major
    }
}
