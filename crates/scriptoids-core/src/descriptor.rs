//! Descriptor parsing: turn a `script_info.toml` document into a validated
//! [`ScriptoidRecord`].
//!
//! Deserialization is permissive (every field optional); validation then
//! maps each defect to a specific [`DescriptorError`] so callers can name
//! the exact offending field.

use regex::Regex;
use semver::Version;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::record::{ScriptDependency, ScriptoidRecord};

/// Default name of the per-scriptoid metadata file.
pub const DEFAULT_DESCRIPTOR_FILENAME: &str = "script_info.toml";

/// Errors returned by descriptor parsing.
#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("descriptor is not valid TOML: {0}")]
    Malformed(#[from] toml::de::Error),

    #[error("no [scriptoid] section was found in the descriptor")]
    MissingSection,

    #[error("required field '{0}' is missing from the [scriptoid] section")]
    MissingField(&'static str),

    #[error("'{value}' is not a valid semantic version")]
    InvalidVersion {
        value: String,
        #[source]
        source: semver::Error,
    },

    #[error("name '{0}' contains characters that are not filename-safe")]
    InvalidName(String),
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct DescriptorFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    scriptoid: Option<DescriptorTable>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct DescriptorTable {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    entry_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    path_dependencies: Option<Vec<String>>,
    // Kept last: serializes as an array of tables.
    #[serde(skip_serializing_if = "Option::is_none")]
    script_dependencies: Option<Vec<RawDependency>>,
}

#[derive(Debug, Deserialize, Serialize)]
struct RawDependency {
    name: String,
    version: String,
}

/// Whether `name` is safe to use as a link filename: word characters,
/// hyphen, dot and space only.
pub fn is_filename_safe(name: &str) -> bool {
    let re = Regex::new(r"^[\w\-. ]+$").expect("scriptoid name regex is valid");
    re.is_match(name)
}

fn parse_version(value: &str) -> Result<Version, DescriptorError> {
    Version::parse(value).map_err(|source| DescriptorError::InvalidVersion {
        value: value.to_string(),
        source,
    })
}

/// Parse a descriptor document into a validated record.
///
/// Pure transformation; no filesystem access.
pub fn parse(text: &str) -> Result<ScriptoidRecord, DescriptorError> {
    let document: DescriptorFile = toml::from_str(text)?;
    let table = document.scriptoid.ok_or(DescriptorError::MissingSection)?;

    let name = table.name.ok_or(DescriptorError::MissingField("name"))?;
    let entry_file = table
        .entry_file
        .ok_or(DescriptorError::MissingField("entry_file"))?;
    let raw_version = table
        .version
        .ok_or(DescriptorError::MissingField("version"))?;

    let version = parse_version(&raw_version)?;

    if !is_filename_safe(&name) {
        return Err(DescriptorError::InvalidName(name));
    }

    let mut script_dependencies = Vec::new();
    for dependency in table.script_dependencies.unwrap_or_default() {
        let required = parse_version(&dependency.version)?;
        script_dependencies.push(ScriptDependency::new(dependency.name, required));
    }

    Ok(ScriptoidRecord::new(name, version, entry_file)
        .with_description(table.description.unwrap_or_default())
        .with_script_dependencies(script_dependencies)
        .with_path_dependencies(table.path_dependencies.unwrap_or_default()))
}

/// Serialize a record back into descriptor-document form.
///
/// The output parses back into an equal record.
pub fn serialize(record: &ScriptoidRecord) -> String {
    let table = DescriptorTable {
        name: Some(record.name().to_string()),
        version: Some(record.version().to_string()),
        entry_file: Some(record.entry_file().to_string()),
        description: Some(record.description().to_string()),
        path_dependencies: Some(record.path_dependencies().to_vec()),
        script_dependencies: Some(
            record
                .script_dependencies()
                .iter()
                .map(|dependency| RawDependency {
                    name: dependency.name().to_string(),
                    version: dependency.version().to_string(),
                })
                .collect(),
        ),
    };
    let document = DescriptorFile {
        scriptoid: Some(table),
    };
    toml::to_string_pretty(&document).expect("a validated record always serializes")
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
[scriptoid]
name = "foo"
version = "0.0.0"
entry_file = "foo.sh"
"#;

    #[test]
    fn parses_minimal_descriptor_with_defaults() {
        let record = parse(MINIMAL).unwrap();
        assert_eq!(record.name(), "foo");
        assert_eq!(record.version(), &Version::new(0, 0, 0));
        assert_eq!(record.entry_file(), "foo.sh");
        assert_eq!(record.description(), "");
        assert!(record.script_dependencies().is_empty());
        assert!(record.path_dependencies().is_empty());
    }

    #[test]
    fn parses_full_descriptor() {
        let text = r#"
[scriptoid]
name = "foo"
version = "1.2.3-rc.1+build.5"
entry_file = "foo.sh"
description = "does foo things"
path_dependencies = ["jq", "curl"]

[[scriptoid.script_dependencies]]
name = "bar"
version = "1.0.0"
"#;
        let record = parse(text).unwrap();
        assert_eq!(record.version().pre.as_str(), "rc.1");
        assert_eq!(record.description(), "does foo things");
        assert_eq!(record.path_dependencies(), ["jq", "curl"]);
        assert_eq!(record.script_dependencies().len(), 1);
        assert_eq!(record.script_dependencies()[0].name(), "bar");
        assert_eq!(
            record.script_dependencies()[0].version(),
            &Version::new(1, 0, 0)
        );
    }

    #[test]
    fn rejects_missing_section() {
        let result = parse("name = \"foo\"\n");
        assert!(matches!(result, Err(DescriptorError::MissingSection)));
    }

    #[test]
    fn rejects_missing_fields_by_name() {
        let missing_name = "[scriptoid]\nversion = \"0.0.0\"\nentry_file = \"foo.sh\"\n";
        assert!(matches!(
            parse(missing_name),
            Err(DescriptorError::MissingField("name"))
        ));

        let missing_entry = "[scriptoid]\nname = \"foo\"\nversion = \"0.0.0\"\n";
        assert!(matches!(
            parse(missing_entry),
            Err(DescriptorError::MissingField("entry_file"))
        ));

        let missing_version = "[scriptoid]\nname = \"foo\"\nentry_file = \"foo.sh\"\n";
        assert!(matches!(
            parse(missing_version),
            Err(DescriptorError::MissingField("version"))
        ));
    }

    #[test]
    fn rejects_invalid_version() {
        let text = "[scriptoid]\nname = \"foo\"\nversion = \"banana\"\nentry_file = \"foo.sh\"\n";
        assert!(matches!(
            parse(text),
            Err(DescriptorError::InvalidVersion { .. })
        ));
    }

    #[test]
    fn rejects_invalid_dependency_version() {
        let text = r#"
[scriptoid]
name = "foo"
version = "1.0.0"
entry_file = "foo.sh"

[[scriptoid.script_dependencies]]
name = "bar"
version = "one"
"#;
        assert!(matches!(
            parse(text),
            Err(DescriptorError::InvalidVersion { .. })
        ));
    }

    #[test]
    fn filename_safety_pattern() {
        assert!(is_filename_safe("foo"));
        assert!(is_filename_safe("my tool-2.0"));
        assert!(is_filename_safe("under_score"));
        assert!(!is_filename_safe(""));
        assert!(!is_filename_safe("a/b"));
        assert!(!is_filename_safe("a:b"));
        assert!(!is_filename_safe("../escape"));
    }

    #[test]
    fn rejects_unsafe_name() {
        let text = "[scriptoid]\nname = \"../foo\"\nversion = \"0.0.0\"\nentry_file = \"foo.sh\"\n";
        assert!(matches!(parse(text), Err(DescriptorError::InvalidName(_))));
    }

    #[test]
    fn rejects_malformed_document() {
        assert!(matches!(
            parse("not toml ["),
            Err(DescriptorError::Malformed(_))
        ));
    }

    #[test]
    fn serialized_record_parses_back_equal() {
        let record = ScriptoidRecord::new("foo", Version::parse("1.2.3").unwrap(), "foo.sh")
            .with_description("a tool")
            .with_script_dependencies(vec![ScriptDependency::new("bar", Version::new(1, 0, 0))])
            .with_path_dependencies(vec!["jq".to_string()]);
        assert_eq!(parse(&serialize(&record)).unwrap(), record);
    }

    #[test]
    fn serialized_minimal_record_parses_back_equal() {
        let record = ScriptoidRecord::new("foo", Version::new(0, 1, 0), "foo.sh");
        assert_eq!(parse(&serialize(&record)).unwrap(), record);
    }
}
