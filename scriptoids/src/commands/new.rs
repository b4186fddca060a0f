//! `scriptoids new` — scaffold a fresh scriptoid directory.

use anyhow::{Context, Result};
use semver::Version;
use std::fs;

use scriptoids_core::descriptor;
use scriptoids_core::environment::Environment;
use scriptoids_core::record::ScriptoidRecord;

use crate::output::Display;

/// `scriptoids new <name>`
///
/// Creates `home/<name>/` with a stub entry script and a descriptor the
/// link command will accept as-is.
pub fn cmd_new(environment: &Environment, display: &Display, name: &str) -> Result<()> {
    if !descriptor::is_filename_safe(name) {
        anyhow::bail!(
            "'{name}' is not a usable scriptoid name (word characters, hyphen, dot and space only)"
        );
    }

    display.info(&format!("Creating new scriptoid {name}..."));

    let dir = environment.home_directory().join(name);
    if dir.exists() {
        anyhow::bail!(
            "a directory named '{name}' already exists in {}",
            environment.home_directory().display()
        );
    }
    fs::create_dir_all(&dir).with_context(|| format!("failed to create {}", dir.display()))?;

    let entry_file = format!("{name}.sh");
    fs::write(dir.join(&entry_file), "#!/bin/bash\n")
        .with_context(|| format!("failed to write {entry_file}"))?;

    let record = ScriptoidRecord::new(name, Version::new(0, 1, 0), entry_file);
    fs::write(
        dir.join(environment.descriptor_filename()),
        descriptor::serialize(&record),
    )
    .with_context(|| format!("failed to write {}", environment.descriptor_filename()))?;

    display.success(&format!("Created new scriptoid in {}.", dir.display()));
    Ok(())
}
