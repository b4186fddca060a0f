//! `scriptoids unlink` — remove scriptoids from the search path.

use anyhow::{Context, Result};

use scriptoids_core::environment::Environment;

use crate::output::Display;

/// `scriptoids unlink <name>...`
///
/// Removes links only; scriptoid sources are never touched. The first
/// failure aborts the command.
pub fn cmd_unlink(environment: &Environment, display: &Display, names: &[String]) -> Result<()> {
    for name in names {
        display.info(&format!("Unlinking {name} from bin/..."));
        environment
            .unlink_scriptoid(name)
            .with_context(|| format!("failed to unlink '{name}'"))?;
        display.info(&format!(
            "Removed {}",
            environment.bin_directory().join(name).display()
        ));
    }

    display.success(&format!(
        "Unlinked {} {}",
        names.len(),
        super::scriptoid_noun(names.len())
    ));
    Ok(())
}
