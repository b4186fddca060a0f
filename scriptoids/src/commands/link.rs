//! `scriptoids link` — expose scriptoids on the search path.

use anyhow::{Context, Result};

use scriptoids_core::environment::Environment;

use crate::output::Display;

/// `scriptoids link <name>...`
///
/// The first failure aborts the command; scriptoids linked by earlier
/// iterations (or as dependencies) stay linked.
pub fn cmd_link(environment: &Environment, display: &Display, names: &[String]) -> Result<()> {
    for name in names {
        display.info(&format!("Linking {name} to bin/..."));
        environment
            .link_scriptoid(name)
            .with_context(|| format!("failed to link '{name}'"))?;
        display.info(&format!(
            "{} => {}",
            environment.home_directory().join(name).display(),
            environment.bin_directory().join(name).display()
        ));
    }

    display.success(&format!(
        "Linked {} {}",
        names.len(),
        super::scriptoid_noun(names.len())
    ));
    Ok(())
}
