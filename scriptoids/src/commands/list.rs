//! `scriptoids list` — table of every scriptoid and its link status.

use anyhow::Result;

use scriptoids_core::environment::Environment;

use crate::output::Display;

/// `scriptoids list`
///
/// A scriptoid whose descriptor fails to parse is reported on its row
/// instead of aborting the listing.
pub fn cmd_list(environment: &Environment, display: &Display) -> Result<()> {
    let names = environment.list_scriptoids();
    if names.is_empty() {
        display.info("No scriptoids found.");
        return Ok(());
    }

    println!(
        "{:<20} {:<12} {:<8} {}",
        "Name", "Version", "Linked", "Description"
    );
    for name in names {
        match environment.get_scriptoid(&name) {
            Ok(record) => {
                let linked = if environment.scriptoid_is_linked(&name) {
                    "yes"
                } else {
                    "no"
                };
                println!(
                    "{:<20} {:<12} {:<8} {}",
                    record.name(),
                    record.version().to_string(),
                    linked,
                    record.description()
                );
            }
            Err(err) => {
                display.failure(&format!("{name}: {err}"));
            }
        }
    }
    Ok(())
}
