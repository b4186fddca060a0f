//! `scriptoids show` — print one scriptoid's metadata.

use anyhow::Result;

use scriptoids_core::environment::Environment;

use crate::output::Display;

/// `scriptoids show <name>`
pub fn cmd_show(environment: &Environment, display: &Display, name: &str) -> Result<()> {
    let record = environment.get_scriptoid(name)?;

    println!("name:        {}", record.name());
    println!("version:     {}", record.version());
    println!("entry file:  {}", record.entry_file());
    if !record.description().is_empty() {
        println!("description: {}", record.description());
    }
    if !record.script_dependencies().is_empty() {
        println!("script dependencies:");
        for dependency in record.script_dependencies() {
            println!("  {} ({})", dependency.name(), dependency.version());
        }
    }
    if !record.path_dependencies().is_empty() {
        println!("path dependencies:");
        for program in record.path_dependencies() {
            println!("  {program}");
        }
    }

    let status = if environment.scriptoid_is_linked(name) {
        "linked"
    } else {
        "not linked"
    };
    display.info(&format!("{name} is {status}"));
    Ok(())
}
