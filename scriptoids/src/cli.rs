use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Scriptoids — a package manager for small, self-contained scripts
#[derive(Parser, Debug)]
#[command(name = "scriptoids")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Scriptoid home directory (holds scriptoid sources and the bin/ link directory)
    #[arg(long, env = "SCRIPTOID_HOME", value_name = "DIR")]
    pub home: PathBuf,

    /// Print "Success:"/"Error:" labels instead of symbols
    #[arg(long)]
    pub no_symbols: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scaffold a new scriptoid in the home directory
    New {
        /// Name for the new scriptoid (also its directory and entry script stem)
        #[arg(value_name = "NAME")]
        name: String,
    },

    /// Create bin/ symlinks for scriptoids, enabling them on your PATH
    Link {
        /// Names of the scriptoids to link
        #[arg(value_name = "NAME", required = true, num_args = 1..)]
        names: Vec<String>,
    },

    /// Remove bin/ symlinks for scriptoids
    Unlink {
        /// Names of the scriptoids to unlink
        #[arg(value_name = "NAME", required = true, num_args = 1..)]
        names: Vec<String>,
    },

    /// List every scriptoid in the home directory
    List,

    /// Show the metadata and link status of one scriptoid
    Show {
        /// Name of the scriptoid to inspect
        #[arg(value_name = "NAME")]
        name: String,
    },
}
