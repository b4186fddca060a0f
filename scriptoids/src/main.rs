mod cli;
mod commands;
mod observability;
mod output;

use clap::Parser;

use cli::{Cli, Commands};
use output::Display;
use scriptoids_core::environment::Environment;

fn main() {
    observability::init_tracing();

    let cli = Cli::parse();
    let display = Display::new(cli.no_symbols);
    let environment = Environment::new(&cli.home);
    tracing::debug!(home = %environment.home_directory().display(), "using scriptoid home");

    let result = match cli.command {
        Commands::New { name } => commands::cmd_new(&environment, &display, &name),
        Commands::Link { names } => commands::cmd_link(&environment, &display, &names),
        Commands::Unlink { names } => commands::cmd_unlink(&environment, &display, &names),
        Commands::List => commands::cmd_list(&environment, &display),
        Commands::Show { name } => commands::cmd_show(&environment, &display, &name),
    };

    if let Err(err) = result {
        display.failure(&format!("{err:#}"));
        std::process::exit(1);
    }
}
