//! ansimirror binary entry point

mod commands;

use anyhow::Result;
use clap::Parser;

use ansimirror::cli::{Cli, Commands, ConfigCommands};
use ansimirror::{logging, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Commands::Serve(args) => commands::serve::handle(config, args),
        Commands::Play(args) => commands::play::handle(&config, &args),
        Commands::List { root } => commands::list::handle(&config, root),
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => commands::config::handle_show(&config),
        },
    }
}
