mod cli;
mod commands;
mod config;
mod file_utils;

use anyhow::Result;
use armory::Limits;
use clap::Parser;
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::*;

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "armory=debug,armory_cli=debug"
    } else {
        "armory=info,armory_cli=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Precompute {
            weapon_ids,
            paths,
            max_level,
            max_points,
        } => {
            let paths = Config::load()?.resolve(&paths);
            let limits = Limits {
                max_level,
                max_points,
            };
            commands::precompute::handle(weapon_ids, &paths, limits)?;
        }

        Commands::Details { paths } => {
            let paths = Config::load()?.resolve(&paths);
            commands::details::handle(&paths)?;
        }

        Commands::Show {
            weapon_id,
            build,
            output_dir,
        } => {
            let output_dir = Config::load()?.resolve_output_dir(output_dir);
            commands::show::handle(&output_dir, &weapon_id, build.as_deref())?;
        }

        Commands::Configure {
            cache_dir,
            output_dir,
            weapon_list,
            show,
        } => {
            commands::configure::handle(cache_dir, output_dir, weapon_list, show)?;
        }
    }

    Ok(())
}
