//! Core CLI definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "armory")]
#[command(about = "Weapon upgrade-path precomputation", long_about = None)]
pub struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Input/output locations shared by the generating commands
#[derive(Args, Debug, Clone, Default)]
pub struct PathArgs {
    /// Cache directory holding weapons/ and premium-modifiers/
    #[arg(long, env = "ARMORY_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Data directory that receives the generated files
    #[arg(long, env = "ARMORY_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// JSON array of weapon ids (defaults to <output-dir>/weapon_list.json)
    #[arg(long)]
    pub weapon_list: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Precompute per-level upgrade paths for every build of each weapon
    #[command(visible_alias = "p")]
    Precompute {
        /// Weapon ids to process (defaults to the weapon list, then the cache)
        weapon_ids: Vec<String>,

        #[command(flatten)]
        paths: PathArgs,

        /// Highest weapon level to compute (at least 1)
        #[arg(long, default_value_t = armory::MAX_LEVEL, value_parser = clap::value_parser!(u32).range(1..))]
        max_level: u32,

        /// Point budget for filler attachments
        #[arg(long, default_value_t = armory::MAX_POINTS)]
        max_points: u32,
    },

    /// Generate weapon-details.json and the simplified tier list
    #[command(visible_alias = "d")]
    Details {
        #[command(flatten)]
        paths: PathArgs,
    },

    /// Print a precomputed upgrade path as a per-level table
    #[command(visible_alias = "s")]
    Show {
        /// Weapon id (e.g. "m5a3")
        weapon_id: String,

        /// Only show this build
        #[arg(short, long)]
        build: Option<String>,

        /// Data directory holding precomputed-upgrade-paths/
        #[arg(long, env = "ARMORY_OUTPUT_DIR")]
        output_dir: Option<PathBuf>,
    },

    /// Configure default settings
    #[command(visible_alias = "c")]
    Configure {
        /// Set default cache directory
        #[arg(long)]
        cache_dir: Option<PathBuf>,

        /// Set default output directory
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Set default weapon list file
        #[arg(long)]
        weapon_list: Option<PathBuf>,

        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}
