//! Command handlers for armory CLI
//!
//! Each subcommand has its own module with handler functions.

pub mod configure;
pub mod details;
pub mod precompute;
pub mod show;
