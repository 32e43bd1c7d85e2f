//! CLI module for the team registry
//!
//! Subcommands:
//! - `serve`: run the HTTP server (admin and participant APIs)
//! - `token`: print freshly generated team tokens

pub mod serve;
pub mod token;

use clap::{Parser, Subcommand};

/// Team registry for attack/defense competitions
#[derive(Parser)]
#[command(name = "team-registry")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve,

    /// Print freshly generated team tokens
    Token(token::TokenArgs),
}
