//! CLI module for Capstone Hub
//!
//! Subcommands:
//! - `serve`: run the HTTP API
//! - `token`: mint a bearer token for local testing

pub mod serve;
pub mod token;

use clap::{Parser, Subcommand};

/// Capstone Hub - teams, teachers and project submissions
#[derive(Parser)]
#[command(name = "capstone-hub")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the API server
    Serve(serve::ServeArgs),

    /// Print a signed bearer token using the configured secret
    Token(token::TokenArgs),
}
