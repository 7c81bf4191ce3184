use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "bookshelf",
    about = "Bookshelf: a REST resource server for book documents",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP server
    Serve(ServeArgs),
    /// Generate or validate book identifiers
    #[command(subcommand)]
    Id(IdCommand),
}

#[derive(Args)]
pub struct ServeArgs {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Address to listen on, overriding the config file
    #[arg(long)]
    pub bind: Option<SocketAddr>,
    /// JSON array of books to load at startup, overriding the config file
    #[arg(long)]
    pub seed: Option<PathBuf>,
    /// Disable the permissive CORS layer
    #[arg(long)]
    pub no_cors: bool,
}

#[derive(Subcommand)]
pub enum IdCommand {
    /// Print a freshly generated identifier
    New,
    /// Check whether an identifier is well-formed
    Check { id: String },
}
