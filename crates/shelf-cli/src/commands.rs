use anyhow::{bail, Context};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use shelf_server::{BookshelfServer, ServerConfig};
use shelf_types::BookId;

use crate::cli::{Cli, Command, IdCommand, ServeArgs};

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args, cli.verbose),
        Command::Id(IdCommand::New) => cmd_id_new(),
        Command::Id(IdCommand::Check { id }) => cmd_id_check(&id),
    }
}

/// `RUST_LOG` wins; otherwise `debug` when verbose, else the config level.
fn init_tracing(default_level: &str, verbose: bool) {
    let level = if verbose { "debug" } else { default_level };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn serve_config(args: &ServeArgs) -> anyhow::Result<ServerConfig> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(seed) = &args.seed {
        config.seed = Some(seed.clone());
    }
    if args.no_cors {
        config.enable_cors = false;
    }
    Ok(config)
}

fn cmd_serve(args: ServeArgs, verbose: bool) -> anyhow::Result<()> {
    let config = serve_config(&args)?;
    init_tracing(&config.log_level, verbose);
    tracing::info!(
        bind = %config.bind_addr,
        collection = %config.collection,
        cors = config.enable_cors,
        seed = ?config.seed,
        "loaded server configuration"
    );

    println!(
        "{} Bookshelf serving collection {} on {}",
        "✓".green().bold(),
        config.collection.cyan(),
        config.bind_addr.to_string().bold()
    );
    let server = BookshelfServer::new(config);
    let runtime = tokio::runtime::Runtime::new().context("starting async runtime")?;
    runtime.block_on(server.serve())?;
    Ok(())
}

fn cmd_id_new() -> anyhow::Result<()> {
    println!("{}", BookId::generate());
    Ok(())
}

fn cmd_id_check(id: &str) -> anyhow::Result<()> {
    match BookId::parse(id) {
        Ok(parsed) => {
            println!("{} {} is a valid id", "✓".green().bold(), parsed.to_hex().bold());
            println!("  Created: {}", parsed.timestamp().to_rfc3339().cyan());
            Ok(())
        }
        Err(e) => bail!("{} is not a valid id: {e}", id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn serve_args(argv: &[&str]) -> ServeArgs {
        let mut full = vec!["bookshelf", "serve"];
        full.extend_from_slice(argv);
        match Cli::parse_from(full).command {
            Command::Serve(args) => args,
            Command::Id(_) => unreachable!(),
        }
    }

    #[test]
    fn flags_override_defaults() {
        let config = serve_config(&serve_args(&["--bind", "0.0.0.0:9000", "--no-cors"])).unwrap();
        assert_eq!(config.bind_addr.port(), 9000);
        assert!(!config.enable_cors);
        assert_eq!(config.collection, "books");
    }

    #[test]
    fn missing_config_file_is_an_error() {
        assert!(serve_config(&serve_args(&["--config", "/no/such/bookshelf.toml"])).is_err());
    }

    #[test]
    fn id_check_accepts_valid_and_rejects_invalid() {
        assert!(cmd_id_check("5a80868574fdd6de0f4fa430").is_ok());
        assert!(cmd_id_check("5a80868574fdd").is_err());
    }
}
