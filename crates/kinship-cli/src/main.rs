//! Kinship CLI - Command-line interface for relationship requests.

use clap::Parser;
use kinship_cli::{Cli, Formatter, KinshipConfig};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    let config = match KinshipConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    // Log to stderr; RUST_LOG wins over the config file
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    let format = cli.format.map(Into::into).unwrap_or(config.output.format);
    let color_enabled = !cli.no_color && config.output.color;
    let formatter = Formatter::new(format, color_enabled);

    if let Err(e) = run(cli, config, &formatter) {
        eprintln!("{}", formatter.error(&e.to_string()));
        std::process::exit(1);
    }
}

fn run(cli: Cli, config: KinshipConfig, formatter: &Formatter) -> kinship_cli::Result<()> {
    let database = match cli.database {
        Some(path) => path,
        None => {
            let path = config.database_path()?;
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            path
        }
    };
    tracing::debug!(database = %database.display(), "opening relationship store");

    let service = kinship_cli::open_service(&database, config.lifecycle)?;
    let output = kinship_cli::execute(cli.command, &service, formatter)?;
    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}
