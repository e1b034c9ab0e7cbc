//! Path dispatcher CLI.
//!
//! ```text
//!     raw URI ──▶ request normalization ──▶ matcher ──▶ binder ──▶ resolver
//!                 (decode, ?query, prefix)   first hit   params     $target
//!                                                │
//!                       routes.toml ──▶ compiler ┘  (hot reload in `watch`)
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};

use path_dispatch::config::load_config;
use path_dispatch::config::watcher::{apply_updates, ConfigWatcher};
use path_dispatch::observability::logging::init_logging;
use path_dispatch::routing::{Router, SharedRouter};

#[derive(Parser)]
#[command(name = "path-dispatch")]
#[command(about = "Resolve request paths against a table of route templates", long_about = None)]
struct Cli {
    /// Route configuration file (TOML).
    #[arg(short, long, default_value = "routes.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Dispatch one or more request URIs
    Match {
        #[arg(required = true)]
        uris: Vec<String>,
    },
    /// List compiled patterns by route name
    Patterns,
    /// Validate the configuration and compile all routes
    Check,
    /// Dispatch URIs read from stdin, reloading routes when the file changes
    Watch,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(&cli.config)?;
    init_logging(&config.logging);
    let router = config.build_router()?;

    tracing::info!(
        config = %cli.config.display(),
        variants = router.table().len(),
        base_prefix = ?router.base_prefix(),
        "Configuration loaded"
    );

    match cli.command {
        Commands::Match { uris } => {
            for uri in &uris {
                print_dispatch(&router, uri)?;
            }
        }
        Commands::Patterns => {
            println!("{}", serde_json::to_string_pretty(&router.patterns())?);
        }
        Commands::Check => {
            println!(
                "OK: {} routes, {} variants",
                router.table().names().count(),
                router.table().len()
            );
        }
        Commands::Watch => {
            let shared = SharedRouter::new(router);
            let (watcher, updates) = ConfigWatcher::new(&cli.config);
            let _watcher = watcher.run()?;
            tokio::spawn(apply_updates(shared.clone(), updates));

            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Some(line) = lines.next_line().await? {
                let uri = line.trim();
                if uri.is_empty() {
                    continue;
                }
                print_dispatch(&shared.load(), uri)?;
            }
        }
    }

    Ok(())
}

fn print_dispatch(router: &Router, uri: &str) -> Result<(), serde_json::Error> {
    match router.dispatch(uri) {
        Ok(found) => println!("{}", serde_json::to_string(&found)?),
        Err(e) => {
            tracing::error!(uri = %uri, error = %e, "Dispatch failed");
            eprintln!("Error: {}", e);
        }
    }
    Ok(())
}
