// crates/keycli/src/main.rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use keycore::{BackendType, RuntimeKey, RuntimeKeyRegistry, Support};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "runtime-keys")]
#[command(about = "Inspect which backends recognize each workflow runtime key", long_about = None)]
struct Cli {
    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List runtime keys and their backend support
    Keys {
        /// Only show keys recognized by this backend
        #[arg(short, long)]
        backend: Option<BackendType>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show how every backend treats one runtime key
    Describe {
        /// Key name as written in a workflow (e.g. "docker")
        name: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List known backend types
    Backends,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let registry = RuntimeKeyRegistry::global();

    match cli.command {
        Commands::Keys { backend, json } => match backend {
            Some(backend) => list_backend_keys(registry, backend, json)?,
            None => list_keys(registry, json)?,
        },

        Commands::Describe { name, json } => {
            describe_key(registry, &name, json)?;
        }

        Commands::Backends => {
            for backend in BackendType::ALL {
                println!("{}", backend);
            }
        }
    }

    Ok(())
}

fn join_backends(backends: impl Iterator<Item = BackendType>) -> String {
    let names: Vec<&str> = backends.map(BackendType::as_str).collect();
    if names.is_empty() {
        "-".to_string()
    } else {
        names.join(", ")
    }
}

fn list_keys(registry: &RuntimeKeyRegistry, json: bool) -> Result<()> {
    let entries = registry.entries();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!("{:<14} {:<18} {}", "KEY", "MANDATORY", "OPTIONAL");
    for entry in &entries {
        println!(
            "{:<14} {:<18} {}",
            entry.key.name(),
            join_backends(entry.mandatory.iter()),
            join_backends(entry.optional.iter())
        );
    }

    Ok(())
}

fn list_backend_keys(registry: &RuntimeKeyRegistry, backend: BackendType, json: bool) -> Result<()> {
    tracing::debug!(%backend, "Listing keys supported by backend");

    let rows: Vec<(RuntimeKey, Support)> = registry
        .supported_keys(backend)
        .map(|key| (key, registry.support(key, backend)))
        .collect();

    if json {
        let object: serde_json::Map<String, serde_json::Value> = rows
            .iter()
            .map(|(key, support)| (key.name().to_string(), support.to_string().into()))
            .collect();
        println!("{}", serde_json::to_string_pretty(&object)?);
        return Ok(());
    }

    println!("Runtime keys on {}:", backend);
    for (key, support) in rows {
        println!("  {:<14} {}", key.name(), support);
    }

    Ok(())
}

fn describe_key(registry: &RuntimeKeyRegistry, name: &str, json: bool) -> Result<()> {
    let key = registry.lookup(name)?;

    if json {
        let object: serde_json::Map<String, serde_json::Value> = BackendType::ALL
            .into_iter()
            .map(|backend| (backend.to_string(), registry.support(key, backend).to_string().into()))
            .collect();
        println!("{}", serde_json::to_string_pretty(&object)?);
        return Ok(());
    }

    println!("{}", key.name());
    for backend in BackendType::ALL {
        println!("  {:<6} {}", backend, registry.support(key, backend));
    }

    Ok(())
}
