use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use scanwarden::api::params::params;
use scanwarden::{ApiResponse, Config, ScanExecutor, WardenBuilder, WorkerHandle};

#[derive(Parser)]
#[command(
    name = "scanwarden",
    about = "Scan orchestration and policy control engine",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the scanner plugins and their policy settings
    Scanners {
        /// Restrict to one policy category id
        #[arg(long)]
        policy: Option<u32>,

        /// Output format (table, json)
        #[arg(long, short = 'f', default_value = "table")]
        format: String,
    },

    /// List the policy categories with aggregated settings
    Policies {
        /// Output format (table, json)
        #[arg(long, short = 'f', default_value = "table")]
        format: String,
    },

    /// Generate a starter .scanwarden.toml config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

/// The CLI only reads configuration views; it never launches workers.
struct NoopExecutor;

impl ScanExecutor for NoopExecutor {
    fn run(&self, _handle: WorkerHandle) {}
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Scanners { policy, format } => cmd_scanners(policy, format),
        Commands::Policies { format } => cmd_policies(format),
        Commands::Init { force } => cmd_init(force),
    };

    match result {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(e.exit_code());
        }
    }
}

fn cmd_scanners(policy: Option<u32>, format: String) -> scanwarden::Result<i32> {
    let api = WardenBuilder::new(Arc::new(NoopExecutor)).build()?;

    let view_params = match policy {
        Some(id) => params([("policyId", &id.to_string())]),
        None => params([]),
    };
    let scanners = match api.handle_view("scanners", &view_params)? {
        ApiResponse::Scanners(scanners) => scanners,
        _ => unreachable!("scanners view returns scanner descriptors"),
    };

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&scanners)?),
        _ => {
            println!(
                "{:<8} {:<38} {:<8} {:<10} {:<10} ENABLED",
                "ID", "NAME", "POLICY", "STRENGTH", "THRESHOLD"
            );
            println!("{}", "-".repeat(84));
            for s in &scanners {
                println!(
                    "{:<8} {:<38} {:<8} {:<10} {:<10} {}",
                    s.id.to_string(),
                    s.name,
                    s.policy_id.to_string(),
                    s.attack_strength.to_string(),
                    s.alert_threshold.to_string(),
                    s.enabled,
                );
            }
        }
    }

    Ok(0)
}

fn cmd_policies(format: String) -> scanwarden::Result<i32> {
    let api = WardenBuilder::new(Arc::new(NoopExecutor)).build()?;

    let policies = match api.handle_view("policies", &params([]))? {
        ApiResponse::Policies(policies) => policies,
        _ => unreachable!("policies view returns policy summaries"),
    };

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&policies)?),
        _ => {
            println!(
                "{:<4} {:<26} {:<10} {:<10} ENABLED",
                "ID", "NAME", "STRENGTH", "THRESHOLD"
            );
            println!("{}", "-".repeat(62));
            for p in &policies {
                let strength = p
                    .attack_strength
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "mixed".into());
                let threshold = p
                    .alert_threshold
                    .map(|t| t.to_string())
                    .unwrap_or_else(|| "mixed".into());
                println!(
                    "{:<4} {:<26} {:<10} {:<10} {}",
                    p.id.to_string(),
                    p.name,
                    strength,
                    threshold,
                    p.enabled,
                );
            }
        }
    }

    Ok(0)
}

fn cmd_init(force: bool) -> scanwarden::Result<i32> {
    let path = PathBuf::from(".scanwarden.toml");

    if path.exists() && !force {
        eprintln!(".scanwarden.toml already exists. Use --force to overwrite.");
        return Ok(1);
    }

    std::fs::write(&path, Config::starter_toml())?;
    println!("Created .scanwarden.toml");

    Ok(0)
}
