mod check_cmd;
mod config;
mod generate_cmd;

#[cfg(test)]
mod test_util;

use clap::{Parser, Subcommand};

use dropplan_core::OutputFormat;

use config::{DropplanConfig, Overrides};

#[derive(Parser)]
#[command(name = "dropplan", about = "Per-session interval plan generator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default dropplan config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Generate the next drops for every session in a plan description
    Generate {
        /// Path to the plan description (`-` reads stdin)
        file: String,
        /// Number of drops to generate (overrides DROPPLAN_DROPS env var)
        #[arg(long)]
        drops: Option<usize>,
        /// Largest accepted drop count (overrides DROPPLAN_MAX_DROPS env var)
        #[arg(long)]
        max_drops: Option<usize>,
        /// Output format: text or json (overrides DROPPLAN_FORMAT env var)
        #[arg(long)]
        format: Option<OutputFormat>,
        /// Output file path (defaults to stdout)
        #[arg(long)]
        output: Option<String>,
    },
    /// Parse a plan description and summarize its sessions
    Check {
        /// Path to the plan description (`-` reads stdin)
        file: String,
    },
}

/// Execute the `dropplan init` command: write config file.
fn cmd_init(force: bool) -> anyhow::Result<()> {
    let path = config::config_path();

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let cfg = config::ConfigFile::default();
    config::save_config(&cfg)?;

    println!("Config written to {}", path.display());
    println!("  generate.default_drops = {}", cfg.generate.default_drops);
    println!("  generate.max_drops = {}", cfg.generate.max_drops);
    println!("  output.format = {}", cfg.output.format);

    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { force } => cmd_init(force),
        Commands::Generate {
            file,
            drops,
            max_drops,
            format,
            output,
        } => {
            let overrides = Overrides {
                drops,
                max_drops,
                format,
            };
            let config = DropplanConfig::resolve(&overrides)?;
            generate_cmd::run_generate(&file, &config, output.as_deref())
        }
        Commands::Check { file } => check_cmd::run_check(&file),
    }
}
