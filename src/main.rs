//! vgrid - Entry Point

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use vgrid::config::CliOverrides;
use vgrid::source::MemorySource;

/// vgrid - virtualized TUI data grid
#[derive(Parser, Debug)]
#[command(name = "vgrid")]
#[command(version)]
#[command(about = "TUI data grid with virtualized scrolling and incremental fetch")]
pub struct Args {
    /// Simulated dataset size in rows
    #[arg(long)]
    pub rows: Option<usize>,

    /// Fetch page size in rows
    #[arg(long)]
    pub page_size: Option<usize>,

    /// RNG seed for dataset generation
    #[arg(long)]
    pub seed: Option<u64>,

    /// Simulated backend latency in milliseconds
    #[arg(long)]
    pub latency_ms: Option<u64>,

    /// Use measured row heights (variable-height rows)
    #[arg(long)]
    pub measured: bool,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Set NO_COLOR env var if --no-color flag is passed
    // This ensures consistent color handling throughout the application
    if args.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = vgrid::config::load_config_with_precedence(args.config.clone())?;
        let merged = vgrid::config::merge_config(config_file);
        let with_env = vgrid::config::apply_env_overrides(merged);
        vgrid::config::apply_cli_overrides(
            with_env,
            CliOverrides {
                rows: args.rows,
                page_size: args.page_size,
                seed: args.seed,
                latency_ms: args.latency_ms,
                measured: if args.measured { Some(true) } else { None },
            },
        )
    };

    vgrid::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    let source = Box::new(
        MemorySource::new(config.rows, config.seed)
            .with_latency(Duration::from_millis(config.latency_ms)),
    );

    vgrid::view::run(source, &config, args.no_color)?;

    Ok(())
}
