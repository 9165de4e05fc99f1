//! mousectl CLI: drive the mouse pointer from the terminal.

mod demo;
mod repl;

use std::io;
use std::path::PathBuf;

use clap::Parser;
use mousectl_controller::{setup, MouseController};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "mousectl",
    about = "Move, click and drag the mouse on Wayland, X11, Windows and macOS",
    version
)]
struct Cli {
    /// Run the demonstration sequence and exit.
    #[arg(long)]
    demo: bool,

    /// Path to configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = setup::load_config(cli.config.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log.level)),
        )
        .with_writer(io::stderr)
        .init();

    let config_path = setup::config_path(cli.config.as_deref());
    if config_path.exists() {
        info!(path = %config_path.display(), "loaded config");
    } else {
        info!(path = %config_path.display(), "no config file found, using defaults");
    }

    println!("Universal Mouse Control");
    println!("{}", "=".repeat(40));

    let mut controller = MouseController::from_config(&config)?;
    println!("Detected: {}", controller.environment());
    println!("Using {} backend", controller.backend_name());

    let mut stdout = io::stdout();
    if cli.demo {
        demo::run(&mut controller, &mut stdout)?;
    } else {
        repl::run(&mut controller, io::stdin().lock(), &mut stdout)?;
    }

    Ok(())
}
