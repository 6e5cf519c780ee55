//! Renote CLI
//!
//! Watches configured note directories and applies rename rules to files
//! as they are created or renamed.

use anyhow::Result;
use clap::Parser;
use renote::{FsStore, FsTemplates, Outcome, Renamer};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "renote")]
#[command(author, version, about = "Rule-driven automatic note renamer")]
struct Cli {
    /// Path to config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Watch configured directories and apply rules (default)
    Watch,

    /// List all rules in evaluation order
    List,

    /// Validate config file
    Check {
        /// Path to config file to validate
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Apply rules once to existing files (dry-run by default)
    Run {
        /// Actually perform renames (not just dry-run)
        #[arg(long)]
        apply: bool,

        /// Target directory to process
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RENOTE_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match cli.command {
        None | Some(Commands::Watch) => {
            run_watch(cli.config).await?;
        }
        Some(Commands::List) => {
            let config = renote::Config::load(cli.config.as_deref())?;
            println!("Rules:");
            for (i, rule) in config.rules.iter().enumerate() {
                let template = rule
                    .template
                    .as_ref()
                    .map(|t| format!(" (template: {})", t.display()))
                    .unwrap_or_default();
                println!("  [{}] {} -> {}{}", i + 1, rule.pattern, rule.replacement, template);
            }
        }
        Some(Commands::Check {
            config: config_path,
        }) => {
            let path = config_path.or(cli.config);
            match renote::Config::load(path.as_deref()) {
                Ok(config) => {
                    let failures = config.validate();
                    if failures.is_empty() {
                        println!("✓ Config is valid");
                        println!("  {} watch paths", config.watches.len());
                        println!("  {} rules", config.rules.len());
                    } else {
                        for (index, e) in &failures {
                            eprintln!("✗ Rule {}: {}", index + 1, e);
                        }
                        std::process::exit(1);
                    }
                }
                Err(e) => {
                    eprintln!("✗ Config error: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Some(Commands::Run { apply, dir }) => {
            run_once(cli.config, apply, dir)?;
        }
    }

    Ok(())
}

/// Build the orchestrator from a loaded config
fn build_renamer(config: &renote::Config) -> Renamer<FsStore, FsTemplates> {
    let engine = renote::RuleEngine::new(config.rules.clone());
    let template_dir = config
        .general
        .template_dir
        .as_ref()
        .map(|dir| renote::expand_path(dir));
    Renamer::new(engine, FsStore, FsTemplates::new(template_dir))
}

async fn run_watch(config_path: Option<PathBuf>) -> Result<()> {
    use tokio::signal;
    use tracing::{error, info};

    let config = renote::Config::load(config_path.as_deref())?;
    renote::notifications::init(config.general.notifications_enabled);
    info!(
        "Loaded config with {} watch paths and {} rules",
        config.watches.len(),
        config.rules.len()
    );

    let renamer = build_renamer(&config);
    let mut watcher = renote::Watcher::new(
        renamer,
        config.general.polling_interval_secs,
        config.general.debounce_seconds,
    )?;

    for watch in &config.watches {
        let path = renote::expand_path(&watch.path);
        if let Err(e) = watcher.watch(&path, watch.recursive) {
            error!("Failed to watch {}: {}", path.display(), e);
            renote::notifications::notify_watch_error(
                &path.display().to_string(),
                &e.to_string(),
            );
        }
    }

    info!("Watching for renames. Press Ctrl+C to stop.");

    let mut tick = tokio::time::interval(std::time::Duration::from_millis(250));
    loop {
        tokio::select! {
            _ = tick.tick() => {
                match watcher.process_events() {
                    Ok(count) if count > 0 => {
                        info!("Applied {} renames ({} total)", count, watcher.files_renamed());
                    }
                    Ok(_) => {}
                    Err(e) => error!("Watcher error: {}", e),
                }
            }
            _ = signal::ctrl_c() => break,
        }
    }

    info!("Shutting down...");
    Ok(())
}

fn run_once(config_path: Option<PathBuf>, apply: bool, dir: Option<PathBuf>) -> Result<()> {
    let config = renote::Config::load(config_path.as_deref())?;
    renote::notifications::init(config.general.notifications_enabled);
    let renamer = build_renamer(&config);

    let dirs: Vec<_> = if let Some(d) = dir {
        vec![d]
    } else {
        config.watches.iter().map(|w| w.path.clone()).collect()
    };

    for dir in dirs {
        let dir = renote::expand_path(&dir);
        println!("Processing: {}", dir.display());
        let entries = std::fs::read_dir(&dir)?;
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if apply {
                match renamer.handle(&path) {
                    Ok(Outcome::Renamed { from, to }) => {
                        println!("  {} -> {}", from.display(), to.display());
                    }
                    Ok(Outcome::Passed) => {}
                    Err(e) => eprintln!("  Failed on {}: {}", path.display(), e),
                }
            } else if let Some(preview) = renamer.preview(&path)? {
                println!("  [dry-run] {} -> {}", path.display(), preview.display());
            }
        }
    }

    Ok(())
}
