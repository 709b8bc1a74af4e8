//! CLI definitions and command routing.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::HomeHostsPaths;
use crate::watch::{self, TickAction, DEFAULT_INTERVAL_SECS};

#[derive(Parser)]
#[command(name = "homehosts")]
#[command(about = "Switch hosts file entries depending on the current Wi-Fi network")]
pub struct Cli {
    /// Config file (default: ~/.homehosts/config.yaml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the config directory and a template config.yaml
    Init,

    /// Watch the network in the foreground and switch hosts on change
    Run {
        /// Poll interval in seconds
        #[arg(short = 'f', long, default_value_t = DEFAULT_INTERVAL_SECS)]
        every: u64,
    },

    /// Check the network once and switch hosts if needed
    Once,

    /// Write the configured hosts block now, whatever the network
    Apply,

    /// Remove the hosts block now, whatever the network
    Restore,

    /// Check config, hosts file and network detection
    Doctor,

    /// Run the watcher as a background daemon (start, stop, status, reload)
    Daemon {
        #[command(subcommand)]
        cmd: DaemonCmd,
    },
}

#[derive(Subcommand)]
pub enum DaemonCmd {
    /// Start the watcher in the background
    Start {
        /// Poll interval in seconds
        #[arg(short = 'f', long, default_value_t = DEFAULT_INTERVAL_SECS)]
        every: u64,
    },
    /// Stop the running watcher
    Stop,
    /// Show daemon status (pid, config, interval)
    Status,
    /// Re-read the config without restarting
    Reload,
}

/// Run CLI and dispatch to handlers.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    if let Err(e) = crate::logging::init(cli.verbose) {
        eprintln!("Warning: could not initialise logging: {e}");
    }

    let paths = HomeHostsPaths::default_paths();
    let config_path = cli.config.unwrap_or_else(|| paths.config_file.clone());

    match cli.command {
        Commands::Init => cmd_init(&paths, &config_path),
        Commands::Run { every } => cmd_run(config_path, every),
        Commands::Once => cmd_once(config_path),
        Commands::Apply => cmd_apply(config_path),
        Commands::Restore => cmd_restore(),
        Commands::Doctor => cmd_doctor(&config_path),
        Commands::Daemon { cmd } => cmd_daemon(&paths, &config_path, cmd),
    }
}

fn context(config_path: PathBuf) -> Result<watch::Context> {
    let config = crate::store::load_config(&config_path)?;
    Ok(watch::Context {
        config,
        config_path: Some(config_path),
        probe: crate::platform::default_probe(),
        editor: crate::platform::default_hosts_editor(),
    })
}

fn cmd_init(paths: &HomeHostsPaths, config_path: &std::path::Path) -> Result<()> {
    crate::store::ensure_dirs(paths)?;
    if crate::store::init_config(config_path)? {
        println!("Created config: {}", config_path.display());
    } else {
        println!("Config already exists: {}", config_path.display());
    }
    Ok(())
}

fn cmd_run(config_path: PathBuf, every: u64) -> Result<()> {
    if every == 0 {
        anyhow::bail!("--every must be at least 1 second");
    }
    let ctx = context(config_path)?;
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    rt.block_on(watch::run_forever(ctx, Duration::from_secs(every)))
}

fn cmd_once(config_path: PathBuf) -> Result<()> {
    let ctx = context(config_path)?;
    let outcome = watch::check_once(&ctx);
    let network = outcome.network.as_deref().unwrap_or("(unknown)");
    match outcome.action {
        TickAction::Failed => anyhow::bail!("could not update {}", ctx.editor.path().display()),
        _ => println!("Network {network}: hosts {}", outcome.desired),
    }
    Ok(())
}

fn cmd_apply(config_path: PathBuf) -> Result<()> {
    let ctx = context(config_path)?;
    if watch::apply_once(&ctx)? {
        println!("Hosts applied: {}", ctx.editor.path().display());
    } else {
        println!("Hosts unchanged");
    }
    Ok(())
}

fn cmd_restore() -> Result<()> {
    let editor = crate::platform::default_hosts_editor();
    if watch::restore_once(editor.as_ref())? {
        println!("Hosts restored: {}", editor.path().display());
    } else {
        println!("Hosts unchanged");
    }
    Ok(())
}

fn cmd_doctor(config_path: &std::path::Path) -> Result<()> {
    let editor = crate::platform::default_hosts_editor();
    let probe = crate::platform::default_probe();
    let results = crate::doctor::run_checks(config_path, editor.as_ref(), probe.as_ref());
    let mut failed = 0;
    for r in &results {
        let mark = if r.ok { "ok" } else { "!!" };
        println!("[{mark}] {}", r.message);
        if !r.ok {
            failed += 1;
        }
    }
    if failed > 0 {
        anyhow::bail!("{failed} check(s) failed");
    }
    Ok(())
}

fn cmd_daemon(paths: &HomeHostsPaths, config_path: &std::path::Path, cmd: DaemonCmd) -> Result<()> {
    match cmd {
        DaemonCmd::Start { every } => {
            if every == 0 {
                anyhow::bail!("--every must be at least 1 second");
            }
            watch::daemon::start_daemon(paths, config_path, every)
        }
        DaemonCmd::Stop => watch::daemon::stop_daemon(paths),
        DaemonCmd::Status => {
            if let Some(state) = watch::daemon::daemon_status(paths)? {
                println!(
                    "Daemon running: pid={}, started={}",
                    state.pid, state.started_at
                );
                println!("  config: {}", state.config_path.display());
                println!("  every: {}s", state.interval_secs);
            } else {
                println!("Daemon not running");
            }
            Ok(())
        }
        DaemonCmd::Reload => watch::daemon::reload_daemon(paths),
    }
}
