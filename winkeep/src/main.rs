use std::path::PathBuf;

use anyhow::Result;
use argh::FromArgs;
use tracing_subscriber::EnvFilter;
use winkeep::headless::HeadlessConfig;
use winkeep::persistence::{decode_snapshot, default_store_path};
use winkeep::{App, Config, FileStore, SnapshotStore};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Winkeep - window geometry persistence
#[derive(FromArgs)]
struct Cli {
    #[argh(subcommand)]
    command: Option<SubCommand>,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum SubCommand {
    Run(RunCmd),
    Show(ShowCmd),
    Clear(ClearCmd),
    Version(VersionCmd),
}

/// Run a headless window session driven by JSON-lines actions on stdin
#[derive(FromArgs)]
#[argh(subcommand, name = "run")]
struct RunCmd {
    /// path of the window state record
    #[argh(option)]
    store: Option<PathBuf>,
    /// quiet period in milliseconds before a resize counts as settled
    #[argh(option, default = "winkeep::core::DEFAULT_DEBOUNCE_MS")]
    debounce_ms: u64,
    /// save after every settled resize
    #[argh(switch)]
    autosave: bool,
    /// extra height the simulated window reports beyond its content
    #[argh(option, default = "0")]
    frame_height: u32,
}

/// Print the saved window state record
#[derive(FromArgs)]
#[argh(subcommand, name = "show")]
struct ShowCmd {
    /// path of the window state record
    #[argh(option)]
    store: Option<PathBuf>,
}

/// Delete the saved window state record
#[derive(FromArgs)]
#[argh(subcommand, name = "clear")]
struct ClearCmd {
    /// path of the window state record
    #[argh(option)]
    store: Option<PathBuf>,
}

/// Show version information
#[derive(FromArgs)]
#[argh(subcommand, name = "version")]
struct VersionCmd {}

fn main() -> Result<()> {
    let cli: Cli = argh::from_env();

    match cli.command {
        None => {
            // No subcommand - show help (simulate --help)
            let args: Vec<&str> = vec!["winkeep", "--help"];
            match Cli::from_args(&args[..1], &args[1..]) {
                Ok(_) => {}
                Err(e) => {
                    println!("{}", e.output);
                }
            }
            Ok(())
        }
        Some(SubCommand::Run(cmd)) => {
            // stdout carries status replies, logs go to stderr
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::from_default_env())
                .with_writer(std::io::stderr)
                .init();

            let config = Config::new()
                .with_debounce_ms(cmd.debounce_ms)
                .with_autosave(cmd.autosave)
                .with_store_path(store_path(cmd.store));
            let headless = HeadlessConfig {
                frame_height: cmd.frame_height,
                ..Default::default()
            };

            tracing::info!("winkeep starting, record at {}", config.store_path.display());
            let store = FileStore::new(config.store_path.clone());
            App::run(config, headless, store)
        }
        Some(SubCommand::Show(cmd)) => show(FileStore::new(store_path(cmd.store))),
        Some(SubCommand::Clear(cmd)) => {
            let store = FileStore::new(store_path(cmd.store));
            if store.clear()? {
                println!("Removed {}", store.path().display());
            } else {
                println!("No record at {}", store.path().display());
            }
            Ok(())
        }
        Some(SubCommand::Version(_)) => {
            println!("winkeep {}", VERSION);
            Ok(())
        }
    }
}

fn store_path(store: Option<PathBuf>) -> PathBuf {
    store.unwrap_or_else(default_store_path)
}

fn show(store: FileStore) -> Result<()> {
    let Some(blob) = store.load()? else {
        println!("No record at {}", store.path().display());
        return Ok(());
    };

    match decode_snapshot(&blob) {
        Ok(snapshot) => {
            println!("Mode: {}", snapshot.mode);
            match (snapshot.x, snapshot.y) {
                (Some(x), Some(y)) => println!("Position: ({}, {})", x, y),
                _ => println!("Position: missing"),
            }
            match (snapshot.width, snapshot.height) {
                (Some(w), Some(h)) => println!("Size: {}x{}", w, h),
                _ => println!("Size: missing"),
            }
            if let Some(delta) = snapshot.delta_height {
                println!("Height delta: {}", delta);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            println!("{}", blob);
            std::process::exit(1);
        }
    }
    Ok(())
}
