use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

use agora::app::{App, AppEvent};
use agora::auth::StaticCredentials;
use agora::config::Config;
use agora::route::Route;
use agora::store::{FileStore, KeyValueStore};
use agora::ui;

/// Get the config directory path (~/.config/agora/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    let config_dir = PathBuf::from(home).join(".config").join("agora");
    Ok(config_dir)
}

#[derive(Parser, Debug)]
#[command(name = "agora", about = "Terminal forum client with a local topic store")]
struct Args {
    /// Screen to open at startup, as a path: /, /login, /register, /news, /profile
    #[arg(long, value_name = "PATH")]
    route: Option<String>,

    /// Reset the local store (session flag and topics)
    #[arg(long)]
    reset_store: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing for debug logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    // Set up config directory
    let config_dir = get_config_dir()?;
    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir).context("Failed to create config directory")?;
        println!("Created config directory: {}", config_dir.display());
    }

    // User-only access on Unix: the store holds the session flag
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        match std::fs::metadata(&config_dir) {
            Ok(metadata) => {
                let mut perms = metadata.permissions();
                perms.set_mode(0o700);
                if let Err(e) = std::fs::set_permissions(&config_dir, perms) {
                    tracing::warn!(
                        path = %config_dir.display(),
                        error = %e,
                        "Failed to set config directory permissions to 0700"
                    );
                }
            }
            Err(e) => {
                tracing::warn!(
                    path = %config_dir.display(),
                    error = %e,
                    "Failed to read config directory metadata"
                );
            }
        }
    }

    let config_path = config_dir.join("config.toml");
    let store_path = config_dir.join("store.json");

    let config = Config::load(&config_path).context("Failed to load configuration")?;

    // Handle --reset-store flag
    if args.reset_store && store_path.exists() {
        std::fs::remove_file(&store_path).context("Failed to delete store file")?;
        println!("Store reset.");
    }

    // Resolve the initial route before opening anything
    let initial_route = match &args.route {
        Some(path) => Route::from_path(path).with_context(|| {
            format!(
                "Unknown route '{}': expected one of /, /login, /register, /news, /profile",
                path
            )
        })?,
        None => Route::Home,
    };

    // Open the local store. Two instances writing the same file are not
    // reconciled: the last writer wins.
    let kv = Arc::new(FileStore::open(&store_path).context("Failed to open store file")?)
        as Arc<dyn KeyValueStore>;

    let verifier = Box::new(StaticCredentials::new(
        config.auth.username.clone(),
        config.auth.password.clone(),
    ));

    // Create app state
    let mut app = App::new(kv, verifier, &config).context("Failed to create application")?;

    // The route guard applies to the startup route too
    app.navigate(initial_route);

    // Create event channel for background tasks
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>(32);

    // Run the TUI
    ui::run(&mut app, event_tx, event_rx).await?;

    println!("До встречи!");
    Ok(())
}
