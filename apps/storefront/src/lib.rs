//! # Storefront Library
//!
//! Core library for the storefront application: state, commands and the
//! interactive shell that drives them.
//!
//! ## Module Organization
//! ```text
//! storefront_lib/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── cart.rs     ◄─── Cart store + durable mirror
//! │   ├── toast.rs    ◄─── Toast list + auto-dismiss
//! │   ├── storage.rs  ◄─── SQLite / memory mirror selection
//! │   └── config.rs   ◄─── Configuration (toml + env)
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── cart.rs     ◄─── Cart manipulation commands
//! │   ├── toast.rs    ◄─── Notification commands
//! │   └── navigation.rs ◄─ Route resolution command
//! ├── routes.rs       ◄─── Path → view table
//! ├── scheduler.rs    ◄─── Timer abstraction
//! ├── shell.rs        ◄─── stdin/stdout front end
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod routes;
pub mod scheduler;
pub mod shell;
pub mod state;

use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

use scheduler::TokioScheduler;
use shell::Shell;
use state::{AppConfig, CartState, MirrorStore, ToastManager};

/// Runs the storefront shell until stdin closes or `quit` is entered.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults → storefront.toml → STOREFRONT_* variables               │
/// │                                                                         │
/// │  3. Open the Cart Mirror ─────────────────────────────────────────────► │
/// │     • SQLite with WAL mode, migrations applied                          │
/// │     • Memory fallback if the file cannot be opened                      │
/// │                                                                         │
/// │  4. Initialize State Objects ─────────────────────────────────────────► │
/// │     • CartState: rehydrated from the mirror                             │
/// │     • ToastManager: tokio timers                                        │
/// │                                                                         │
/// │  5. Run the Shell ────────────────────────────────────────────────────► │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    info!("Starting storefront");

    let config = AppConfig::load_or_default(None);

    let db_path = config.database_path();
    info!(?db_path, "Database path determined");

    let (storage, database) = MirrorStore::open(&db_path).await;
    info!(durable = storage.is_durable(), "Cart mirror selected");

    let cart = CartState::load(storage, config.cart_key()).await;
    {
        let store = cart.lock().await;
        info!(
            lines = store.items().len(),
            count = store.cart_count(),
            "Cart ready"
        );
    }

    let scheduler = TokioScheduler::current().ok_or("No tokio runtime available")?;
    let toasts = ToastManager::new(scheduler)
        .default_duration(config.toast_duration())
        .max_visible(config.toast.max_visible);

    let shell = Shell::new(cart, toasts, config);
    shell
        .run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await?;

    if let Some(db) = database {
        db.close().await;
    }

    info!("Storefront stopped");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=storefront=trace` - Show trace for the app only
/// - Default: INFO, with debug for the app
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,storefront=debug,storefront_lib=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
