//! # State Module
//!
//! Application state, one type per concern.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  run() builds each piece once and hands references to commands          │
//! │                              │                                          │
//! │          ┌──────────────────┼──────────────────┐                       │
//! │          ▼                  ▼                  ▼                        │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐              │
//! │  │  CartState   │  │ ToastManager │  │    AppConfig     │              │
//! │  │              │  │              │  │                  │              │
//! │  │  Arc<Mutex<  │  │  Arc<board>  │  │  storage key     │              │
//! │  │   CartStore  │  │  + scheduler │  │  toast defaults  │              │
//! │  │  >>          │  │              │  │  currency        │              │
//! │  └──────┬───────┘  └──────────────┘  └──────────────────┘              │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────┐                                                      │
//! │  │ MirrorStore  │  SQLite, or memory if the file cannot be opened      │
//! │  └──────────────┘                                                      │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • CartState: tokio Mutex, held across the snapshot write              │
//! │  • ToastManager: std Mutex, held only for a push / retain              │
//! │  • AppConfig: read-only after initialization                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod config;
mod storage;
mod toast;

pub use cart::{CartState, CartStore, CartTotals};
pub use config::{AppConfig, ConfigError, ConfigResult, DisplaySettings, StorageSettings, ToastSettings};
pub use storage::MirrorStore;
pub use toast::{ToastHandle, ToastManager};
