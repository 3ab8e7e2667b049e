//! # Commands Module
//!
//! Everything the views (or the shell) can ask of the app.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs         ◄─── You are here (exports)
//! ├── cart.rs        ◄─── Cart manipulation
//! ├── toast.rs       ◄─── Show / dismiss notifications
//! └── navigation.rs  ◄─── Path → view resolution
//! ```
//!
//! ## State Injection
//! Each command takes only the state it needs:
//! ```rust,ignore
//! // Only needs toasts
//! fn show_toast(toasts: &ToastManager<S>, message: &str, duration_ms: Option<u64>)
//!
//! // Needs the cart and the currency settings
//! async fn add_to_cart(cart: &CartState<S>, config: &AppConfig, product_json: &str)
//!
//! // Needs nothing
//! fn navigate(path: &str)
//! ```
//!
//! Responses serialize to camelCase JSON; failures are `ApiError`.

pub mod cart;
pub mod navigation;
pub mod toast;
