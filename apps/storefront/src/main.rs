//! # Storefront Entry Point
//!
//! This is the binary entry point. All logic lives in `lib.rs`.

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    storefront_lib::run().await
}
