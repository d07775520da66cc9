//! # Observability & Tracing
//!
//! The [`setup_tracing`] function initializes structured logging with the `tracing` crate.
//!
//! ## Configuration
//!
//! The compact format hides the crate/module prefix (`with_target(false)`); the
//! store actors tag their events with `entity_type` instead. `RUST_LOG` wins when
//! set, otherwise the `logging.level` value from [`StoreConfig`](crate::config::StoreConfig)
//! is used.
//!
//! ## What Gets Traced
//!
//! - **Store lifecycle**: `Store started` / `Shutdown` with the final collection size
//! - **Store operations**: `Loaded`, `Inserted`, `Re-keyed`, `Patched`, `Removed`
//! - **Mutators**: one span per call (`update_product`, `replace_lines`, ...) with its arguments
//! - **Fallbacks**: a `WARN` line whenever a remote failure is absorbed locally
//!
//! ## Usage Examples
//!
//! ```bash
//! # Compact logs (default)
//! RUST_LOG=info cargo run
//!
//! # Requests, payloads and re-keying
//! RUST_LOG=debug cargo run
//!
//! # Only the gateway
//! RUST_LOG=dashboard_store::gateway=debug cargo run
//! ```
//!
//! ## Workflow Trace Example
//!
//! Deleting a product the remote does not know, with `RUST_LOG=info`:
//!
//! ```text
//! INFO Store started entity_type="Product"
//! INFO Loaded entity_type="Product" size=30
//! WARN delete_product{key=Remote(12)}:delete_product{id=12}: Remote rejected request status=404
//! WARN delete_product{key=Remote(12)}: Remote does not know product, removing locally
//! INFO Removed entity_type="Product" key=remote_12 removed=true size=29
//! ```
//!
//! Store events carry no span: each actor runs in its own task.
use tracing_subscriber::EnvFilter;

pub fn setup_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // Don't show module paths - we use entity_type instead
        .compact() // Compact format shows spans inline (e.g., "delete_product:delete_product")
        .init();
}
