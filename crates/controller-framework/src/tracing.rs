//! # Observability & Tracing
//!
//! Structured logging setup for controller systems.
//!
//! ## What Gets Traced
//!
//! - **Controller lifecycle**: startup, shutdown, final store size
//! - **Resource operations**: admission, patches, deletes, with ids and
//!   store sizes as structured fields
//! - **Reconcile passes**: outcome per pass, swallowed collaborator
//!   failures at `warn`, payloads at `debug`
//!
//! ## Configuration
//!
//! Levels come from the `RUST_LOG` environment variable:
//!
//! ```bash
//! RUST_LOG=info cargo run     # compact operational logs
//! RUST_LOG=debug cargo run    # full specs, drafts, and pass detail
//! ```
//!
//! The compact format hides module paths (`with_target(false)`); the
//! structured `kind` field identifies the controller instead.

/// Initializes the tracing subscriber once for the whole process.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
