//! # System Lifecycle & Orchestration
//!
//! Wires the controller, its collaborators, and the resync machinery into
//! a running system, and coordinates graceful shutdown.
//!
//! Collaborators are injected here, not constructed here: the caller
//! decides whether the ordering service is the sandbox, a scripted test
//! double, or a real client, and the rest of the system never knows the
//! difference.

pub mod system;

pub use system::{OrderSystem, SystemConfig};
