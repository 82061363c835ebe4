//! # Controller Framework
//!
//! This crate provides the building blocks for declarative resource
//! controllers in Rust: resources that pair a **desired spec** with an
//! **observed status**, and a controller task that repeatedly runs a
//! *reconcile pass* to drive the outside world toward the spec while
//! recording what it observed back onto the resource.
//!
//! ## The Convergence Pattern
//!
//! A resource is a record of intent ("I want this to exist, configured like
//! so"), not a command. The controller owns a collection of resources and,
//! whenever one is created, patched, or resynced, runs one reconcile pass
//! for it:
//!
//! 1. Read the resource's desired spec and current observed status.
//! 2. Call out to external collaborators to close the gap.
//! 3. Record whatever was observed onto the status, even if the pass
//!    ultimately fails partway through.
//!
//! A failed pass is not rolled back and not retried in-process; the next
//! invocation (create, patch, or a [`resync`] tick) simply runs another
//! pass against whatever state the world is in by then.
//!
//! ## Concurrency Model
//!
//! Each [`ResourceController`] runs in its own Tokio task and processes
//! requests **sequentially** from an mpsc channel. That sequencing is the
//! whole concurrency story: there is never more than one in-flight pass per
//! resource identity, so passes can hold `&mut` access to their resource
//! with no locks, and a pass's status mutations are durable the moment they
//! happen. Controllers for different resource types run in parallel.
//!
//! ## Core Abstractions
//!
//! - [`ControlledResource`] — the contract a resource type implements:
//!   admission from a spec, patch application, the reconcile pass, and a
//!   `settled` predicate marking terminal convergence.
//! - [`ResourceController`] — the task that owns resources and serializes
//!   passes.
//! - [`ControllerClient`] — cloneable typed handle for submitting requests.
//! - [`ControllerHandle`] — trait giving domain-specific client wrappers
//!   the standard operations for free.
//! - [`mock`] — channel-backed and scripted test doubles for unit-testing
//!   client wrappers without a live controller.
//! - [`resync`] — the interval driver that re-triggers passes until a
//!   resource settles.
//!
//! ## Example
//!
//! ```rust
//! use controller_framework::{ControlledResource, ResourceController};
//! use async_trait::async_trait;
//!
//! // A resource whose observed level converges toward a desired target,
//! // one step per pass.
//! #[derive(Clone, Debug)]
//! struct Gauge {
//!     id: u32,
//!     target: u32,
//!     observed: u32,
//! }
//!
//! #[derive(Debug)]
//! struct GaugeSpec {
//!     target: u32,
//! }
//!
//! #[derive(Debug)]
//! struct GaugePatch {
//!     target: Option<u32>,
//! }
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("gauge error")]
//! struct GaugeError;
//!
//! #[async_trait]
//! impl ControlledResource for Gauge {
//!     type Id = u32;
//!     type Spec = GaugeSpec;
//!     type Patch = GaugePatch;
//!     type Context = ();
//!     type Error = GaugeError;
//!
//!     fn from_spec(id: u32, spec: GaugeSpec) -> Result<Self, Self::Error> {
//!         Ok(Self { id, target: spec.target, observed: 0 })
//!     }
//!
//!     async fn apply_patch(&mut self, patch: GaugePatch, _ctx: &()) -> Result<(), Self::Error> {
//!         if let Some(target) = patch.target {
//!             self.target = target;
//!         }
//!         Ok(())
//!     }
//!
//!     async fn reconcile(&mut self, _ctx: &()) -> Result<(), Self::Error> {
//!         if self.observed < self.target {
//!             self.observed += 1;
//!         }
//!         Ok(())
//!     }
//!
//!     fn settled(&self) -> bool {
//!         self.observed == self.target
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (controller, client) = ResourceController::<Gauge>::new(10);
//!     tokio::spawn(controller.run(()));
//!
//!     // Admission runs one pass immediately.
//!     let id = client.create(GaugeSpec { target: 2 }).await.unwrap();
//!     let gauge = client.get(id).await.unwrap().unwrap();
//!     assert_eq!(gauge.observed, 1);
//!
//!     // A resync pass converges the rest of the way.
//!     client.reconcile(id).await.unwrap();
//!     let gauge = client.get(id).await.unwrap().unwrap();
//!     assert!(gauge.settled());
//! }
//! ```
//!
//! ## Context Injection
//!
//! External collaborators (service clients, credential stores) are injected
//! at runtime via [`ResourceController::run`], not at construction time.
//! Every pass receives the context by reference, so the resource type
//! declares its dependencies once in `ControlledResource::Context` and the
//! wiring layer decides the concrete implementations.

pub mod client;
pub mod controller;
pub mod error;
pub mod handle;
pub mod message;
pub mod mock;
pub mod resource;
pub mod resync;
pub mod tracing;

// Re-export core types for convenience
pub use client::ControllerClient;
pub use controller::ResourceController;
pub use error::ControllerError;
pub use handle::ControllerHandle;
pub use message::{ControllerRequest, Respond};
pub use resource::ControlledResource;
