//! # ControlledResource Trait
//!
//! The contract a declarative resource implements to be managed by a
//! [`ResourceController`](crate::ResourceController). A resource carries a
//! desired spec (what the user asked for) and an observed status (what the
//! controller last saw in the world); the trait's hooks let the generic
//! controller admit, patch, and reconcile any such type.
//!
//! # Architecture Note
//! Associated types keep the whole surface type-safe: a controller for one
//! resource kind cannot be handed another kind's spec or patch, and each
//! kind declares its own error type and collaborator context. The
//! controller logic is written once and reused for every resource kind.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Contract for a declarative resource managed by a `ResourceController`.
///
/// # Desired vs Observed
/// Implementations are expected to keep the user's intent (spec) and the
/// controller's observations (status) as separate fields. `reconcile`
/// reads the spec, talks to the outside world, and writes the status; it
/// must never rewrite the spec.
///
/// # Async & Context
/// The trait is `#[async_trait]` so passes can await collaborator calls.
/// The `Context` type is injected into every hook at runtime ("late
/// binding"): collaborators are handed to
/// [`run()`](crate::ResourceController::run), not baked in at construction.
#[async_trait]
pub trait ControlledResource: Clone + Send + Sync + 'static {
    /// Unique identity of the resource. Must be convertible from `u32` so
    /// the controller can mint ids sequentially.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Desired state submitted at creation.
    type Spec: Send + Sync + Debug;

    /// A partial update to the desired state.
    type Patch: Send + Sync + Debug;

    /// Runtime dependencies injected into every pass. Use `()` when the
    /// resource needs none.
    type Context: Send + Sync;

    /// The resource's error type, surfaced through
    /// [`ControllerError::Resource`](crate::ControllerError::Resource).
    type Error: std::error::Error + Send + Sync + 'static;

    /// Admission: build the resource from its id and desired spec.
    /// Rejecting here keeps invalid resources out of the store entirely.
    fn from_spec(id: Self::Id, spec: Self::Spec) -> Result<Self, Self::Error>;

    /// Apply a partial update to the desired state. The controller runs a
    /// reconcile pass immediately afterwards.
    async fn apply_patch(
        &mut self,
        patch: Self::Patch,
        ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// One convergence pass: compare desired and observed state, call out
    /// to collaborators, and record observations on `self`.
    ///
    /// Mutations made before a failure are kept; the controller never rolls
    /// a pass back. Returning an error marks the pass failed for the
    /// caller, nothing more.
    async fn reconcile(&mut self, ctx: &Self::Context) -> Result<(), Self::Error>;

    /// True once observed state has converged and further passes are
    /// pointless. The [`resync`](crate::resync) driver stops here.
    fn settled(&self) -> bool {
        false
    }
}
