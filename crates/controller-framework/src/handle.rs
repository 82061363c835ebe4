//! # ControllerHandle Trait
//!
//! Common interface for resource-specific client wrappers, providing
//! default `get`, `delete`, and `reconcile` methods on top of the generic
//! [`ControllerClient`].

use crate::{ControlledResource, ControllerClient, ControllerError};
use async_trait::async_trait;

/// Trait for domain client wrappers to inherit the standard operations.
///
/// A wrapper supplies access to its inner generic client and a mapping
/// from [`ControllerError`] to its own error type; the standard read,
/// delete, and resync operations come for free. Domain-specific entry
/// points (creation with a typed payload, targeted patches) stay on the
/// wrapper's own `impl`.
///
/// # Example
///
/// ```rust
/// use controller_framework::{
///     ControlledResource, ControllerClient, ControllerError, ControllerHandle,
/// };
/// use async_trait::async_trait;
///
/// # #[derive(Clone, Debug)]
/// # struct Gauge { id: u32 }
/// # #[derive(Debug)] struct GaugeSpec;
/// # #[derive(Debug)] struct GaugePatch;
/// # #[derive(Debug, thiserror::Error)]
/// # #[error("{0}")]
/// # struct GaugeError(String);
/// # impl From<String> for GaugeError {
/// #     fn from(s: String) -> Self { GaugeError(s) }
/// # }
/// # #[async_trait]
/// # impl ControlledResource for Gauge {
/// #     type Id = u32; type Spec = GaugeSpec; type Patch = GaugePatch;
/// #     type Context = (); type Error = GaugeError;
/// #     fn from_spec(id: u32, _: GaugeSpec) -> Result<Self, Self::Error> { Ok(Self { id }) }
/// #     async fn apply_patch(&mut self, _: GaugePatch, _: &()) -> Result<(), Self::Error> { Ok(()) }
/// #     async fn reconcile(&mut self, _: &()) -> Result<(), Self::Error> { Ok(()) }
/// # }
/// struct GaugeClient {
///     inner: ControllerClient<Gauge>,
/// }
///
/// #[async_trait]
/// impl ControllerHandle<Gauge> for GaugeClient {
///     type Error = GaugeError;
///
///     fn inner(&self) -> &ControllerClient<Gauge> {
///         &self.inner
///     }
///
///     fn map_error(e: ControllerError) -> Self::Error {
///         GaugeError(e.to_string())
///     }
/// }
///
/// async fn usage(client: GaugeClient) {
///     // get(), delete(), and reconcile() are provided automatically.
///     let _ = client.get(1).await;
///     let _ = client.reconcile(1).await;
///     let _ = client.delete(1).await;
/// }
/// ```
#[async_trait]
pub trait ControllerHandle<R: ControlledResource>: Send + Sync {
    /// The resource-specific error type.
    type Error: From<String> + Send + Sync;

    /// Access the inner generic client.
    fn inner(&self) -> &ControllerClient<R>;

    /// Map framework errors to the resource-specific error type.
    fn map_error(e: ControllerError) -> Self::Error;

    /// Fetch a resource by id.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: R::Id) -> Result<Option<R>, Self::Error> {
        tracing::debug!("sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Delete a resource by id.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: R::Id) -> Result<(), Self::Error> {
        tracing::debug!("sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }

    /// Run one reconcile pass for a resource.
    #[tracing::instrument(skip(self))]
    async fn reconcile(&self, id: R::Id) -> Result<(), Self::Error> {
        tracing::debug!("sending request");
        self.inner().reconcile(id).await.map_err(Self::map_error)
    }
}
