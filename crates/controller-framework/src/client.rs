//! # Generic Client
//!
//! This module defines the generic client for talking to a running
//! [`ResourceController`](crate::ResourceController).

use crate::error::ControllerError;
use crate::message::ControllerRequest;
use crate::resource::ControlledResource;
use tokio::sync::{mpsc, oneshot};

/// A type-safe client for a `ResourceController`.
///
/// Holds only the sender half of the controller channel, so it is cheap to
/// clone and share across tasks. Every method enqueues one request and
/// awaits the controller's oneshot reply; channel failures surface as
/// [`ControllerError::ControllerClosed`] /
/// [`ControllerError::ChannelDropped`].
#[derive(Clone)]
pub struct ControllerClient<R: ControlledResource> {
    sender: mpsc::Sender<ControllerRequest<R>>,
}

impl<R: ControlledResource> ControllerClient<R> {
    pub fn new(sender: mpsc::Sender<ControllerRequest<R>>) -> Self {
        Self { sender }
    }

    /// Admit a new resource from its desired spec. The controller runs the
    /// first reconcile pass right after replying with the new id.
    pub async fn create(&self, spec: R::Spec) -> Result<R::Id, ControllerError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ControllerRequest::Create { spec, respond_to })
            .await
            .map_err(|_| ControllerError::ControllerClosed)?;
        response.await.map_err(|_| ControllerError::ChannelDropped)?
    }

    /// Read the current resource (spec + status) by id.
    pub async fn get(&self, id: R::Id) -> Result<Option<R>, ControllerError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ControllerRequest::Get { id, respond_to })
            .await
            .map_err(|_| ControllerError::ControllerClosed)?;
        response.await.map_err(|_| ControllerError::ChannelDropped)?
    }

    /// Update desired state. The controller runs a reconcile pass right
    /// after replying with the patched resource.
    pub async fn patch(&self, id: R::Id, patch: R::Patch) -> Result<R, ControllerError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ControllerRequest::Patch {
                id,
                patch,
                respond_to,
            })
            .await
            .map_err(|_| ControllerError::ControllerClosed)?;
        response.await.map_err(|_| ControllerError::ChannelDropped)?
    }

    pub async fn delete(&self, id: R::Id) -> Result<(), ControllerError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ControllerRequest::Delete { id, respond_to })
            .await
            .map_err(|_| ControllerError::ControllerClosed)?;
        response.await.map_err(|_| ControllerError::ChannelDropped)?
    }

    /// Run one reconcile pass with no change to desired state. Returns the
    /// pass outcome: `Ok` for a converged or cleanly-ended pass, the
    /// resource's propagated error otherwise.
    pub async fn reconcile(&self, id: R::Id) -> Result<(), ControllerError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ControllerRequest::Reconcile { id, respond_to })
            .await
            .map_err(|_| ControllerError::ControllerClosed)?;
        response.await.map_err(|_| ControllerError::ChannelDropped)?
    }
}
