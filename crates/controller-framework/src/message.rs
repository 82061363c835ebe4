//! # Controller Messages
//!
//! The request types sent from a [`ControllerClient`](crate::ControllerClient)
//! to its [`ResourceController`](crate::ResourceController).

use crate::error::ControllerError;
use crate::resource::ControlledResource;
use tokio::sync::oneshot;

/// One-shot reply channel used by the controller to answer a request.
pub type Respond<T> = oneshot::Sender<Result<T, ControllerError>>;

/// Request sent to the controller task.
///
/// The variants mirror the lifecycle of a declarative resource:
///
/// - **Create** admits a new resource from its desired spec and runs its
///   first reconcile pass.
/// - **Get** reads the current resource (spec + status) by id.
/// - **Patch** updates the desired state and runs a pass.
/// - **Delete** removes the resource.
/// - **Reconcile** runs a pass with no change to desired state. This is
///   how resync re-invokes the controller; on an unknown id it is a clean
///   no-op, since a resource deleted between tick and delivery is not an
///   error.
///
/// The enum is generic over `R: ControlledResource`, so a controller for
/// one resource kind can only ever be sent that kind's spec and patch
/// types.
#[derive(Debug)]
pub enum ControllerRequest<R: ControlledResource> {
    Create {
        spec: R::Spec,
        respond_to: Respond<R::Id>,
    },
    Get {
        id: R::Id,
        respond_to: Respond<Option<R>>,
    },
    Patch {
        id: R::Id,
        patch: R::Patch,
        respond_to: Respond<R>,
    },
    Delete {
        id: R::Id,
        respond_to: Respond<()>,
    },
    Reconcile {
        id: R::Id,
        respond_to: Respond<()>,
    },
}
