//! # Pizza Order Controller Wiring
//!
//! Binds [`PizzaOrder`](crate::model::PizzaOrder) into the generic
//! controller framework.
//!
//! ## Structure
//!
//! - [`entity`] - the `ControlledResource` implementation: admission
//!   validation, spec patching, reconcile delegation, and the settled
//!   (delivered) terminal check
//! - [`error`] - [`OrderError`] for type-safe error handling
//! - [`new()`] - factory that creates the controller and its client
//!
//! ## Usage
//!
//! ```rust,ignore
//! let (controller, client) = controller::new(32);
//! tokio::spawn(controller.run(reconcile_context));
//!
//! let id = client.create_order(spec).await?;
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::PizzaOrderClient;
use crate::model::PizzaOrder;
use controller_framework::ResourceController;

/// Creates a new pizza order controller and its client.
pub fn new(capacity: usize) -> (ResourceController<PizzaOrder>, PizzaOrderClient) {
    let (controller, generic_client) = ResourceController::new(capacity);
    let client = PizzaOrderClient::new(generic_client);
    (controller, client)
}
