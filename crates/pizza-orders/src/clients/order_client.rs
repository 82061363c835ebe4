//! # Pizza Order Client
//!
//! High-level API for the pizza order controller. Wraps the generic
//! `ControllerClient<PizzaOrder>` and exposes domain-specific entry
//! points; `get`, `delete`, and `reconcile` come from [`ControllerHandle`].

use crate::controller::OrderError;
use crate::model::{OrderSpec, OrderSpecPatch, OrderStatus, PizzaOrder, PizzaOrderId};
use async_trait::async_trait;
use controller_framework::{ControllerClient, ControllerError, ControllerHandle};
use tracing::{debug, instrument};

/// Client for interacting with the pizza order controller.
#[derive(Clone)]
pub struct PizzaOrderClient {
    inner: ControllerClient<PizzaOrder>,
}

impl PizzaOrderClient {
    pub fn new(inner: ControllerClient<PizzaOrder>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ControllerHandle<PizzaOrder> for PizzaOrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ControllerClient<PizzaOrder> {
        &self.inner
    }

    fn map_error(e: ControllerError) -> Self::Error {
        OrderError::ControllerUnavailable(e.to_string())
    }
}

impl PizzaOrderClient {
    /// Submit a new desired order. The controller runs the first reconcile
    /// pass immediately after admission.
    #[instrument(skip(self))]
    pub async fn create_order(&self, spec: OrderSpec) -> Result<PizzaOrderId, OrderError> {
        debug!("sending request");
        self.inner
            .create(spec)
            .await
            .map_err(|e| OrderError::ControllerUnavailable(e.to_string()))
    }

    /// Flip the placement flag on an existing order; the follow-up pass
    /// submits payment if the flag turned on.
    #[instrument(skip(self))]
    pub async fn set_place_order(
        &self,
        id: PizzaOrderId,
        place_order: bool,
    ) -> Result<PizzaOrder, OrderError> {
        debug!("sending request");
        self.inner
            .patch(
                id,
                OrderSpecPatch {
                    place_order: Some(place_order),
                    ..OrderSpecPatch::default()
                },
            )
            .await
            .map_err(|e| OrderError::ControllerUnavailable(e.to_string()))
    }

    /// The observed status of an order, if the order exists.
    #[instrument(skip(self))]
    pub async fn status(&self, id: PizzaOrderId) -> Result<Option<OrderStatus>, OrderError> {
        debug!("sending request");
        let order = self
            .inner
            .get(id)
            .await
            .map_err(|e| OrderError::ControllerUnavailable(e.to_string()))?;
        Ok(order.map(|o| o.status))
    }
}
