//! `ControlledResource` implementation for the pizza order resource.
//!
//! Admission enforces the persisted schema's constraints; every reconcile
//! pass is delegated to [`reconcile::run_pass`]; an order is settled once
//! it has been delivered.

use crate::controller::error::OrderError;
use crate::model::{OrderSpec, OrderSpecPatch, OrderStatus, PizzaOrder, PizzaOrderId};
use crate::reconcile::{self, ReconcileContext};
use async_trait::async_trait;
use controller_framework::ControlledResource;

#[async_trait]
impl ControlledResource for PizzaOrder {
    type Id = PizzaOrderId;
    type Spec = OrderSpec;
    type Patch = OrderSpecPatch;
    type Context = ReconcileContext;
    type Error = OrderError;

    fn from_spec(id: PizzaOrderId, spec: OrderSpec) -> Result<Self, Self::Error> {
        spec.validate().map_err(OrderError::Validation)?;
        Ok(Self {
            id,
            spec,
            status: OrderStatus::default(),
        })
    }

    async fn apply_patch(
        &mut self,
        patch: OrderSpecPatch,
        _ctx: &ReconcileContext,
    ) -> Result<(), Self::Error> {
        if let Some(place_order) = patch.place_order {
            self.spec.place_order = place_order;
        }
        if let Some(payment_secret) = patch.payment_secret {
            self.spec.payment_secret = payment_secret;
        }
        Ok(())
    }

    async fn reconcile(&mut self, ctx: &ReconcileContext) -> Result<(), Self::Error> {
        reconcile::run_pass(self, ctx).await?;
        Ok(())
    }

    fn settled(&self) -> bool {
        self.status.delivered
    }
}
