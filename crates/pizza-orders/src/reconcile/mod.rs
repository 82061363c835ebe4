//! # The Reconcile Pass
//!
//! One convergence pass for a pizza order. The pass never stores its state
//! machine explicitly; the phase is inferred from observed status:
//!
//! - `placed && !delivered` → **track**: poll fulfillment progress and map
//!   it onto the status tracker fields.
//! - otherwise → **price and place**: locate a store, match pizzas against
//!   its menu, validate the price, and, when placement was requested and
//!   has not already happened, submit payment and place the order.
//!
//! Failure policy per call site:
//!
//! - Missing address, store lookup, and menu fetch **propagate**; the
//!   invoker's requeue policy retries the pass later.
//! - Price validation, placement, credential lookup, and all tracking
//!   failures are logged, recorded as a status
//!   [`Condition`](crate::model::Condition), and **swallowed**; the pass
//!   ends cleanly.
//! - A pizza that cannot be matched is logged and **skipped**; the rest of
//!   the order proceeds.
//! - A closed store is informational: the pass ends with no mutation.
//!
//! Status mutations made before any failure are kept; the controller owns
//! the resource and the pass writes through `&mut`, so there is no
//! separate persist step to miss.
//!
//! Every collaborator call is bounded by the per-call deadline carried in
//! the [`ReconcileContext`]; an elapsed deadline is an ordinary failure of
//! that call site.

pub mod matcher;
pub mod payment;

use crate::credentials::{CredentialError, CredentialStore};
use crate::model::{ConditionReason, PizzaOrder, StoreObservation, TrackerTimes};
use crate::ordering::{OrderDraft, OrderingService, ServiceError, TrackerSnapshot};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Collaborators and limits injected into every pass.
pub struct ReconcileContext {
    pub ordering: Arc<dyn OrderingService>,
    pub credentials: Arc<dyn CredentialStore>,
    /// Namespace credential references resolve in.
    pub namespace: String,
    /// Deadline applied to each individual collaborator call.
    pub call_timeout: Duration,
}

/// Errors a pass propagates to the invoker. Everything else is swallowed.
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    #[error("order has no delivery address")]
    MissingAddress,
    #[error("store lookup failed: {0}")]
    StoreLookup(#[source] ServiceError),
    #[error("menu fetch failed: {0}")]
    MenuFetch(#[source] ServiceError),
}

/// Errors that can stand in for an elapsed per-call deadline.
trait DeadlineError {
    fn deadline_exceeded() -> Self;
}

impl DeadlineError for ServiceError {
    fn deadline_exceeded() -> Self {
        ServiceError::DeadlineExceeded
    }
}

impl DeadlineError for CredentialError {
    fn deadline_exceeded() -> Self {
        CredentialError::Unavailable("deadline exceeded".to_string())
    }
}

/// Bounds one collaborator call by the pass's per-call deadline.
async fn bounded<T, E>(
    timeout: Duration,
    call: impl Future<Output = Result<T, E>>,
) -> Result<T, E>
where
    E: DeadlineError,
{
    tokio::time::timeout(timeout, call)
        .await
        .unwrap_or_else(|_| Err(E::deadline_exceeded()))
}

/// Runs one pass for `order`.
pub async fn run_pass(order: &mut PizzaOrder, ctx: &ReconcileContext) -> Result<(), ReconcileError> {
    if order.status.placed && !order.status.delivered {
        track(order, ctx).await;
        Ok(())
    } else {
        price_and_place(order, ctx).await
    }
}

/// Poll fulfillment progress for a placed order. All failures here are
/// swallowed; whatever was recorded before the failure stands.
async fn track(order: &mut PizzaOrder, ctx: &ReconcileContext) {
    let Some(address) = &order.spec.address else {
        warn!(id = %order.id, "placed order has no address to derive tracking from");
        return;
    };

    let handle = match bounded(
        ctx.call_timeout,
        ctx.ordering.resolve_tracking_handle(&address.phone),
    )
    .await
    {
        Ok(handle) => handle,
        Err(e) => {
            warn!(id = %order.id, error = %e, "unable to resolve tracking handle");
            order
                .status
                .set_condition(ConditionReason::TrackingUnavailable, e.to_string());
            return;
        }
    };

    let snapshot = match bounded(ctx.call_timeout, ctx.ordering.fetch_tracker_snapshot(&handle))
        .await
    {
        Ok(snapshot) => snapshot,
        Err(e) => {
            warn!(id = %order.id, error = %e, "unable to fetch tracker snapshot");
            order
                .status
                .set_condition(ConditionReason::TrackingUnavailable, e.to_string());
            return;
        }
    };

    let tracker = tracker_times(&snapshot);
    if tracker.delivered.is_some() {
        info!(id = %order.id, "order delivered");
        order.status.delivered = true;
    }
    order.status.tracker = Some(tracker);
    order.status.clear_condition();
}

/// The five snapshot stages map positionally onto the five status fields.
fn tracker_times(snapshot: &TrackerSnapshot) -> TrackerTimes {
    TrackerTimes {
        prep: snapshot.start_time.clone(),
        bake: snapshot.oven_time.clone(),
        quality_check: snapshot.rack_time.clone(),
        out_for_delivery: snapshot.route_time.clone(),
        delivered: snapshot.delivery_time.clone(),
    }
}

/// Price the order and, when requested and not yet done, place it.
async fn price_and_place(
    order: &mut PizzaOrder,
    ctx: &ReconcileContext,
) -> Result<(), ReconcileError> {
    let address = order
        .spec
        .address
        .clone()
        .ok_or(ReconcileError::MissingAddress)?;

    let store = bounded(ctx.call_timeout, ctx.ordering.locate_nearest_store(&address))
        .await
        .map_err(ReconcileError::StoreLookup)?;

    let store_address = store.address.replace('\n', " ");
    if !store.open {
        info!(
            id = %order.id,
            store = %store.id,
            address = %store_address,
            "nearest store is not open for business"
        );
        return Ok(());
    }

    order.status.store = Some(StoreObservation {
        id: store.id.clone(),
        address: store_address,
    });

    let customer = &order.spec.customer;
    let mut draft = OrderDraft::new()
        .with_address(address.clone())
        .with_customer(&customer.first_name, &customer.last_name, &customer.email)
        .with_phone(address.phone.replace('-', ""))
        .with_store(store.id.as_str());

    let menu = bounded(ctx.call_timeout, ctx.ordering.fetch_menu(&store.id))
        .await
        .map_err(ReconcileError::MenuFetch)?;

    for pizza in &order.spec.pizzas {
        match matcher::match_pizza(&menu, pizza) {
            Ok(product) => draft.add_product(product),
            // The partial result inside the error is deliberately unused:
            // an incomplete pizza is dropped, not silently downgraded.
            Err(e) => {
                warn!(id = %order.id, error = %e, "unable to match pizza against menu, skipping");
                continue;
            }
        }
    }

    if let Some(code) = menu.promo_coupon() {
        draft.add_coupon(code);
    }

    debug!(id = %order.id, ?draft, "validating order");
    let price = match bounded(ctx.call_timeout, ctx.ordering.validate_price(&draft)).await {
        Ok(price) => price,
        Err(e) => {
            warn!(id = %order.id, error = %e, "unable to validate order");
            order
                .status
                .set_condition(ConditionReason::PriceRejected, e.to_string());
            return Ok(());
        }
    };
    order.status.price = Some(format!("{price:.2}"));

    if order.spec.place_order && !order.status.placed && order.status.order_id.is_none() {
        if !place(order, ctx, draft, price).await {
            return Ok(());
        }
    }

    order.status.clear_condition();
    Ok(())
}

/// Submit payment and place the order. Reached at most once per resource:
/// the caller's guard never fires again after an order id is recorded.
/// Returns false when placement was skipped or failed, leaving the
/// recorded condition in place.
async fn place(
    order: &mut PizzaOrder,
    ctx: &ReconcileContext,
    mut draft: OrderDraft,
    price: f64,
) -> bool {
    info!(id = %order.id, "placing order");

    let record = match bounded(
        ctx.call_timeout,
        ctx.credentials
            .get_credential(&order.spec.payment_secret, &ctx.namespace),
    )
    .await
    {
        Ok(record) => record,
        Err(e) => {
            warn!(id = %order.id, error = %e, "unable to read payment credential");
            order
                .status
                .set_condition(ConditionReason::PaymentUnavailable, e.to_string());
            return false;
        }
    };

    let mut pay = match payment::assemble_payment(&record) {
        Ok(pay) => pay,
        Err(e) => {
            warn!(id = %order.id, error = %e, "unable to assemble payment");
            order
                .status
                .set_condition(ConditionReason::PaymentInvalid, e.to_string());
            return false;
        }
    };
    pay.amount = price;
    draft.set_payment(pay);

    let confirmation = match bounded(ctx.call_timeout, ctx.ordering.place_order(&draft)).await {
        Ok(confirmation) => confirmation,
        Err(e) => {
            warn!(id = %order.id, error = %e, "unable to place order");
            order
                .status
                .set_condition(ConditionReason::PlacementFailed, e.to_string());
            return false;
        }
    };

    info!(id = %order.id, order_id = %confirmation.order_id, "order placed");
    order.status.placed = true;
    order.status.order_id = Some(confirmation.order_id);
    true
}
