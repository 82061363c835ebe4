//! # Ordering Service Contract
//!
//! The third-party ordering service, seen through the narrow set of
//! operations a reconcile pass needs: locate a store, fetch its menu,
//! validate an order's price, place the order, and track fulfillment.
//! The wire protocol lives behind this trait; the controller only ever
//! sees these operations and their typed results.
//!
//! [`sandbox::SandboxOrderingService`] provides a deterministic in-memory
//! implementation for the demo binary and end-to-end tests.

pub mod draft;
pub mod menu;
pub mod sandbox;

pub use draft::{OrderDraft, OrderProduct, Payment, PaymentKind, ToppingOption};
pub use menu::{CrustStyle, Menu, SizeEntry, ToppingEntry, Variant};

use crate::model::Address;
use async_trait::async_trait;

/// A store as reported by the locator. `address` may contain embedded
/// newlines; consumers normalize before recording it.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreInfo {
    pub id: String,
    pub address: String,
    pub open: bool,
}

/// Opaque handle for tracking an order's fulfillment.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackingHandle(pub String);

/// Point-in-time fulfillment progress as reported by the tracker. A `None`
/// stage has not started.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackerSnapshot {
    pub start_time: Option<String>,
    pub oven_time: Option<String>,
    pub rack_time: Option<String>,
    pub route_time: Option<String>,
    pub delivery_time: Option<String>,
}

/// Successful placement response.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderConfirmation {
    pub order_id: String,
}

/// Failures reported by (or on the way to) the ordering service.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ServiceError {
    #[error("ordering service unavailable: {0}")]
    Unavailable(String),
    #[error("ordering service rejected the request: {0}")]
    Rejected(String),
    #[error("call to the ordering service exceeded its deadline")]
    DeadlineExceeded,
}

/// Operations the reconcile pass performs against the ordering service.
///
/// All calls are async and fallible; none of them retries internally. The
/// pass decides per call site whether a failure propagates or is swallowed.
#[async_trait]
pub trait OrderingService: Send + Sync {
    /// Find the store nearest to a delivery address.
    async fn locate_nearest_store(&self, address: &Address) -> Result<StoreInfo, ServiceError>;

    /// Fetch the menu valid for one store, for the duration of one pass.
    async fn fetch_menu(&self, store_id: &str) -> Result<Menu, ServiceError>;

    /// Price-check a draft without placing it.
    async fn validate_price(&self, draft: &OrderDraft) -> Result<f64, ServiceError>;

    /// Submit the draft for real. Requires a payment to be attached.
    async fn place_order(&self, draft: &OrderDraft) -> Result<OrderConfirmation, ServiceError>;

    /// Resolve the tracking handle for the phone number an order was
    /// placed under.
    async fn resolve_tracking_handle(&self, phone: &str) -> Result<TrackingHandle, ServiceError>;

    /// Fetch the current fulfillment snapshot for a tracking handle.
    async fn fetch_tracker_snapshot(
        &self,
        handle: &TrackingHandle,
    ) -> Result<TrackerSnapshot, ServiceError>;
}
