//! In-memory sandbox ordering service.
//!
//! A deterministic stand-in for the real service, used by the demo binary
//! and end-to-end tests: one always-open store, a small fixed menu with a
//! half-price coupon, straightforward pricing, and a tracker that advances
//! one fulfillment stage per poll. No network, no clocks, no randomness.

use super::{
    CrustStyle, Menu, OrderConfirmation, OrderDraft, OrderingService, ServiceError, SizeEntry,
    StoreInfo, ToppingEntry, TrackerSnapshot, TrackingHandle, Variant,
};
use crate::model::Address;
use async_trait::async_trait;
use std::sync::Mutex;

const STORE_ID: &str = "8252";
const STORE_ADDRESS: &str = "1100 S Main St\nSpringfield IL 62704";
const COUPON_HALF_PRICE: &str = "9193";
const TOPPING_PRICE: f64 = 1.50;

#[derive(Default)]
struct SandboxState {
    order_seq: u32,
    placements: u32,
    track_polls: u32,
}

/// Deterministic in-memory [`OrderingService`].
#[derive(Default)]
pub struct SandboxOrderingService {
    state: Mutex<SandboxState>,
}

impl SandboxOrderingService {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many orders have actually been placed. Lets tests assert
    /// placement happened exactly once.
    pub fn placements(&self) -> u32 {
        self.state.lock().unwrap().placements
    }

    fn menu() -> Menu {
        Menu::new(
            vec![
                SizeEntry {
                    name: "Small (10\")".to_string(),
                    code: "10".to_string(),
                },
                SizeEntry {
                    name: "Medium (12\")".to_string(),
                    code: "12".to_string(),
                },
                SizeEntry {
                    name: "Large (14\")".to_string(),
                    code: "14".to_string(),
                },
            ],
            vec![
                Variant {
                    code: "10SCREEN".to_string(),
                    size_code: "10".to_string(),
                    style: CrustStyle::HandTossed,
                },
                Variant {
                    code: "12SCREEN".to_string(),
                    size_code: "12".to_string(),
                    style: CrustStyle::HandTossed,
                },
                Variant {
                    code: "14SCREEN".to_string(),
                    size_code: "14".to_string(),
                    style: CrustStyle::HandTossed,
                },
            ],
            vec![
                ToppingEntry {
                    name: "Pepperoni".to_string(),
                    code: "P".to_string(),
                },
                ToppingEntry {
                    name: "Italian Sausage".to_string(),
                    code: "S".to_string(),
                },
                ToppingEntry {
                    name: "Mushrooms".to_string(),
                    code: "M".to_string(),
                },
                ToppingEntry {
                    name: "Onions".to_string(),
                    code: "O".to_string(),
                },
                ToppingEntry {
                    name: "Shredded Provolone Cheese".to_string(),
                    code: "Cp".to_string(),
                },
            ],
            Some(COUPON_HALF_PRICE.to_string()),
        )
    }

    fn base_price(code: &str) -> f64 {
        match code {
            "10SCREEN" => 9.99,
            "12SCREEN" => 11.99,
            "14SCREEN" => 13.99,
            _ => 15.99,
        }
    }

    fn price(draft: &OrderDraft) -> f64 {
        let subtotal: f64 = draft
            .products
            .iter()
            .map(|p| {
                (Self::base_price(&p.code) + p.options.len() as f64 * TOPPING_PRICE)
                    * f64::from(p.qty.max(1))
            })
            .sum();
        if draft.coupons.iter().any(|c| c == COUPON_HALF_PRICE) {
            subtotal * 0.5
        } else {
            subtotal
        }
    }

    /// Stage timestamps are fixed; what advances is how many of them the
    /// tracker has reached.
    fn snapshot(polls: u32) -> TrackerSnapshot {
        let stage = |n: u32| -> Option<String> {
            (polls >= n).then(|| format!("2024-05-04T12:0{n}:00Z"))
        };
        TrackerSnapshot {
            start_time: stage(1),
            oven_time: stage(2),
            rack_time: stage(3),
            route_time: stage(4),
            delivery_time: stage(5),
        }
    }
}

#[async_trait]
impl OrderingService for SandboxOrderingService {
    async fn locate_nearest_store(&self, _address: &Address) -> Result<StoreInfo, ServiceError> {
        Ok(StoreInfo {
            id: STORE_ID.to_string(),
            address: STORE_ADDRESS.to_string(),
            open: true,
        })
    }

    async fn fetch_menu(&self, store_id: &str) -> Result<Menu, ServiceError> {
        if store_id != STORE_ID {
            return Err(ServiceError::Rejected(format!(
                "unknown store {store_id:?}"
            )));
        }
        Ok(Self::menu())
    }

    async fn validate_price(&self, draft: &OrderDraft) -> Result<f64, ServiceError> {
        if draft.products.is_empty() {
            return Err(ServiceError::Rejected("order has no products".to_string()));
        }
        Ok(Self::price(draft))
    }

    async fn place_order(&self, draft: &OrderDraft) -> Result<OrderConfirmation, ServiceError> {
        if draft.payment.is_none() {
            return Err(ServiceError::Rejected(
                "order has no payment attached".to_string(),
            ));
        }
        let mut state = self.state.lock().unwrap();
        state.order_seq += 1;
        state.placements += 1;
        Ok(OrderConfirmation {
            order_id: format!("SANDBOX-{:06}", state.order_seq),
        })
    }

    async fn resolve_tracking_handle(&self, phone: &str) -> Result<TrackingHandle, ServiceError> {
        Ok(TrackingHandle(format!("sandbox://tracking/{phone}")))
    }

    async fn fetch_tracker_snapshot(
        &self,
        _handle: &TrackingHandle,
    ) -> Result<TrackerSnapshot, ServiceError> {
        let mut state = self.state.lock().unwrap();
        state.track_polls += 1;
        Ok(Self::snapshot(state.track_polls))
    }
}
