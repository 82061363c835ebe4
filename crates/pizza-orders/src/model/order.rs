//! The `PizzaOrder` resource.
//!
//! A resource pairs the desired state a user submitted (the [`OrderSpec`]:
//! which pizzas, where to, for whom, and whether to actually place the
//! order) with the state the controller last observed in the world (the
//! [`OrderStatus`]: assigned store, validated price, placement
//! confirmation, delivery progress). The reconcile pass reads the former
//! and writes the latter; nothing else touches status.
//!
//! Field names on the wire follow the persisted schema (camelCase,
//! `orderID`), so a serialized resource round-trips against stored
//! documents.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for pizza orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PizzaOrderId(pub u32);

impl From<u32> for PizzaOrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for PizzaOrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "pizzaorder_{}", self.0)
    }
}

/// Orderable pizza sizes. The schema admits exactly these three; menu
/// matching works on the lowercase name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PizzaSize {
    Small,
    Medium,
    Large,
}

impl PizzaSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            PizzaSize::Small => "small",
            PizzaSize::Medium => "medium",
            PizzaSize::Large => "large",
        }
    }
}

impl Display for PizzaSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One requested pizza: a size plus free-text topping names, matched
/// against the store menu at reconcile time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pizza {
    pub size: PizzaSize,
    #[serde(default)]
    pub toppings: Vec<String>,
}

/// Delivery address. `region` is a 2-character state/province code;
/// `phone` may contain hyphens, which the reconciler strips before use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub city: String,
    pub region: String,
    pub postal_code: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Desired state of a pizza order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSpec {
    /// When true, the controller submits payment and places the order once
    /// pricing succeeds. When false, passes stop after price validation.
    #[serde(default)]
    pub place_order: bool,
    pub address: Option<Address>,
    pub customer: Customer,
    /// Name of the payment credential to read from the credential store.
    #[serde(default)]
    pub payment_secret: String,
    pub pizzas: Vec<Pizza>,
}

impl OrderSpec {
    /// Admission validation, mirroring the persisted schema's constraints.
    pub fn validate(&self) -> Result<(), String> {
        if self.pizzas.is_empty() {
            return Err("at least one pizza is required".to_string());
        }
        if let Some(address) = &self.address {
            if address.region.chars().count() > 2 {
                return Err(format!(
                    "region {:?} is longer than 2 characters",
                    address.region
                ));
            }
            if !valid_phone(&address.phone) {
                return Err(format!(
                    "phone {:?} is not a 10-digit number starting 2-9",
                    address.phone
                ));
            }
        }
        Ok(())
    }
}

/// The schema pattern applies to the digits-only form: hyphens are
/// separators, not digits.
fn valid_phone(phone: &str) -> bool {
    let digits: String = phone.chars().filter(|c| *c != '-').collect();
    digits.len() == 10
        && digits.bytes().all(|b| b.is_ascii_digit())
        && matches!(digits.as_bytes()[0], b'2'..=b'9')
}

/// A partial update to desired state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSpecPatch {
    pub place_order: Option<bool>,
    pub payment_secret: Option<String>,
}

/// The store the controller assigned to this order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreObservation {
    pub id: String,
    pub address: String,
}

/// Fulfillment progress, one timestamp per stage. A `None` stage has not
/// been reached yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerTimes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prep: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bake: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality_check: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_for_delivery: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivered: Option<String>,
}

/// Why the last pass stopped short. Only swallowed failures leave a
/// condition; propagated errors surface to the invoker instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionReason {
    TrackingUnavailable,
    PriceRejected,
    PaymentUnavailable,
    PaymentInvalid,
    PlacementFailed,
}

impl Display for ConditionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ConditionReason::TrackingUnavailable => "TrackingUnavailable",
            ConditionReason::PriceRejected => "PriceRejected",
            ConditionReason::PaymentUnavailable => "PaymentUnavailable",
            ConditionReason::PaymentInvalid => "PaymentInvalid",
            ConditionReason::PlacementFailed => "PlacementFailed",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub reason: ConditionReason,
    pub message: String,
}

/// Observed state of a pizza order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatus {
    #[serde(rename = "orderID", skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default)]
    pub placed: bool,
    #[serde(default)]
    pub delivered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store: Option<StoreObservation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracker: Option<TrackerTimes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
}

impl OrderStatus {
    pub fn set_condition(&mut self, reason: ConditionReason, message: impl Into<String>) {
        self.condition = Some(Condition {
            reason,
            message: message.into(),
        });
    }

    pub fn clear_condition(&mut self) {
        self.condition = None;
    }
}

/// The pizza order resource: identity, desired spec, observed status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PizzaOrder {
    pub id: PizzaOrderId,
    pub spec: OrderSpec,
    pub status: OrderStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> OrderSpec {
        OrderSpec {
            place_order: false,
            address: Some(Address {
                street: "742 Evergreen Terrace".to_string(),
                city: "Springfield".to_string(),
                region: "IL".to_string(),
                postal_code: "62704".to_string(),
                phone: "2015550123".to_string(),
            }),
            customer: Customer {
                first_name: "Alice".to_string(),
                last_name: "Smith".to_string(),
                email: "alice@example.com".to_string(),
            },
            payment_secret: "card-on-file".to_string(),
            pizzas: vec![Pizza {
                size: PizzaSize::Large,
                toppings: vec!["pepperoni".to_string()],
            }],
        }
    }

    #[test]
    fn test_valid_spec_is_admitted() {
        assert!(spec().validate().is_ok());
    }

    #[test]
    fn test_empty_pizza_list_is_rejected() {
        let mut s = spec();
        s.pizzas.clear();
        assert!(s.validate().unwrap_err().contains("at least one pizza"));
    }

    #[test]
    fn test_long_region_is_rejected() {
        let mut s = spec();
        s.address.as_mut().unwrap().region = "ILL".to_string();
        assert!(s.validate().unwrap_err().contains("region"));
    }

    #[test]
    fn test_phone_pattern() {
        let mut s = spec();

        // Hyphens are separators, not digits.
        s.address.as_mut().unwrap().phone = "201-555-0123".to_string();
        assert!(s.validate().is_ok());

        // First digit must be 2-9.
        s.address.as_mut().unwrap().phone = "1015550123".to_string();
        assert!(s.validate().is_err());

        // Too short.
        s.address.as_mut().unwrap().phone = "555".to_string();
        assert!(s.validate().is_err());

        // Letters.
        s.address.as_mut().unwrap().phone = "20155501ab".to_string();
        assert!(s.validate().is_err());
    }

    #[test]
    fn test_missing_address_is_admitted() {
        // Address absence is a per-pass error, not an admission error.
        let mut s = spec();
        s.address = None;
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_status_serializes_with_persisted_field_names() {
        let status = OrderStatus {
            order_id: Some("W123456".to_string()),
            price: Some("21.40".to_string()),
            placed: true,
            delivered: false,
            store: Some(StoreObservation {
                id: "3317".to_string(),
                address: "742 Evergreen Terrace Springfield".to_string(),
            }),
            tracker: Some(TrackerTimes {
                prep: Some("2024-05-04T12:01:00Z".to_string()),
                quality_check: Some("2024-05-04T12:03:00Z".to_string()),
                ..TrackerTimes::default()
            }),
            condition: None,
        };

        let value = serde_json::to_value(&status).unwrap();
        assert_eq!(value["orderID"], "W123456");
        assert_eq!(value["price"], "21.40");
        assert_eq!(value["placed"], true);
        assert_eq!(value["store"]["id"], "3317");
        assert_eq!(value["tracker"]["qualityCheck"], "2024-05-04T12:03:00Z");
        // Unreached stages are omitted entirely.
        assert!(value["tracker"].get("outForDelivery").is_none());
    }

    #[test]
    fn test_spec_serializes_with_persisted_field_names() {
        let value = serde_json::to_value(spec()).unwrap();
        assert_eq!(value["placeOrder"], false);
        assert_eq!(value["paymentSecret"], "card-on-file");
        assert_eq!(value["address"]["postalCode"], "62704");
        assert_eq!(value["customer"]["firstName"], "Alice");
        assert_eq!(value["pizzas"][0]["size"], "large");
    }
}
