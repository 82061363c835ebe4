//! Order draft assembly.
//!
//! An [`OrderDraft`] is the payload a pass submits for price validation
//! and, when placement was requested, for the real order. It is built
//! fluently from resource fields and matched products, and only ever
//! carries data the ordering service needs.

use crate::model::Address;
use std::collections::BTreeMap;
use std::fmt;

/// Portion and amount for one topping on one product. The default covers
/// the whole pizza at normal intensity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToppingOption {
    pub portion: String,
    pub amount: String,
}

impl Default for ToppingOption {
    fn default() -> Self {
        Self {
            portion: "1/1".to_string(),
            amount: "1".to_string(),
        }
    }
}

/// One order line: a variant code plus its topping options, keyed by
/// topping code.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrderProduct {
    pub code: String,
    pub qty: u32,
    pub options: BTreeMap<String, ToppingOption>,
}

/// Payment instrument kinds the service accepts. Credit card is the only
/// supported kind today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentKind {
    CreditCard,
}

impl fmt::Display for PaymentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentKind::CreditCard => f.write_str("CreditCard"),
        }
    }
}

/// A complete payment instruction.
#[derive(Clone, PartialEq)]
pub struct Payment {
    pub kind: PaymentKind,
    pub card_type: String,
    pub number: String,
    pub expiration: String,
    pub security_code: String,
    pub postal_code: String,
    pub amount: f64,
}

// Drafts get logged at debug level; keep card data out of the logs.
impl fmt::Debug for Payment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Payment")
            .field("kind", &self.kind)
            .field("card_type", &self.card_type)
            .field("number", &"<redacted>")
            .field("expiration", &"<redacted>")
            .field("security_code", &"<redacted>")
            .field("postal_code", &self.postal_code)
            .field("amount", &self.amount)
            .finish()
    }
}

/// The order payload under assembly.
#[derive(Debug, Clone, Default)]
pub struct OrderDraft {
    pub address: Option<Address>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub store_id: String,
    pub products: Vec<OrderProduct>,
    pub coupons: Vec<String>,
    pub payment: Option<Payment>,
}

impl OrderDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    pub fn with_customer(mut self, first_name: &str, last_name: &str, email: &str) -> Self {
        self.first_name = first_name.to_string();
        self.last_name = last_name.to_string();
        self.email = email.to_string();
        self
    }

    /// Phone number on the order; callers pass the digits-only form.
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    pub fn with_store(mut self, store_id: impl Into<String>) -> Self {
        self.store_id = store_id.into();
        self
    }

    pub fn add_product(&mut self, product: OrderProduct) {
        self.products.push(product);
    }

    pub fn add_coupon(&mut self, code: impl Into<String>) {
        self.coupons.push(code.into());
    }

    pub fn set_payment(&mut self, payment: Payment) {
        self.payment = Some(payment);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Address;

    fn address() -> Address {
        Address {
            street: "742 Evergreen Terrace".to_string(),
            city: "Springfield".to_string(),
            region: "IL".to_string(),
            postal_code: "62704".to_string(),
            phone: "201-555-0123".to_string(),
        }
    }

    #[test]
    fn test_builder_assembles_all_fields() {
        let mut draft = OrderDraft::new()
            .with_address(address())
            .with_customer("Alice", "Smith", "alice@example.com")
            .with_phone("2015550123")
            .with_store("3317");
        draft.add_product(OrderProduct {
            code: "14SCREEN".to_string(),
            qty: 1,
            options: BTreeMap::new(),
        });
        draft.add_coupon("9193");

        assert_eq!(draft.first_name, "Alice");
        assert_eq!(draft.phone, "2015550123");
        assert_eq!(draft.store_id, "3317");
        assert_eq!(draft.products.len(), 1);
        assert_eq!(draft.coupons, vec!["9193".to_string()]);
        assert!(draft.payment.is_none());
    }

    #[test]
    fn test_default_topping_option_is_whole_pizza_normal_amount() {
        let option = ToppingOption::default();
        assert_eq!(option.portion, "1/1");
        assert_eq!(option.amount, "1");
    }

    #[test]
    fn test_payment_debug_redacts_card_data() {
        let payment = Payment {
            kind: PaymentKind::CreditCard,
            card_type: "VISA".to_string(),
            number: "4100123422343234".to_string(),
            expiration: "0525".to_string(),
            security_code: "123".to_string(),
            postal_code: "62704".to_string(),
            amount: 21.40,
        };
        let rendered = format!("{payment:?}");
        assert!(!rendered.contains("4100123422343234"));
        assert!(!rendered.contains("0525"));
        assert!(rendered.contains("<redacted>"));
        assert!(rendered.contains("VISA"));
    }
}
