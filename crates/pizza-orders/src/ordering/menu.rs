//! Typed store menu.
//!
//! The menu a store serves for the duration of one reconcile pass: size
//! entries, orderable variants, topping entries, and the promotional
//! coupon. Lookups go through named accessors that return explicit
//! not-found results instead of raw map indexing.

use std::fmt::Display;

/// Crust styles the matcher can select. One style is orderable today;
/// adding another is a new variant plus its service code, nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrustStyle {
    HandTossed,
}

impl CrustStyle {
    /// The service-side style code.
    pub fn code(&self) -> &'static str {
        match self {
            CrustStyle::HandTossed => "HANDTOSS",
        }
    }
}

impl Display for CrustStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// A size offered for the pizza category.
#[derive(Debug, Clone, PartialEq)]
pub struct SizeEntry {
    pub name: String,
    pub code: String,
}

/// A topping offered for the pizza category.
#[derive(Debug, Clone, PartialEq)]
pub struct ToppingEntry {
    pub name: String,
    pub code: String,
}

/// A concrete orderable product configuration: the line-item code for one
/// size and crust style combination.
#[derive(Debug, Clone, PartialEq)]
pub struct Variant {
    pub code: String,
    pub size_code: String,
    pub style: CrustStyle,
}

/// The pizza menu of one store.
#[derive(Debug, Clone, Default)]
pub struct Menu {
    sizes: Vec<SizeEntry>,
    variants: Vec<Variant>,
    toppings: Vec<ToppingEntry>,
    coupon: Option<String>,
}

impl Menu {
    pub fn new(
        sizes: Vec<SizeEntry>,
        variants: Vec<Variant>,
        toppings: Vec<ToppingEntry>,
        coupon: Option<String>,
    ) -> Self {
        Self {
            sizes,
            variants,
            toppings,
            coupon,
        }
    }

    /// Size entries, in menu order.
    pub fn sizes(&self) -> &[SizeEntry] {
        &self.sizes
    }

    /// Orderable variants, in menu order.
    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    /// Topping entries, in menu order.
    pub fn toppings(&self) -> &[ToppingEntry] {
        &self.toppings
    }

    /// The variant for a size code and crust style, if the store offers
    /// that combination.
    pub fn variant_for(&self, size_code: &str, style: CrustStyle) -> Option<&Variant> {
        self.variants
            .iter()
            .find(|v| v.size_code == size_code && v.style == style)
    }

    /// The promotional flat-percentage coupon, when the store offers one.
    pub fn promo_coupon(&self) -> Option<&str> {
        self.coupon.as_deref()
    }
}
