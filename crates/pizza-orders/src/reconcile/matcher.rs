//! Menu matching.
//!
//! Maps an abstract pizza description (size name, topping names) onto a
//! concrete orderable product: the variant code for the resolved size in
//! the supported crust style, plus one option entry per resolved topping.
//!
//! Names match by case-insensitive substring containment. Size ties are
//! broken deterministically: an exact (case-insensitive) name match wins
//! outright, otherwise the shortest matching name wins, and remaining ties
//! go to the earliest menu entry. That way "large" picks "Large (14\")"
//! over "X-Large (16\")" regardless of menu order.

use crate::model::Pizza;
use crate::ordering::{CrustStyle, Menu, OrderProduct, SizeEntry, ToppingEntry, ToppingOption};
use tracing::debug;

/// Why a pizza could not be matched against the menu.
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    #[error("menu has no size matching {0:?}")]
    UnknownSize(String),
    #[error("menu has no {style} variant for size code {size_code:?}")]
    NoVariant { size_code: String, style: CrustStyle },
    /// Some requested toppings had no menu entry. Carries the product with
    /// the toppings that *did* resolve, so a caller may choose to use the
    /// incomplete line; the reconciler chooses not to.
    #[error("menu has no topping matching: {}", missing.join(", "))]
    UnknownToppings {
        partial: OrderProduct,
        missing: Vec<String>,
    },
}

/// Resolve one pizza descriptor to an order line.
pub fn match_pizza(menu: &Menu, pizza: &Pizza) -> Result<OrderProduct, MatchError> {
    let size = resolve_size(menu.sizes(), pizza.size.as_str())
        .ok_or_else(|| MatchError::UnknownSize(pizza.size.to_string()))?;
    debug!(input = %pizza.size, found = %size.name, "resolved size");

    // Only one crust style is orderable today.
    let style = CrustStyle::HandTossed;
    let variant = menu
        .variant_for(&size.code, style)
        .ok_or_else(|| MatchError::NoVariant {
            size_code: size.code.clone(),
            style,
        })?;

    let mut product = OrderProduct {
        code: variant.code.clone(),
        qty: 1,
        options: Default::default(),
    };

    let mut missing = Vec::new();
    for wanted in &pizza.toppings {
        match resolve_topping(menu.toppings(), wanted) {
            Some(entry) => {
                debug!(topping = %wanted, code = %entry.code, "resolved topping");
                product
                    .options
                    .insert(entry.code.clone(), ToppingOption::default());
            }
            None => missing.push(wanted.clone()),
        }
    }

    if !missing.is_empty() {
        return Err(MatchError::UnknownToppings {
            partial: product,
            missing,
        });
    }

    Ok(product)
}

/// Exact case-insensitive match first, then shortest matching name, then
/// menu order.
fn resolve_size<'a>(sizes: &'a [SizeEntry], wanted: &str) -> Option<&'a SizeEntry> {
    let wanted = wanted.to_lowercase();
    let mut best: Option<&SizeEntry> = None;
    for entry in sizes {
        let name = entry.name.to_lowercase();
        if !name.contains(&wanted) {
            continue;
        }
        if name == wanted {
            return Some(entry);
        }
        match best {
            Some(current) if entry.name.len() >= current.name.len() => {}
            _ => best = Some(entry),
        }
    }
    best
}

/// First menu entry whose name contains the request, case-insensitively.
fn resolve_topping<'a>(toppings: &'a [ToppingEntry], wanted: &str) -> Option<&'a ToppingEntry> {
    let wanted = wanted.to_lowercase();
    toppings
        .iter()
        .find(|entry| entry.name.to_lowercase().contains(&wanted))
}
