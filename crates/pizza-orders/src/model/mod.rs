//! Resource model: the `PizzaOrder` resource, its desired spec, and its
//! observed status.

pub mod order;

pub use order::*;
