//! Typed clients for the controllers in this crate.

pub mod order_client;

pub use order_client::PizzaOrderClient;
