//! # Pizza Order Controller
//!
//! A convergence controller for declarative pizza orders. A
//! [`PizzaOrder`](model::PizzaOrder) resource describes a desired purchase
//! (pizzas, delivery address, customer, whether to actually submit
//! payment); the controller drives a third-party ordering service toward
//! that description and records what it observed (assigned store,
//! validated price, placement confirmation, delivery progress) back onto
//! the resource's status.
//!
//! ## Core Components
//!
//! - **[model]**: the resource itself, its desired spec and observed
//!   status, and admission validation.
//! - **[ordering]**: the ordering-service contract (store lookup, menu,
//!   pricing, placement, tracking), the typed menu, the order draft
//!   builder, and an in-memory sandbox implementation.
//! - **[credentials]**: the payment credential store contract and an
//!   in-memory implementation.
//! - **[reconcile]**: one convergence pass, plus the menu matcher and the
//!   payment assembler it runs on.
//! - **[controller]**: wires `PizzaOrder` into the generic controller
//!   framework.
//! - **[clients]**: the typed client for submitting and watching orders.
//! - **[lifecycle]**: system wiring, configuration, and shutdown.

pub mod clients;
pub mod controller;
pub mod credentials;
pub mod lifecycle;
pub mod model;
pub mod ordering;
pub mod reconcile;
