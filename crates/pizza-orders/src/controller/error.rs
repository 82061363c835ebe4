//! Error types for the pizza order controller.

use crate::reconcile::ReconcileError;
use thiserror::Error;

/// Errors surfaced by pizza order operations.
#[derive(Debug, Error)]
pub enum OrderError {
    /// The submitted spec violates the resource schema.
    #[error("invalid pizza order: {0}")]
    Validation(String),

    /// A reconcile pass failed with a propagated error.
    #[error(transparent)]
    Reconcile(#[from] ReconcileError),

    /// An error occurred while communicating with the controller.
    #[error("controller communication error: {0}")]
    ControllerUnavailable(String),
}

impl From<String> for OrderError {
    fn from(msg: String) -> Self {
        OrderError::ControllerUnavailable(msg)
    }
}
