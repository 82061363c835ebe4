//! # Framework Errors
//!
//! Transport-level errors shared by every controller and client. Resource
//! errors stay typed per resource kind and cross this boundary boxed.

/// Errors that can occur within the controller framework itself.
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    #[error("controller closed")]
    ControllerClosed,
    #[error("controller dropped response channel")]
    ChannelDropped,
    #[error("resource not found: {0}")]
    NotFound(String),
    #[error("resource error: {0}")]
    Resource(Box<dyn std::error::Error + Send + Sync>),
}
