//! # Credential Store Contract
//!
//! Payment credentials live outside the resource, referenced by name
//! within a namespace. The store hands back whatever fields the credential
//! carries; deciding whether those fields are sufficient is the payment
//! assembler's job, so a half-filled record is not a store error.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// A payment credential as stored. Every field is optional at this layer;
/// the assembler enforces which ones placement requires.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CredentialRecord {
    pub card_type: Option<String>,
    pub number: Option<String>,
    pub expiration: Option<String>,
    pub security_code: Option<String>,
    pub postal_code: Option<String>,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum CredentialError {
    #[error("credential {name:?} not found in namespace {namespace:?}")]
    NotFound { name: String, namespace: String },
    #[error("credential store unavailable: {0}")]
    Unavailable(String),
}

/// Read access to payment credentials.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn get_credential(
        &self,
        name: &str,
        namespace: &str,
    ) -> Result<CredentialRecord, CredentialError>;
}

/// In-memory credential store for the demo binary and tests, keyed by
/// (namespace, name).
#[derive(Default)]
pub struct InMemoryCredentialStore {
    records: Mutex<HashMap<(String, String), CredentialRecord>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, namespace: &str, name: &str, record: CredentialRecord) {
        self.records
            .lock()
            .unwrap()
            .insert((namespace.to_string(), name.to_string()), record);
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn get_credential(
        &self,
        name: &str,
        namespace: &str,
    ) -> Result<CredentialRecord, CredentialError> {
        self.records
            .lock()
            .unwrap()
            .get(&(namespace.to_string(), name.to_string()))
            .cloned()
            .ok_or_else(|| CredentialError::NotFound {
                name: name.to_string(),
                namespace: namespace.to_string(),
            })
    }
}
