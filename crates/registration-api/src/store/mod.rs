//! Registration records and the store that persists them.

mod backend;

pub use backend::StoreBackend;

use crate::error::ApiError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

/// A single participant registration.
///
/// Created in memory once the challenge gate passes, persisted exactly once,
/// never updated or deleted by this service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
    /// Client-supplied registration identifier
    pub reg_id: String,

    /// Participant email address
    pub email: String,

    /// Contact number
    pub contact: String,

    /// Full name
    pub name: String,

    pub college: String,
    pub department: String,
    pub year: String,

    /// Selected events, in submission order
    pub events: Vec<String>,

    /// Selected workshops, in submission order
    pub workshops: Vec<String>,

    /// Whether accommodation was requested
    pub accommodation: bool,

    /// Server-assigned participant token, set exactly once at creation
    pub token: String,

    /// Store-assigned timestamp, merged in at save time
    pub registered_at: DateTime<Utc>,
}

impl Registration {
    /// Check schema constraints. Fail-fast: the first violation aborts.
    fn validate(&self) -> Result<(), ApiError> {
        if self.reg_id.trim().is_empty() {
            return Err(ApiError::Validation("missing required field: regId".into()));
        }
        if self.email.trim().is_empty() {
            return Err(ApiError::Validation("missing required field: email".into()));
        }
        if !self.email.contains('@') {
            return Err(ApiError::Validation(format!(
                "malformed email address: {}",
                self.email
            )));
        }
        Ok(())
    }
}

/// In-memory registration collection, keyed by token.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Registry {
    records: HashMap<String, Registration>,
}

impl Registry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            records: HashMap::new(),
        }
    }

    /// Get a record by token.
    pub fn get(&self, token: &str) -> Option<&Registration> {
        self.records.get(token)
    }

    /// Insert a record under its token.
    pub fn insert(&mut self, record: Registration) {
        self.records.insert(record.token.clone(), record);
    }

    /// Remove a record by token.
    pub fn remove(&mut self, token: &str) -> Option<Registration> {
        self.records.remove(token)
    }

    /// List all records.
    pub fn list_all(&self) -> Vec<&Registration> {
        self.records.values().collect()
    }

    /// Number of stored registrations.
    pub fn count(&self) -> usize {
        self.records.len()
    }
}

/// The registration store: an in-memory registry backed by a persistence
/// backend. The store exclusively owns the persisted copy of every record.
pub struct RegistrationStore {
    registry: RwLock<Registry>,
    backend: StoreBackend,
}

impl RegistrationStore {
    /// Create a store over a previously loaded registry.
    pub fn new(registry: Registry, backend: StoreBackend) -> Self {
        Self {
            registry: RwLock::new(registry),
            backend,
        }
    }

    /// Validate and persist a registration.
    ///
    /// All-or-nothing: schema violations abort before any write, and a
    /// failed persistence rolls the in-memory insert back, so no partial
    /// record ever becomes observable. On success the stored record is
    /// returned with the store-assigned timestamp merged in.
    pub async fn save(&self, mut registration: Registration) -> Result<Registration, ApiError> {
        registration.validate()?;
        registration.registered_at = Utc::now();

        let mut registry = self.registry.write().await;
        registry.insert(registration.clone());

        if let Err(e) = self.backend.persist(&registry).await {
            registry.remove(&registration.token);
            return Err(e);
        }

        debug!(token = %registration.token, "registration persisted");
        Ok(registration)
    }

    /// Look up a stored registration by token.
    pub async fn find_by_token(&self, token: &str) -> Option<Registration> {
        self.registry.read().await.get(token).cloned()
    }

    /// List all stored registrations.
    pub async fn list(&self) -> Vec<Registration> {
        self.registry
            .read()
            .await
            .list_all()
            .into_iter()
            .cloned()
            .collect()
    }

    /// Number of stored registrations.
    pub async fn count(&self) -> usize {
        self.registry.read().await.count()
    }
}
