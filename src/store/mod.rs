//! # Store — Lead Record Storage
//!
//! Keyed collections for the four entity kinds the site persists: users,
//! contact-form submissions, consultation requests and saved cost estimates.
//!
//! ## Operations
//!
//! | Entity | Create | Read | Update |
//! |--------|--------|------|--------|
//! | User | `create_user` (unique, non-blank username) | `get_user`, `get_user_by_username` | — |
//! | Contact | `create_contact` | `list_contacts` | — |
//! | Consultation | `create_consultation` (status `pending`) | `list_consultations` | `update_consultation_status` |
//! | CostEstimate | `create_cost_estimate` | `list_cost_estimates` | — |
//!
//! Lists are newest first. Lookups that find nothing return `Ok(None)`;
//! absence is not an error.
//!
//! ## Backends
//!
//! [`RecordStore`] is the seam request handlers depend on. [`MemoryStore`] keeps
//! everything for the lifetime of the process, one mutex per collection. A
//! durable backend must report its I/O failures as [`StoreError::Unavailable`]
//! or [`StoreError::Internal`], which the HTTP layer turns into a 500.

mod collection;
mod consultations;
mod contacts;
mod cost_estimates;
mod users;

pub use consultations::{Consultation, NewConsultation, DEFAULT_STATUS};
pub use contacts::{Contact, NewContact, PreferredContact};
pub use cost_estimates::{CostEstimate, NewCostEstimate};
pub use users::{NewUser, User};

use collection::Collection;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("username must not be empty")]
    EmptyUsername,
    #[error("username already taken: {0}")]
    DuplicateUsername(String),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage failure: {0}")]
    Internal(String),
}

/// Storage operations used by the request handlers.
///
/// Create operations take their input by reference and never modify it; the
/// returned record carries the generated id and creation stamp.
pub trait RecordStore: Send + Sync {
    fn get_user(&self, id: &str) -> Result<Option<User>, StoreError>;
    fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;
    /// Usernames must be unique and not blank.
    fn create_user(&self, input: &NewUser) -> Result<User, StoreError>;

    fn create_contact(&self, input: &NewContact) -> Result<Contact, StoreError>;
    fn list_contacts(&self) -> Result<Vec<Contact>, StoreError>;

    fn create_consultation(&self, input: &NewConsultation) -> Result<Consultation, StoreError>;
    fn list_consultations(&self) -> Result<Vec<Consultation>, StoreError>;
    /// Replace the status of an existing consultation. `Ok(None)` if `id` is unknown.
    fn update_consultation_status(
        &self,
        id: &str,
        status: &str,
    ) -> Result<Option<Consultation>, StoreError>;

    fn create_cost_estimate(&self, input: &NewCostEstimate) -> Result<CostEstimate, StoreError>;
    fn list_cost_estimates(&self) -> Result<Vec<CostEstimate>, StoreError>;

    /// Cheap liveness check for the readiness probe.
    fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Process-lifetime in-memory store.
pub struct MemoryStore {
    users: Collection<User>,
    contacts: Collection<Contact>,
    consultations: Collection<Consultation>,
    cost_estimates: Collection<CostEstimate>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            users: Collection::new(),
            contacts: Collection::new(),
            consultations: Collection::new(),
            cost_estimates: Collection::new(),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore for MemoryStore {
    fn get_user(&self, id: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.get(id))
    }

    fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.find(|user| user.username == username))
    }

    fn create_user(&self, input: &NewUser) -> Result<User, StoreError> {
        if input.username.trim().is_empty() {
            return Err(StoreError::EmptyUsername);
        }
        self.users
            .insert_with(
                |user| user.username == input.username,
                |id, _| input.to_record(id),
            )
            .ok_or_else(|| StoreError::DuplicateUsername(input.username.clone()))
    }

    fn create_contact(&self, input: &NewContact) -> Result<Contact, StoreError> {
        Ok(self
            .contacts
            .insert(|id, created_at| input.to_record(id, created_at)))
    }

    fn list_contacts(&self) -> Result<Vec<Contact>, StoreError> {
        Ok(self.contacts.list())
    }

    fn create_consultation(&self, input: &NewConsultation) -> Result<Consultation, StoreError> {
        Ok(self
            .consultations
            .insert(|id, created_at| input.to_record(id, created_at)))
    }

    fn list_consultations(&self) -> Result<Vec<Consultation>, StoreError> {
        Ok(self.consultations.list())
    }

    fn update_consultation_status(
        &self,
        id: &str,
        status: &str,
    ) -> Result<Option<Consultation>, StoreError> {
        Ok(self
            .consultations
            .update(id, |consultation| consultation.status = status.to_string()))
    }

    fn create_cost_estimate(&self, input: &NewCostEstimate) -> Result<CostEstimate, StoreError> {
        Ok(self
            .cost_estimates
            .insert(|id, created_at| input.to_record(id, created_at)))
    }

    fn list_cost_estimates(&self) -> Result<Vec<CostEstimate>, StoreError> {
        Ok(self.cost_estimates.list())
    }
}
