//! Site user accounts.

use serde::Serialize;

/// A stored user. The password is opaque to the store and never serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub password: String,
}

impl NewUser {
    pub(super) fn to_record(&self, id: String) -> User {
        User {
            id,
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}
