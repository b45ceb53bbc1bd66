//! Customer entity.

use crate::CustomerId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named customer. Created on the first transaction under an unknown name
/// and never updated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Unique identifier for the customer.
    pub id: CustomerId,

    /// Display name, also the natural lookup key.
    pub name: String,

    /// Creation timestamp, assigned by the store on insert.
    pub created_at: DateTime<Utc>,
}

impl Customer {
    /// Creates a new customer with a fresh id.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CustomerId::new(),
            name: name.into(),
            created_at: Utc::now(),
        }
    }
}
