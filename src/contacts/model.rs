//! Contact Domain Types
//!
//! Rows of the `contacts` and `emails` tables plus the inputs accepted by the repository.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::error::{ContactError, Result};

/// Primary key of a contact row.
pub type ContactId = i64;

// == Contact ==
/// A person with zero or more owned email addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub id: ContactId,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    /// Set once when the row is inserted
    pub created_on: DateTime<Utc>,
    /// Refreshed by every update; never earlier than `created_on`
    pub updated_on: DateTime<Utc>,
    pub emails: Vec<Email>,
}

impl Contact {
    /// Owned addresses in insertion order.
    pub fn email_addresses(&self) -> Vec<String> {
        self.emails.iter().map(|e| e.email_addr.clone()).collect()
    }
}

// == Email ==
/// An address owned by exactly one contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub id: i64,
    pub email_addr: String,
    pub contact_id: Option<ContactId>,
}

// == Identifier ==
/// How a caller addresses a single contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactRef {
    Id(ContactId),
    Username(String),
}

impl ContactRef {
    /// Interprets a path segment: all-digit segments are ids, anything else is a username.
    pub fn parse(segment: &str) -> Self {
        if !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(id) = segment.parse() {
                return ContactRef::Id(id);
            }
        }
        ContactRef::Username(segment.to_string())
    }
}

impl fmt::Display for ContactRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContactRef::Id(id) => write!(f, "id {}", id),
            ContactRef::Username(name) => write!(f, "username '{}'", name),
        }
    }
}

// == Inputs ==
/// Fields required to create a contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

impl NewContact {
    pub fn new(
        username: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}

/// Partial overwrite of a contact. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactUpdate {
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Appended as a new owned email when present and non-empty
    pub email: Option<String>,
}

// == Timestamp Storage ==
pub(crate) fn to_millis(at: DateTime<Utc>) -> i64 {
    at.timestamp_millis()
}

pub(crate) fn from_millis(millis: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| ContactError::Internal(format!("invalid stored timestamp {}", millis)))
}
