//! Response DTOs for the contacts API
//!
//! Defines the structure of outgoing HTTP response bodies.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::contacts::Contact;

/// Wire representation of a contact.
///
/// The name fields are serialized as `"first name"` and `"last name"` (with a
/// space), which existing clients depend on.
#[derive(Debug, Clone, Serialize)]
pub struct ContactView {
    pub id: i64,
    pub username: String,
    #[serde(rename = "first name")]
    pub first_name: String,
    #[serde(rename = "last name")]
    pub last_name: String,
    pub created_on: DateTime<Utc>,
    pub updated_on: DateTime<Utc>,
    pub emails_addresses: Vec<String>,
}

impl From<&Contact> for ContactView {
    fn from(contact: &Contact) -> Self {
        Self {
            id: contact.id,
            username: contact.username.clone(),
            first_name: contact.first_name.clone(),
            last_name: contact.last_name.clone(),
            created_on: contact.created_on,
            updated_on: contact.updated_on,
            emails_addresses: contact.email_addresses(),
        }
    }
}

/// Response body for GET /contacts/
#[derive(Debug, Clone, Serialize)]
pub struct ContactListResponse {
    pub contacts: Vec<ContactView>,
}

impl ContactListResponse {
    pub fn new(contacts: &[Contact]) -> Self {
        Self {
            contacts: contacts.iter().map(ContactView::from).collect(),
        }
    }
}

/// Response body for GET /contacts/:ident
#[derive(Debug, Clone, Serialize)]
pub struct ContactResponse {
    pub contact: ContactView,
}

impl ContactResponse {
    pub fn new(contact: &Contact) -> Self {
        Self {
            contact: ContactView::from(contact),
        }
    }
}

/// Response body for mutations: `{"contact": "created" | "updated" | "deleted"}`
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub contact: &'static str,
}

impl StatusResponse {
    pub fn created() -> Self {
        Self { contact: "created" }
    }

    pub fn updated() -> Self {
        Self { contact: "updated" }
    }

    pub fn deleted() -> Self {
        Self { contact: "deleted" }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contacts::Email;
    use serde_json::{json, Value};

    fn sample_contact() -> Contact {
        let at = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        Contact {
            id: 1,
            username: "foobar".to_string(),
            first_name: "Foo".to_string(),
            last_name: "Barr".to_string(),
            created_on: at,
            updated_on: at,
            emails: vec![Email {
                id: 7,
                email_addr: "x@example.com".to_string(),
                contact_id: Some(1),
            }],
        }
    }

    #[test]
    fn test_contact_view_uses_spaced_keys() {
        let value: Value = serde_json::to_value(ContactResponse::new(&sample_contact())).unwrap();
        let contact = &value["contact"];
        assert_eq!(contact["id"], 1);
        assert_eq!(contact["username"], "foobar");
        assert_eq!(contact["first name"], "Foo");
        assert_eq!(contact["last name"], "Barr");
        assert_eq!(contact["emails_addresses"], json!(["x@example.com"]));
        assert_eq!(contact["created_on"], "2023-11-14T22:13:20Z");
        assert!(contact.get("first_name").is_none());
    }

    #[test]
    fn test_list_response_shape() {
        let value = serde_json::to_value(ContactListResponse::new(&[sample_contact()])).unwrap();
        assert_eq!(value["contacts"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_status_responses() {
        assert_eq!(
            serde_json::to_value(StatusResponse::created()).unwrap(),
            json!({"contact": "created"})
        );
        assert_eq!(
            serde_json::to_value(StatusResponse::deleted()).unwrap(),
            json!({"contact": "deleted"})
        );
    }

    #[test]
    fn test_error_response_serialize() {
        let json = serde_json::to_string(&ErrorResponse::new("Not found")).unwrap();
        assert_eq!(json, r#"{"error":"Not found"}"#);
    }
}
