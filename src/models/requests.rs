//! Request validation for the contacts API
//!
//! Bodies are parsed from raw bytes so that every malformed payload is reported
//! the same way, whatever the content type or JSON shape.

use serde_json::{Map, Value};

use crate::contacts::{ContactUpdate, NewContact};
use crate::error::{ContactError, Result};

/// Fields the API understands; each must be a string when present.
pub const RECOGNIZED_FIELDS: [&str; 4] = ["username", "first_name", "last_name", "email"];

/// A type-checked contact payload.
///
/// A field that is absent stays `None`; a field present with an empty string
/// is kept as `Some("")`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactPayload {
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

impl ContactPayload {
    /// Parses and validates a raw request body.
    ///
    /// Fails when the body is empty, not JSON, not a JSON object, an empty
    /// object, or when a recognized field holds a non-string value.
    pub fn from_body(body: &[u8]) -> Result<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(ContactError::BadRequest("missing JSON body".to_string()));
        }
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| ContactError::BadRequest(format!("invalid JSON: {}", e)))?;
        Self::from_value(&value)
    }

    /// Validates an already parsed JSON value.
    pub fn from_value(value: &Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| ContactError::BadRequest("payload must be a JSON object".to_string()))?;
        if object.is_empty() {
            return Err(ContactError::BadRequest("empty payload".to_string()));
        }

        Ok(Self {
            username: string_field(object, "username")?,
            first_name: string_field(object, "first_name")?,
            last_name: string_field(object, "last_name")?,
            email: string_field(object, "email")?,
        })
    }

    /// Converts into creation input; `username`, `first_name` and `last_name` are required.
    pub fn into_new_contact(self) -> Result<NewContact> {
        match (self.username, self.first_name, self.last_name) {
            (Some(username), Some(first_name), Some(last_name)) => {
                Ok(NewContact::new(username, first_name, last_name))
            }
            _ => Err(ContactError::BadRequest(
                "username, first_name and last_name are required".to_string(),
            )),
        }
    }

    /// Converts into a partial update carrying only the present fields.
    pub fn into_update(self) -> ContactUpdate {
        ContactUpdate {
            username: self.username,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
        }
    }
}

fn string_field(object: &Map<String, Value>, name: &str) -> Result<Option<String>> {
    match object.get(name) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(ContactError::BadRequest(format!(
            "field '{}' must be a string, got {}",
            name, other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_create_payload() {
        let payload = ContactPayload::from_body(
            br#"{"username": "foobar", "first_name": "Foo", "last_name": "Barr"}"#,
        )
        .unwrap();
        let new = payload.into_new_contact().unwrap();
        assert_eq!(new, NewContact::new("foobar", "Foo", "Barr"));
    }

    #[test]
    fn test_create_requires_all_names() {
        let payload = ContactPayload::from_body(br#"{"username": "foobar"}"#).unwrap();
        assert!(matches!(
            payload.into_new_contact(),
            Err(ContactError::BadRequest(_))
        ));
    }

    #[test]
    fn test_absent_and_malformed_bodies() {
        let bodies: [&[u8]; 7] = [b"", b"   ", b"not json", b"[1, 2]", b"\"text\"", b"null", b"{}"];
        for body in bodies {
            assert!(
                matches!(ContactPayload::from_body(body), Err(ContactError::BadRequest(_))),
                "body {:?} should be rejected",
                String::from_utf8_lossy(body)
            );
        }
    }

    #[test]
    fn test_non_string_field_rejected() {
        for value in [json!(1), json!(null), json!(true), json!(["a"]), json!({"a": 1})] {
            let body = json!({ "first_name": value });
            assert!(ContactPayload::from_value(&body).is_err());
        }
    }

    #[test]
    fn test_empty_string_is_present() {
        let payload = ContactPayload::from_value(&json!({"last_name": ""})).unwrap();
        let update = payload.into_update();
        assert_eq!(update.last_name, Some(String::new()));
        assert_eq!(update.first_name, None);
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let payload =
            ContactPayload::from_value(&json!({"email": "x@example.com", "age": 42})).unwrap();
        assert_eq!(payload.email.as_deref(), Some("x@example.com"));
    }
}
