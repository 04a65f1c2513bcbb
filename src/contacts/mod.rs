//! Contacts Module
//!
//! Domain types for contacts and their emails, and the SQLite-backed repository.

mod model;
mod repository;


pub use model::{Contact, ContactId, ContactRef, ContactUpdate, Email, NewContact};
pub use repository::ContactRepository;

// == Synthetic Contact Defaults ==
/// First name given to every synthetic contact
pub const SYNTHETIC_FIRST_NAME: &str = "foo";

/// Last name given to every synthetic contact
pub const SYNTHETIC_LAST_NAME: &str = "bar";
