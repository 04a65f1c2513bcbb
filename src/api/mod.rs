//! API Module
//!
//! HTTP handlers and routing for the contacts REST API.
//!
//! # Endpoints
//! - `GET /contacts/` - List every contact
//! - `POST /contacts/` - Create a contact
//! - `GET /contacts/:ident` - Fetch a contact by id or username
//! - `PUT /contacts/:username` - Update a contact, optionally appending an email
//! - `DELETE /contacts/:ident` - Delete a contact and its emails
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
