//! Request and Response models for the contacts API
//!
//! This module defines the payload validator and the DTOs used for
//! serializing HTTP response bodies.

pub mod requests;
pub mod responses;

#[cfg(test)]
mod property_tests;

// Re-export commonly used types
pub use requests::{ContactPayload, RECOGNIZED_FIELDS};
pub use responses::{
    ContactListResponse, ContactResponse, ContactView, ErrorResponse, HealthResponse,
    StatusResponse,
};
