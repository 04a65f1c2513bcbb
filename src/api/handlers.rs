//! API Handlers
//!
//! HTTP request handlers for each contacts endpoint.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    Json,
};
use tracing::debug;

use crate::contacts::{ContactRef, ContactRepository};
use crate::db::Database;
use crate::error::{ContactError, Result};
use crate::models::{
    ContactListResponse, ContactPayload, ContactResponse, HealthResponse, StatusResponse,
};

/// Application state shared across all handlers.
///
/// Holds the process-wide database handle; each handler runs one repository
/// call on it through [`Database::call`].
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}

impl AppState {
    /// Creates a new AppState around an opened database.
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

/// Handler for GET /
pub async fn index_handler() -> Html<&'static str> {
    Html("<h1>Welcome to a simple contacts api</h1>")
}

/// Handler for GET /contacts/
///
/// Returns every contact with its email addresses.
pub async fn list_contacts_handler(
    State(state): State<AppState>,
) -> Result<Json<ContactListResponse>> {
    let contacts = state
        .db
        .call(|conn| ContactRepository::new(conn).list_all())
        .await?;

    Ok(Json(ContactListResponse::new(&contacts)))
}

/// Handler for GET /contacts/:ident
///
/// An all-digit segment is looked up as an id, anything else as a username.
pub async fn get_contact_handler(
    State(state): State<AppState>,
    Path(ident): Path<String>,
) -> Result<Json<ContactResponse>> {
    let reference = ContactRef::parse(&ident);

    let contact = state
        .db
        .call(move |conn| {
            ContactRepository::new(conn)
                .find(&reference)?
                .ok_or_else(|| ContactError::NotFound(reference.to_string()))
        })
        .await?;

    Ok(Json(ContactResponse::new(&contact)))
}

/// Handler for POST /contacts/
///
/// Creates a contact from `{username, first_name, last_name}`.
pub async fn create_contact_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<StatusResponse>)> {
    let new = ContactPayload::from_body(&body)?.into_new_contact()?;

    state
        .db
        .call(move |conn| ContactRepository::new(conn).create(&new))
        .await?;

    Ok((StatusCode::CREATED, Json(StatusResponse::created())))
}

/// Handler for PUT /contacts/:username
///
/// Overwrites the fields present in the body and appends `email` when given.
pub async fn update_contact_handler(
    State(state): State<AppState>,
    Path(username): Path<String>,
    body: Bytes,
) -> Result<Json<StatusResponse>> {
    let update = ContactPayload::from_body(&body)?.into_update();
    debug!("Updating contact '{}' with {:?}", username, update);

    state
        .db
        .call(move |conn| {
            ContactRepository::new(conn).update(&ContactRef::Username(username), &update)
        })
        .await?;

    Ok(Json(StatusResponse::updated()))
}

/// Handler for DELETE /contacts/:ident
///
/// Removes the contact and all of its emails.
pub async fn delete_contact_handler(
    State(state): State<AppState>,
    Path(ident): Path<String>,
) -> Result<Json<StatusResponse>> {
    let reference = ContactRef::parse(&ident);

    state
        .db
        .call(move |conn| ContactRepository::new(conn).delete(&reference))
        .await?;

    Ok(Json(StatusResponse::deleted()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Fallback for unknown routes.
pub async fn not_found_handler() -> ContactError {
    ContactError::NotFound("no such route".to_string())
}
