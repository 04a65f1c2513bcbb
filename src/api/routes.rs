//! API Routes
//!
//! Configures the Axum router with all contacts endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    create_contact_handler, delete_contact_handler, get_contact_handler, health_handler,
    index_handler, list_contacts_handler, not_found_handler, update_contact_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// The collection is served at both `/contacts` and `/contacts/`.
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let collection = get(list_contacts_handler).post(create_contact_handler);

    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/contacts", collection.clone())
        .route("/contacts/", collection)
        .route(
            "/contacts/:ident",
            get(get_contact_handler)
                .put(update_contact_handler)
                .delete(delete_contact_handler),
        )
        .fallback(not_found_handler)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let db = Database::open_in_memory().unwrap();
        create_router(AppState::new(db))
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_index_endpoint() {
        let app = create_test_app();

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_collection_with_and_without_slash() {
        let app = create_test_app();

        for uri in ["/contacts", "/contacts/"] {
            let response = app
                .clone()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "GET {}", uri);
        }
    }

    #[tokio::test]
    async fn test_unknown_route_not_found() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/nowhere")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_without_content_type_is_bad_request() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/contacts/")
                    .body(Body::from("username=foobar"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
