/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server:
 * state creation, database loading, and route configuration.
 *
 * # Initialization Process
 *
 * 1. Create the push channel registry
 * 2. Load optional services (database, image uploader)
 * 3. Build the conversation service over them
 * 4. Create and configure the router
 */

use axum::Router;

use crate::messaging::service::ConversationService;
use crate::realtime::PushRegistry;
use crate::routes::router::create_router;
use crate::server::config::load_database;
use crate::server::state::AppState;
use crate::upload::ImageUploader;

/// Create and configure the Axum application
///
/// # Error Handling
///
/// The function is designed to be resilient:
/// - Missing database: the server starts, store operations fail per request
/// - Missing upload service: the server starts, image sends fail per request
pub async fn create_app() -> Router<()> {
    tracing::info!("Initializing wirechat server");

    // Step 1: Create the push channel registry
    let push_registry = PushRegistry::new();

    // Step 2: Load optional services
    let db_pool = load_database().await;
    let uploader = ImageUploader::from_env();

    // Step 3: Build the conversation service
    let conversations =
        ConversationService::new(db_pool.clone(), push_registry.clone(), uploader);

    // Step 4: Create app state and router
    let app_state = AppState {
        conversations,
        push_registry,
        db_pool,
    };

    let app = create_router(app_state);
    tracing::info!("Router configured");

    app
}
