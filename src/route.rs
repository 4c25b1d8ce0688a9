//! Route definitions for the planet residents API
//!
//! This module configures the HTTP routes and maps them to their handlers.
//! It creates the Axum router with the application state.

use axum::routing::get;
use axum::Router;

use crate::client::AppState;
use crate::handler::residents_in_planets;

/// Creates and configures the Axum application router
///
/// # Route Definitions
///
/// - `GET /residentsInPlanets?filmsCount=N` - Residents of planets seen in more than N films
///
/// # Arguments
///
/// * `state` - Application state containing the shared catalog client
///
/// # Returns
///
/// Configured Axum Router ready to handle requests
///
/// # Example Usage
///
/// ```no_run
/// # use planet_residents::client::AppState;
/// # use planet_residents::config::Config;
/// # use planet_residents::route::create_app;
/// let state = AppState::from_config(&Config::from_env()).unwrap();
/// let app = create_app(state);
/// // axum::serve(listener, app).await.unwrap();
/// ```
pub fn create_app(state: AppState) -> Router {
    Router::new()
        // Public query endpoint, the only route of the service
        .route("/residentsInPlanets", get(residents_in_planets))
        // Inject the shared catalog client into all handlers
        .with_state(state)
}
