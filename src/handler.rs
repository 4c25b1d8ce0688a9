//! HTTP request handlers for the planet residents API
//!
//! This module implements the single public endpoint:
//! - Validating the `filmsCount` threshold
//! - Walking the upstream planet catalog
//! - Joining qualifying planets with their resident names
//! - Encoding the joined result as JSON

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::info;

use crate::client::AppState;
use crate::error::AppError;
use crate::model::ResidentsParams;
use crate::pipeline::aggregate;

/// Lists the residents of every planet featured in more than `filmsCount` films
///
/// This handler:
/// 1. Reads the first `filmsCount` value of the query string
/// 2. Fetches the whole planet catalog, page by page
/// 3. Resolves the residents of each planet above the threshold
/// 4. Serializes the joined list
///
/// # Arguments
///
/// * `state` - Application state holding the shared catalog client
/// * `query` - Decoded query pairs, in request order
///
/// # Query Parameters
///
/// - `filmsCount` (required) - Strict lower bound on the number of films.
///   When the key is repeated, the first value is used.
///
/// # Example Request
///
/// `GET /residentsInPlanets?filmsCount=4`
///
/// # Response
///
/// ```json
/// [
///   { "name": "Tatooine", "residents": ["Luke Skywalker", "C-3PO"] }
/// ]
/// ```
///
/// - **200 OK** - JSON array, possibly empty
/// - **400 Bad Request** - `filmsCount` missing or not an integer; the catalog is not contacted
/// - **500 Internal Server Error** - catalog or resident lookup failed, or encoding failed
///
/// # Returns
///
/// The encoded response, or the `AppError` of the first stage that failed.
/// A failed catalog walk never reaches the resident lookups, and nothing
/// partial is ever serialized.
pub async fn residents_in_planets(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Response, AppError> {
    // An undecodable query string cannot carry a usable threshold
    let Query(pairs) = query.map_err(|_| AppError::InvalidFilmsCount)?;
    let params = ResidentsParams::from_pairs(&pairs);

    // Missing and non-integer values are rejected before any upstream call
    let threshold = params
        .films_count
        .as_deref()
        .and_then(|raw| raw.parse::<i64>().ok())
        .ok_or(AppError::InvalidFilmsCount)?;

    // Stage 1: the full catalog, or nothing
    let planets = state
        .swapi
        .fetch_all_planets()
        .await
        .map_err(AppError::Catalog)?;

    // Stage 2: filter by film count and resolve residents
    let residencies = aggregate(&state.swapi, &planets, threshold)
        .await
        .map_err(AppError::Residents)?;

    // Encode explicitly so a serialization failure gets its own message
    let body = serde_json::to_vec(&residencies).map_err(AppError::Encoding)?;
    info!(
        "filmsCount={} matched {} of {} planets",
        threshold,
        residencies.len(),
        planets.len()
    );

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response())
}
