//! HTTP handler functions for the park registry API.

use actix_web::{HttpResponse, web};
use park_registry_server_models::{ApiHealth, SavePark};

use crate::AppState;
use crate::service::{self, ServiceError};

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/park/{code}` (also routed as `/api/parks/{code}`)
///
/// Returns the stored record, or the placeholder for a valid code with no
/// data yet.
pub async fn get_park(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let candidate = path.into_inner();

    match service::get_park(state.store.as_ref(), &candidate).await {
        Ok(record) => HttpResponse::Ok().json(record),
        Err(e) => error_response("fetch", &candidate, &e),
    }
}

/// `POST /api/park/{code}` (also routed as `/api/parks/{code}`)
///
/// Full-record replace of the editable fields; the body is coerced, never
/// merged with the stored record.
pub async fn save_park(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Bytes,
) -> HttpResponse {
    let candidate = path.into_inner();

    match service::save_park(state.store.as_ref(), &candidate, &body).await {
        Ok(code) => HttpResponse::Ok().json(SavePark::saved(code)),
        Err(e) => error_response("save", &candidate, &e),
    }
}

/// `GET /api/parks`
///
/// All parks written at least once, most recently updated first.
pub async fn list_parks(state: web::Data<AppState>) -> HttpResponse {
    match service::list_parks(state.store.as_ref()).await {
        Ok(records) => HttpResponse::Ok().json(records),
        Err(e) => {
            log::error!("Failed to list parks: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to fetch parks data"
            }))
        }
    }
}

/// Bare `OPTIONS` on any API resource (pre-flights with CORS headers are
/// answered by the CORS middleware before reaching here).
pub async fn preflight() -> HttpResponse {
    HttpResponse::Ok().finish()
}

/// Any unsupported method on a known API resource.
pub async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed().json(serde_json::json!({
        "error": "Method not allowed"
    }))
}

/// Maps a [`ServiceError`] to its response, logging storage detail
/// server-side instead of returning it to the caller.
fn error_response(operation: &str, candidate: &str, error: &ServiceError) -> HttpResponse {
    match error {
        ServiceError::InvalidCode(_) => {
            log::warn!("Rejected {operation} for invalid park code {candidate:?}");
            HttpResponse::BadRequest().json(serde_json::json!({
                "error": "Invalid park code"
            }))
        }
        ServiceError::MalformedBody(_) => {
            log::warn!("Rejected {operation} for park {candidate}: malformed body");
            HttpResponse::BadRequest().json(serde_json::json!({
                "error": "Invalid JSON body"
            }))
        }
        ServiceError::Storage(e) => {
            log::error!("Failed to {operation} park {candidate}: {e}");
            let message = if operation == "save" {
                "Failed to save park data"
            } else {
                "Failed to fetch park data"
            };
            HttpResponse::InternalServerError().json(serde_json::json!({ "error": message }))
        }
    }
}
