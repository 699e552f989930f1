use actix_web::{web, HttpResponse, Responder};
use crate::models::{ErrorResponse, HealthResponse};
use crate::services::{MatchError, MatchService};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub service: MatchService,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/match/{volunteer_id}", web::get().to(match_volunteer));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let store = state.service.store();
    let healthy = store.health_check().await.unwrap_or(false);

    let status = if healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        backend: store.backend_tag().to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Match a volunteer against the event catalog
///
/// GET /match/{volunteerId}
///
/// Responds with the events scoring above the threshold, highest score
/// first, each carrying `matchScore` and `matchedSkills`.
async fn match_volunteer(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let volunteer_id = path.into_inner();

    tracing::info!("Finding matches for volunteer: {}", volunteer_id);

    match state.service.handle_match_request(&volunteer_id).await {
        Ok(matches) => HttpResponse::Ok().json(matches),
        Err(MatchError::VolunteerNotFound(id)) => {
            tracing::info!("Match requested for unknown volunteer {}", id);
            HttpResponse::NotFound().json(ErrorResponse::new(
                "not_found",
                "Volunteer not found",
                404,
            ))
        }
        Err(MatchError::Store(e)) => {
            tracing::error!("Failed to match volunteer {}: {}", volunteer_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                "Failed to compute matches",
                e.to_string(),
                500,
            ))
        }
    }
}
