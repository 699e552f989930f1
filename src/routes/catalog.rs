use actix_web::{web, HttpResponse, Responder};
use crate::models::{
    ErrorResponse, Event, EventRecord, NotificationListResponse, Volunteer, VolunteerRecord,
};
use crate::routes::AppState;

/// Configure volunteer, event and notification routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/volunteers", web::post().to(create_volunteer))
        .route("/volunteers/{volunteer_id}", web::get().to(get_volunteer))
        .route("/events", web::post().to(create_event))
        .route("/events", web::get().to(list_events))
        .route("/notifications/{volunteer_id}", web::get().to(list_notifications));
}

fn store_failure(action: &str, e: impl std::fmt::Display) -> HttpResponse {
    tracing::error!("Failed to {}: {}", action, e);
    HttpResponse::InternalServerError().json(ErrorResponse::new(
        &format!("Failed to {}", action),
        e.to_string(),
        500,
    ))
}

/// Create or replace a volunteer
///
/// POST /volunteers
///
/// Request body:
/// ```json
/// {
///   "id": "1",
///   "name": "string",
///   "location": "Houston",
///   "skills": ["first aid"],
///   "preferences": ["outdoors"],
///   "availability": {"start": "2025-07-15T00:00:00Z", "end": "2025-07-20T23:59:59Z"}
/// }
/// ```
async fn create_volunteer(
    state: web::Data<AppState>,
    req: web::Json<VolunteerRecord>,
) -> impl Responder {
    let volunteer = match Volunteer::try_from(req.into_inner()) {
        Ok(volunteer) => volunteer,
        Err(e) => {
            tracing::info!("Rejected volunteer record: {}", e);
            return HttpResponse::BadRequest().json(ErrorResponse::new(
                "malformed_input",
                e.to_string(),
                400,
            ));
        }
    };

    match state.service.store().upsert_volunteer(volunteer.clone()).await {
        Ok(()) => HttpResponse::Created().json(volunteer),
        Err(e) => store_failure("store volunteer", e),
    }
}

/// GET /volunteers/{volunteerId}
async fn get_volunteer(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    match state.service.store().find_volunteer(&path).await {
        Ok(Some(volunteer)) => HttpResponse::Ok().json(volunteer),
        Ok(None) => HttpResponse::NotFound().json(ErrorResponse::new(
            "not_found",
            "Volunteer not found",
            404,
        )),
        Err(e) => store_failure("fetch volunteer", e),
    }
}

/// Create or replace an event
///
/// POST /events
///
/// Request body:
/// ```json
/// {
///   "id": 101,
///   "title": "string",
///   "location": "Houston",
///   "requiredSkills": ["cooking"],
///   "preferenceTag": "outdoors",
///   "startTime": "2025-07-17T10:00:00Z",
///   "endTime": "2025-07-17T18:00:00Z"
/// }
/// ```
async fn create_event(
    state: web::Data<AppState>,
    req: web::Json<EventRecord>,
) -> impl Responder {
    let event = match Event::try_from(req.into_inner()) {
        Ok(event) => event,
        Err(e) => {
            tracing::info!("Rejected event record: {}", e);
            return HttpResponse::BadRequest().json(ErrorResponse::new(
                "malformed_input",
                e.to_string(),
                400,
            ));
        }
    };

    match state.service.store().upsert_event(event.clone()).await {
        Ok(()) => HttpResponse::Created().json(event),
        Err(e) => store_failure("store event", e),
    }
}

/// GET /events
async fn list_events(state: web::Data<AppState>) -> impl Responder {
    match state.service.store().list_events().await {
        Ok(events) => HttpResponse::Ok().json(events),
        Err(e) => store_failure("list events", e),
    }
}

/// Notifications delivered to a volunteer, newest first
///
/// GET /notifications/{volunteerId}
async fn list_notifications(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let volunteer_id = path.into_inner();

    match state.service.store().list_notifications(&volunteer_id).await {
        Ok(notifications) => HttpResponse::Ok().json(NotificationListResponse {
            count: notifications.len(),
            volunteer_id,
            notifications,
        }),
        Err(e) => store_failure("list notifications", e),
    }
}
