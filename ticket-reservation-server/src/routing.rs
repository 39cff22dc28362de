use crate::{
    application::ApplicationState,
    dto::{input, output},
    error::Error,
    service::events_service::EventsService,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use reservation_engine::EventId;
use std::sync::Arc;
use uuid::Uuid;

const WELCOME: &str = "Ticket reservation server";

pub fn routing() -> Router<ApplicationState> {
    Router::new()
        .route("/", get(welcome))
        .route("/api/v1/events", get(get_events).post(post_event))
        .route("/api/v1/events/:event_id", get(get_event))
        .route("/api/v1/events/:event_id/reserve", post(post_reservation))
        .route("/api/v1/events/:event_id/tickets", get(get_tickets))
}

async fn welcome() -> &'static str {
    WELCOME
}

async fn get_events(
    State(events_service): State<Arc<dyn EventsService>>,
) -> Result<Json<output::Events>, Error> {
    let events = events_service.find_events().await?;

    Ok(Json(events))
}

async fn post_event(
    State(events_service): State<Arc<dyn EventsService>>,
    Json(event): Json<input::Event>,
) -> Result<(StatusCode, Json<output::CreatedEvent>), Error> {
    let created = events_service.create_event(event).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

async fn get_event(
    State(events_service): State<Arc<dyn EventsService>>,
    Path(event_id): Path<Uuid>,
) -> Result<Json<output::Event>, Error> {
    let event = events_service
        .find_event(EventId::from_uuid(event_id))
        .await?;

    Ok(Json(event))
}

async fn post_reservation(
    State(events_service): State<Arc<dyn EventsService>>,
    Path(event_id): Path<Uuid>,
    Query(reservation): Query<input::Reservation>,
) -> Result<Json<output::BookedTickets>, Error> {
    let booked = events_service
        .book_tickets(EventId::from_uuid(event_id), reservation)
        .await?;

    Ok(Json(booked))
}

async fn get_tickets(
    State(events_service): State<Arc<dyn EventsService>>,
    Path(event_id): Path<Uuid>,
) -> Result<Json<Vec<output::Ticket>>, Error> {
    let tickets = events_service
        .find_tickets(EventId::from_uuid(event_id))
        .await?;

    Ok(Json(tickets))
}
