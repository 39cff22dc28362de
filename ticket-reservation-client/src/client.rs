use crate::dto::{BookedTickets, CreatedEvent, Event, Events, SimulationReport};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::future::Future;
use time::{macros::format_description, Date};
use tokio::task::{JoinError, JoinSet};
use uuid::Uuid;

/// Bookings sent by `simulate` that may wait for a response at the same time
pub const MAX_IN_FLIGHT_BOOKINGS: usize = 64;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server responded {status}: {message}")]
    Server { status: StatusCode, message: String },

    #[error("date format error: {0}")]
    DateFormat(#[from] time::error::Format),
}

#[derive(Clone)]
pub struct ReservationClient {
    http: Client,
    server_url: String,
}

impl ReservationClient {
    pub fn new(server_url: String) -> Self {
        Self {
            http: Client::new(),
            server_url,
        }
    }

    pub async fn welcome(&self) -> Result<String, Error> {
        let response = self.http.get(self.url("/")).send().await?;
        let response = Self::ensure_success(response).await?;

        Ok(response.text().await?)
    }

    ///
    /// Events sorted by date, then by name
    ///
    pub async fn list_events(&self) -> Result<Vec<Event>, Error> {
        let response = self.http.get(self.url("/api/v1/events")).send().await?;
        let mut events = Self::json::<Events>(response).await?.events;

        sort_events(&mut events);

        Ok(events)
    }

    pub async fn create_event(
        &self,
        name: &str,
        date: Date,
        total_tickets: u32,
    ) -> Result<CreatedEvent, Error> {
        let date = date.format(format_description!("[year]-[month]-[day]"))?;
        let body = json!({
            "name": name,
            "date": date,
            "total_tickets": total_tickets,
        });

        let response = self
            .http
            .post(self.url("/api/v1/events"))
            .json(&body)
            .send()
            .await?;

        Self::json(response).await
    }

    pub async fn book_tickets(&self, event_id: Uuid, count: u32) -> Result<BookedTickets, Error> {
        let response = self
            .http
            .post(self.url(&format!("/api/v1/events/{event_id}/reserve")))
            .query(&[("num_tickets", count)])
            .send()
            .await?;

        Self::json(response).await
    }

    ///
    /// Sends `requests` single ticket bookings concurrently,
    /// at most [MAX_IN_FLIGHT_BOOKINGS] of them at a time.
    /// On a correct server exactly `min(requests, available)` of them succeed
    ///
    pub async fn simulate(&self, event_id: Uuid, requests: u32) -> SimulationReport {
        let client = self.clone();
        run_bookings(requests, MAX_IN_FLIGHT_BOOKINGS, move || {
            let client = client.clone();
            async move { client.book_tickets(event_id, 1).await }
        })
        .await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.server_url)
    }

    async fn ensure_success(response: Response) -> Result<Response, Error> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        Err(Error::Server { status, message })
    }

    async fn json<T: DeserializeOwned>(response: Response) -> Result<T, Error> {
        let response = Self::ensure_success(response).await?;

        Ok(response.json().await?)
    }
}

///
/// Runs `requests` bookings, starting the next one only
/// when fewer than `max_in_flight` are unfinished
///
async fn run_bookings<F, Fut, T>(requests: u32, max_in_flight: usize, book: F) -> SimulationReport
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, Error>> + Send + 'static,
    T: Send + 'static,
{
    let max_in_flight = max_in_flight.max(1);
    let mut report = SimulationReport::default();
    let mut bookings = JoinSet::new();

    for _ in 0..requests {
        if bookings.len() >= max_in_flight {
            if let Some(result) = bookings.join_next().await {
                record(&mut report, result);
            }
        }
        bookings.spawn(book());
    }

    while let Some(result) = bookings.join_next().await {
        record(&mut report, result);
    }

    report
}

fn record<T>(report: &mut SimulationReport, result: Result<Result<T, Error>, JoinError>) {
    match result {
        Ok(Ok(_)) => report.succeeded += 1,
        Ok(Err(Error::Server {
            status: StatusCode::CONFLICT,
            ..
        })) => report.sold_out += 1,
        Ok(Err(err)) => {
            tracing::warn!(%err, "booking failed");
            report.failed += 1;
        }
        Err(err) => {
            tracing::error!(%err, "booking task failed");
            report.failed += 1;
        }
    }
}

///
/// Server returns events in no particular order.
/// Dates are `YYYY-MM-DD`, so comparing them as strings orders them by day
///
pub fn sort_events(events: &mut [Event]) {
    events.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.name.cmp(&b.name)));
}
