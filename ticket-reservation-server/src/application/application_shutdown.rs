use super::ApplicationStateToClose;

///
/// Writes every event and ticket one more time,
/// so snapshots that failed to persist while serving requests are not lost.
/// Tickets of an event go first, as on the booking path
///
pub async fn close(state: ApplicationStateToClose) {
    tracing::info!("flushing events to storage");

    let events = state.reservation_engine.list_events().await;
    for event in &events {
        match state.reservation_engine.list_tickets(event.id).await {
            Ok(tickets) => {
                if let Err(err) = state.events_repository.save_tickets(&tickets).await {
                    tracing::error!(id = %event.id, %err, "cannot flush tickets");
                }
            }
            Err(err) => tracing::error!(id = %event.id, %err, "cannot list tickets"),
        }

        if let Err(err) = state.events_repository.save_event(event).await {
            tracing::error!(id = %event.id, %err, "cannot flush event");
        }
    }

    tracing::info!(count = events.len(), "flushed events");
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("starting shutdown");
}
