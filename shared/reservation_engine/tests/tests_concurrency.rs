mod common;

pub use common::*;
use reservation_engine::{Error, EventStatus, ReservationEngine, TicketId};
use std::{collections::HashSet, sync::Arc, time::Duration};
use time::macros::date;
use tokio::task::JoinSet;

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concert_last_tickets_then_late_request() {
    let engine = create_engine();
    let event = engine
        .create_event("Concert".to_string(), date!(2024 - 06 - 01), 3)
        .await
        .unwrap();

    let event_id = event.id;
    let mut bookings = JoinSet::new();
    for _ in 0..3 {
        let engine = engine.clone();
        bookings.spawn(async move { engine.book_tickets(event_id, 1).await });
    }

    let mut ticket_ids = HashSet::new();
    while let Some(booking) = bookings.join_next().await {
        let booked = booking.unwrap().unwrap();
        assert_eq!(booked.len(), 1);
        ticket_ids.extend(booked);
    }
    assert_eq!(ticket_ids.len(), 3);

    let exhausted = engine.get_event(event.id).await.unwrap();
    assert_eq!(exhausted.available_capacity, 0);
    assert_eq!(exhausted.status(), EventStatus::Exhausted);

    let late = engine.book_tickets(event.id, 1).await;
    assert!(matches!(late, Err(Error::InsufficientCapacity { .. })));
    assert_eq!(
        engine.get_event(event.id).await.unwrap().available_capacity,
        0
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn exactly_capacity_callers_succeed() {
    const CAPACITY: u32 = 50;
    const CALLERS: usize = 500;

    for _ in 0..10 {
        let engine = create_engine();
        let event = engine
            .create_event("Race".to_string(), date!(2024 - 06 - 01), CAPACITY)
            .await
            .unwrap();

        let event_id = event.id;
        let mut bookings = JoinSet::new();
        for _ in 0..CALLERS {
            let engine = engine.clone();
            bookings.spawn(async move { engine.book_tickets(event_id, 1).await });
        }

        let mut succeeded = 0;
        let mut rejected = 0;
        while let Some(booking) = bookings.join_next().await {
            match booking.unwrap() {
                Ok(_) => succeeded += 1,
                Err(Error::InsufficientCapacity { .. }) => rejected += 1,
                Err(err) => panic!("unexpected booking error: {err}"),
            }
        }

        assert_eq!(succeeded, CAPACITY as usize);
        assert_eq!(rejected, CALLERS - CAPACITY as usize);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn no_oversell_with_mixed_counts() {
    const CAPACITY: u32 = 97;

    let engine = create_engine();
    let event = engine
        .create_event("Festival".to_string(), date!(2024 - 07 - 14), CAPACITY)
        .await
        .unwrap();

    let event_id = event.id;
    let mut bookings = JoinSet::new();
    for caller in 0..300u32 {
        let engine = engine.clone();
        let count = caller % 5 + 1;
        bookings.spawn(async move { engine.book_tickets(event_id, count).await });
    }

    let mut issued = 0;
    while let Some(booking) = bookings.join_next().await {
        if let Ok(ticket_ids) = booking.unwrap() {
            issued += ticket_ids.len() as u32;
        }

        let observed = engine.get_event(event.id).await.unwrap();
        assert!(observed.available_capacity <= CAPACITY);
    }

    let event = engine.get_event(event.id).await.unwrap();
    let tickets = engine.list_tickets(event.id).await.unwrap();
    assert!(issued <= CAPACITY);
    assert_eq!(issued, CAPACITY - event.available_capacity);
    assert_eq!(tickets.len() as u32, issued);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn ticket_ids_unique_across_events() {
    let engine = create_engine();
    let mut events = Vec::new();
    for i in 0..4 {
        let event = engine
            .create_event(format!("event {i}"), date!(2024 - 06 - 01), 100)
            .await
            .unwrap();
        events.push(event);
    }

    let mut bookings = JoinSet::new();
    for i in 0..200 {
        let engine = engine.clone();
        let event_id = events[i % events.len()].id;
        bookings.spawn(async move { engine.book_tickets(event_id, 2).await });
    }

    let mut ticket_ids = HashSet::<TicketId>::new();
    while let Some(booking) = bookings.join_next().await {
        for ticket_id in booking.unwrap().unwrap() {
            assert!(ticket_ids.insert(ticket_id));
        }
    }
    assert_eq!(ticket_ids.len(), 400);

    let event_ids = engine
        .list_events()
        .await
        .into_iter()
        .map(|event| event.id)
        .collect::<HashSet<_>>();
    for event in &events {
        let tickets = engine.list_tickets(event.id).await.unwrap();
        assert_eq!(tickets.len(), 100);
        assert!(tickets
            .iter()
            .all(|ticket| event_ids.contains(&ticket.event_id) && ticket.event_id == event.id));
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn events_isolated_under_contention() {
    let engine = create_engine();
    let contended = engine
        .create_event("Contended".to_string(), date!(2024 - 06 - 01), 10)
        .await
        .unwrap();
    let quiet = engine
        .create_event("Quiet".to_string(), date!(2024 - 06 - 02), 20)
        .await
        .unwrap();

    let (contended_id, quiet_id) = (contended.id, quiet.id);

    let mut contention = JoinSet::new();
    for _ in 0..1_000 {
        let engine = engine.clone();
        contention.spawn(async move { engine.book_tickets(contended_id, 1).await });
    }

    let mut quiet_bookings = JoinSet::new();
    for _ in 0..20 {
        let engine = engine.clone();
        quiet_bookings.spawn(async move { engine.book_tickets(quiet_id, 1).await });
    }

    let quiet_results = tokio::time::timeout(Duration::from_secs(10), async {
        let mut results = Vec::new();
        while let Some(booking) = quiet_bookings.join_next().await {
            results.push(booking.unwrap());
        }
        results
    })
    .await
    .unwrap();
    assert!(quiet_results.iter().all(Result::is_ok));

    while contention.join_next().await.is_some() {}

    assert_eq!(
        engine.get_event(contended.id).await.unwrap().available_capacity,
        0
    );
    let quiet = engine.get_event(quiet.id).await.unwrap();
    assert_eq!(quiet.available_capacity, 0);
    assert_eq!(quiet.total_capacity, 20);
}

#[tokio::test]
async fn list_events_twice_identical() {
    let engine = create_engine();
    for (name, capacity) in [("first", 1), ("second", 2), ("third", 3)] {
        engine
            .create_event(name.to_string(), date!(2024 - 06 - 01), capacity)
            .await
            .unwrap();
    }

    let mut first = engine.list_events().await;
    let mut second = engine.list_events().await;
    first.sort_by_key(|event| event.id);
    second.sort_by_key(|event| event.id);

    assert_eq!(first.len(), 3);
    assert_eq!(first, second);
}

#[tokio::test]
async fn zero_capacity_event_never_bookable() {
    let engine = create_engine();
    let event = engine
        .create_event("Empty".to_string(), date!(2024 - 06 - 01), 0)
        .await
        .unwrap();

    for count in [1, 2, 100] {
        let book_result = engine.book_tickets(event.id, count).await;
        assert!(matches!(
            book_result,
            Err(Error::InsufficientCapacity { available: 0, .. })
        ));
    }
    assert!(engine.list_tickets(event.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn create_event_not_blocked_by_bookings() {
    let engine = create_engine();
    let event = engine
        .create_event("Busy".to_string(), date!(2024 - 06 - 01), 1_000)
        .await
        .unwrap();

    let event_id = event.id;
    let bookings = {
        let engine = Arc::clone(&engine);
        tokio::spawn(async move {
            for _ in 0..1_000 {
                engine.book_tickets(event_id, 1).await.unwrap();
            }
        })
    };

    for i in 0..50 {
        engine
            .create_event(format!("new {i}"), date!(2024 - 06 - 02), 1)
            .await
            .unwrap();
    }

    bookings.await.unwrap();
    assert_eq!(engine.list_events().await.len(), 51);
}
