mod application;
mod client;
mod command;
mod dto;

use application::ApplicationEnv;
use client::ReservationClient;
use command::Command;
use dto::{BookedTickets, CreatedEvent, Event};
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    #[cfg(debug_assertions)]
    {
        // Ignore error because .env file is not required
        // as long as env variables are set
        let _ = dotenvy::dotenv();
    }

    let env = ApplicationEnv::parse()?;

    application::setup_tracing()?;

    let client = ReservationClient::new(env.server_url);
    let welcome = client
        .welcome()
        .await
        .map_err(|err| anyhow::anyhow!("cannot connect to server: {err}"))?;
    println!("{welcome}");
    println!("Type 'help' to view available commands");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(command::ParseError::Empty) => continue,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };

        match command {
            Command::Get => match client.list_events().await {
                Ok(events) => print_events(&events),
                Err(err) => println!("{err}"),
            },
            Command::Create {
                name,
                date,
                total_tickets,
            } => match client.create_event(&name, date, total_tickets).await {
                Ok(created) => print_created_event(&created),
                Err(err) => println!("{err}"),
            },
            Command::Book { event_id, count } => {
                match client.book_tickets(event_id, count).await {
                    Ok(booked) => print_booked_tickets(&booked),
                    Err(err) => println!("{err}"),
                }
            }
            Command::Simulate { event_id, requests } => {
                let report = client.simulate(event_id, requests).await;
                println!(
                    "Succeeded: {}, sold out: {}, failed: {}",
                    report.succeeded, report.sold_out, report.failed
                );
            }
            Command::Help => println!("{}", command::HELP),
            Command::Exit => break,
        }
    }

    println!("Exiting...");

    Ok(())
}

fn print_event(event: &Event) {
    println!("ID: {}", event.id);
    println!("Name: {}", event.name);
    println!("Date: {}", event.date);
    println!("Total Tickets: {}", event.total_tickets);
    println!("Available Tickets: {}", event.available_tickets);
}

fn print_events(events: &[Event]) {
    if events.is_empty() {
        println!("No events found");
        return;
    }

    println!("Events:");
    for event in events {
        print_event(event);
        println!();
    }
}

fn print_created_event(created: &CreatedEvent) {
    println!("Event created successfully");
    print_event(&created.event);
    if let Some(warning) = &created.warning {
        println!("Warning: {warning}");
    }
}

fn print_booked_tickets(booked: &BookedTickets) {
    println!("Tickets booked successfully for event {}", booked.tickets.event_id);
    println!("Ticket IDs:");
    for ticket_id in &booked.tickets.ticket_ids {
        println!("{ticket_id}");
    }
    if let Some(warning) = &booked.warning {
        println!("Warning: {warning}");
    }
}
