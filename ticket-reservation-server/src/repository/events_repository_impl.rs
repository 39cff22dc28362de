use super::{
    entity::{EventEntity, TicketEntity},
    Error, EventsRepository,
};
use axum::async_trait;
use reservation_engine::{Event, Ticket};
use serde::{de::DeserializeOwned, Serialize};
use std::{
    collections::{HashMap, HashSet},
    io::ErrorKind,
    path::{Path, PathBuf},
};
use tokio::{
    fs::{self, File, OpenOptions},
    io::AsyncWriteExt,
    sync::Mutex,
};
use uuid::Uuid;

const EVENTS_FILE: &str = "events.jsonl";
const TICKETS_FILE: &str = "tickets.jsonl";

struct TicketsLog {
    file: File,
    saved_ids: HashSet<Uuid>,
}

///
/// Keeps events and tickets as two append-only logs of JSON lines.
///
/// Every save appends only the new records, so its cost does not depend on
/// how much is already stored. Events are appended as snapshots and folded
/// on read, keeping the smallest `available_tickets` seen for each id.
/// Logs are compacted and torn last lines are dropped when the repository opens.
///
pub struct JsonFileEventsRepository {
    events_path: PathBuf,
    tickets_path: PathBuf,
    events_file: Mutex<File>,
    tickets_log: Mutex<TicketsLog>,
}

impl JsonFileEventsRepository {
    pub async fn new(directory: &Path) -> Result<Self, Error> {
        fs::create_dir_all(directory).await?;

        let events_path = directory.join(EVENTS_FILE);
        let tickets_path = directory.join(TICKETS_FILE);

        let (snapshots, events_complete) = Self::read_log::<EventEntity>(&events_path).await?;
        let snapshots_len = snapshots.len();
        let events = fold_snapshots(snapshots);
        if !events_complete || events.len() < snapshots_len {
            Self::rewrite_log(&events_path, &events).await?;
            tracing::debug!(
                snapshots = snapshots_len,
                events = events.len(),
                "compacted events log"
            );
        }

        let (tickets, tickets_complete) = Self::read_log::<TicketEntity>(&tickets_path).await?;
        if !tickets_complete {
            Self::rewrite_log(&tickets_path, &tickets).await?;
        }
        let saved_ids = tickets.iter().map(|ticket| ticket.id).collect();

        let events_file = Self::open_append(&events_path).await?;
        let tickets_file = Self::open_append(&tickets_path).await?;

        Ok(Self {
            events_path,
            tickets_path,
            events_file: Mutex::new(events_file),
            tickets_log: Mutex::new(TicketsLog {
                file: tickets_file,
                saved_ids,
            }),
        })
    }

    async fn open_append(path: &Path) -> Result<File, Error> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await?;

        Ok(file)
    }

    async fn read_log<T: DeserializeOwned>(path: &Path) -> Result<(Vec<T>, bool), Error> {
        let content = match fs::read_to_string(path).await {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok((Vec::new(), true)),
            Err(err) => return Err(err.into()),
        };

        let log = parse_lines(&content)?;

        Ok(log)
    }

    async fn rewrite_log<T: Serialize>(path: &Path, entities: &[T]) -> Result<(), Error> {
        let mut bytes = Vec::new();
        for entity in entities {
            push_line(&mut bytes, entity)?;
        }

        let temporary_path = path.with_extension("jsonl.tmp");
        fs::write(&temporary_path, bytes).await?;
        fs::rename(&temporary_path, path).await?;

        Ok(())
    }

    ///
    /// On failure the file is cut back to its previous length,
    /// so a half written line never glues onto the next append
    ///
    async fn append(file: &mut File, bytes: &[u8]) -> Result<(), Error> {
        let previous_len = file.metadata().await?.len();

        let written = async {
            file.write_all(bytes).await?;
            file.flush().await
        }
        .await;

        if let Err(err) = written {
            if let Err(truncate_err) = file.set_len(previous_len).await {
                tracing::error!(%truncate_err, "cannot truncate log after failed append");
            }
            return Err(err.into());
        }

        Ok(())
    }
}

#[async_trait]
impl EventsRepository for JsonFileEventsRepository {
    async fn find_all_events(&self) -> Result<Vec<Event>, Error> {
        let _guard = self.events_file.lock().await;

        let (snapshots, _) = Self::read_log::<EventEntity>(&self.events_path).await?;
        let events = fold_snapshots(snapshots)
            .into_iter()
            .map(Event::from)
            .collect();

        Ok(events)
    }

    async fn find_all_tickets(&self) -> Result<Vec<Ticket>, Error> {
        let _guard = self.tickets_log.lock().await;

        let (entities, _) = Self::read_log::<TicketEntity>(&self.tickets_path).await?;
        let tickets = entities.into_iter().map(Ticket::from).collect();

        Ok(tickets)
    }

    async fn save_event(&self, event: &Event) -> Result<(), Error> {
        let mut bytes = Vec::new();
        push_line(&mut bytes, &EventEntity::from(event))?;

        let mut file = self.events_file.lock().await;
        Self::append(&mut file, &bytes).await?;
        tracing::debug!(id = %event.id, "saved event");

        Ok(())
    }

    async fn save_tickets(&self, tickets: &[Ticket]) -> Result<(), Error> {
        let mut log = self.tickets_log.lock().await;

        let mut new_ids = HashSet::with_capacity(tickets.len());
        let mut bytes = Vec::new();
        for ticket in tickets {
            let id = *ticket.id.as_uuid();
            if log.saved_ids.contains(&id) || !new_ids.insert(id) {
                continue;
            }
            push_line(&mut bytes, &TicketEntity::from(ticket))?;
        }

        if new_ids.is_empty() {
            return Ok(());
        }

        Self::append(&mut log.file, &bytes).await?;
        log.saved_ids.extend(new_ids.iter().copied());
        tracing::debug!(count = new_ids.len(), "saved tickets");

        Ok(())
    }
}

fn push_line<T: Serialize>(bytes: &mut Vec<u8>, entity: &T) -> Result<(), Error> {
    serde_json::to_writer(&mut *bytes, entity)?;
    bytes.push(b'\n');

    Ok(())
}

///
/// Parses one entity per line, blank lines are skipped.
/// A last line without its newline was cut by a crash mid write,
/// it is dropped and reported through the returned flag
///
fn parse_lines<T: DeserializeOwned>(content: &str) -> Result<(Vec<T>, bool), serde_json::Error> {
    let complete = content.is_empty() || content.ends_with('\n');

    let mut lines = content.lines().collect::<Vec<_>>();
    if !complete {
        if let Some(torn) = lines.pop() {
            tracing::warn!(len = torn.len(), "dropping torn last line");
        }
    }

    let entities = lines
        .into_iter()
        .filter(|line| !line.trim().is_empty())
        .map(serde_json::from_str::<T>)
        .collect::<Result<Vec<_>, _>>()?;

    Ok((entities, complete))
}

///
/// Capacity only ever decreases, so the smallest `available_tickets`
/// of an event wins. Order of first appearance is kept
///
fn fold_snapshots(snapshots: Vec<EventEntity>) -> Vec<EventEntity> {
    let mut positions = HashMap::<Uuid, usize>::new();
    let mut events = Vec::<EventEntity>::new();

    for snapshot in snapshots {
        match positions.get(&snapshot.id) {
            Some(&position) => {
                let saved = &mut events[position];
                let available_tickets = saved.available_tickets.min(snapshot.available_tickets);
                *saved = EventEntity {
                    available_tickets,
                    ..snapshot
                };
            }
            None => {
                positions.insert(snapshot.id, events.len());
                events.push(snapshot);
            }
        }
    }

    events
}
