use rocket::futures::Stream;
use rocket::response::stream::{Event, EventStream};
use rocket::tokio::select;
use rocket::tokio::sync::broadcast::{self, error::RecvError};
use rocket::Shutdown;
use rusqlite::Connection;
use serde::Serialize;

use crate::data::DBConnection;
use crate::internal_error::{InternalError, InternalResult};

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Milestones,
    Tasks,
    Ideas,
    Categories,
    Resources,
    Team,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub enum Change {
    Collection {
        project_id: String,
        collection: Collection,
    },
    Projects,
    Key(String),
}

impl Change {
    pub fn collection(project_id: &str, collection: Collection) -> Change {
        Change::Collection {
            project_id: project_id.to_string(),
            collection,
        }
    }

    pub fn touches(&self, project: &str, wanted: Collection) -> bool {
        match self {
            Change::Collection {
                project_id,
                collection,
            } => project_id == project && *collection == wanted,
            Change::Projects | Change::Key(_) => false,
        }
    }

    pub fn touches_project(&self, project: &str) -> bool {
        match self {
            Change::Collection { project_id, .. } => project_id == project,
            Change::Projects | Change::Key(_) => false,
        }
    }

    pub fn touches_projects(&self) -> bool {
        matches!(self, Change::Projects)
    }

    pub fn touches_key(&self, wanted: &str) -> bool {
        matches!(self, Change::Key(key) if key == wanted)
    }
}

/// Fan-out of mutations to every open change stream.
pub struct ChangeBus {
    sender: broadcast::Sender<Change>,
}

impl ChangeBus {
    pub fn new(capacity: usize) -> ChangeBus {
        let (sender, _) = broadcast::channel(capacity);
        ChangeBus { sender }
    }

    pub fn publish(&self, change: Change) {
        tracing::debug!("change: {:?}", change);
        // No receivers just means nobody is listening right now.
        let _ = self.sender.send(change);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Change> {
        self.sender.subscribe()
    }
}

pub fn load_snapshot<T, F>(db_connection: &DBConnection, load: F) -> T
where
    T: Default,
    F: Fn(&Connection) -> InternalResult<T>,
{
    let result = db_connection
        .lock()
        .map_err(InternalError::from)
        .and_then(|connection| load(&connection));

    match result {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::warn!("snapshot load failed, sending empty snapshot: {}", e);
            T::default()
        }
    }
}

/// Server-sent stream of full snapshots: one on connect, then one after
/// every change accepted by `watches`.
pub fn snapshot_stream<T, W, F>(
    db_connection: DBConnection,
    mut changes: broadcast::Receiver<Change>,
    mut shutdown: Shutdown,
    watches: W,
    load: F,
) -> EventStream<impl Stream<Item = Event>>
where
    T: Serialize + Default + 'static,
    W: Fn(&Change) -> bool + Send + 'static,
    F: Fn(&Connection) -> InternalResult<T> + Send + 'static,
{
    EventStream! {
        let initial = Event::json(&load_snapshot(&db_connection, &load));
        yield initial;

        loop {
            let reload = select! {
                message = changes.recv() => match message {
                    Ok(change) => watches(&change),
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::debug!("change stream lagged by {}", skipped);
                        true
                    }
                    Err(RecvError::Closed) => break,
                },
                _ = &mut shutdown => break,
            };

            if reload {
                let event = Event::json(&load_snapshot(&db_connection, &load));
                yield event;
            }
        }
    }
}
