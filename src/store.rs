//! # Redis
//!
//! Remote document store for tasks and contestants.
//!
//! Core purpose is keyed reads of small JSON documents. The server works
//! without it; every read path degrades to the compiled-in data.
//!
//! ## Schema
//!
//! - `task:day_{n}` — JSON [`TaskRecord`], n in 1..=7
//! - `contestant:{id}` — JSON [`ContestantRecord`]
//!
//! ## Implementation
//!
//! - Writes are keyed and conditional (`SET NX`), so concurrent seeding from
//!   multiple instances is at-most-once per key
//! - Connection manager retries once with a 100 ms connection timeout and a
//!   short response timeout, so an unreachable store degrades the request
//!   quickly instead of hanging it
use std::{
    collections::BTreeMap,
    sync::Mutex,
    time::Duration,
};

use async_trait::async_trait;
use redis::{
    aio::{ConnectionManager, ConnectionManagerConfig},
    AsyncCommands, Client,
};
use tracing::{info, warn};

use crate::{
    contestants::ContestantRecord,
    error::StoreError,
    tasks::{CompetitionWindow, TaskRecord},
};

const TASK_KEY_PREFIX: &str = "task:day_";
const CONTESTANT_KEY_PREFIX: &str = "contestant:";

const CONNECTION_TIMEOUT: Duration = Duration::from_millis(100);
const RESPONSE_TIMEOUT: Duration = Duration::from_millis(500);

/// Keyed document access for competition data.
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn get_task(&self, day: u8) -> Result<Option<TaskRecord>, StoreError>;

    /// Writes the record only if no document exists for its day. Returns
    /// whether a write happened.
    async fn put_task_if_absent(&self, task: &TaskRecord) -> Result<bool, StoreError>;

    async fn list_tasks(&self) -> Result<Vec<TaskRecord>, StoreError>;

    async fn list_contestants(&self) -> Result<Vec<ContestantRecord>, StoreError>;

    async fn put_contestant(&self, contestant: &ContestantRecord) -> Result<(), StoreError>;
}

fn task_key(day: u8) -> String {
    format!("{TASK_KEY_PREFIX}{day}")
}

fn contestant_key(id: u32) -> String {
    format!("{CONTESTANT_KEY_PREFIX}{id}")
}

pub struct RedisTaskStore {
    connection: ConnectionManager,
}

impl RedisTaskStore {
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let config = ConnectionManagerConfig::new()
            .set_number_of_retries(1)
            .set_connection_timeout(CONNECTION_TIMEOUT)
            .set_response_timeout(RESPONSE_TIMEOUT);

        let client = Client::open(url)?;
        let connection = client.get_connection_manager_with_config(config).await?;

        Ok(Self { connection })
    }
}

#[async_trait]
impl TaskStore for RedisTaskStore {
    async fn get_task(&self, day: u8) -> Result<Option<TaskRecord>, StoreError> {
        let mut con = self.connection.clone();
        let raw: Option<String> = con.get(task_key(day)).await?;

        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn put_task_if_absent(&self, task: &TaskRecord) -> Result<bool, StoreError> {
        let mut con = self.connection.clone();
        let json = serde_json::to_string(task)?;
        let created: bool = con.set_nx(task_key(task.day), json).await?;

        Ok(created)
    }

    async fn list_tasks(&self) -> Result<Vec<TaskRecord>, StoreError> {
        let mut tasks = Vec::new();
        for day in 1..=crate::tasks::COMPETITION_DAYS {
            if let Some(task) = self.get_task(day).await? {
                tasks.push(task);
            }
        }

        Ok(tasks)
    }

    async fn list_contestants(&self) -> Result<Vec<ContestantRecord>, StoreError> {
        let mut con = self.connection.clone();
        let keys: Vec<String> = con.keys(format!("{CONTESTANT_KEY_PREFIX}*")).await?;

        let mut contestants = Vec::with_capacity(keys.len());
        for key in keys {
            let raw: Option<String> = con.get(&key).await?;
            if let Some(json) = raw {
                contestants.push(serde_json::from_str(&json)?);
            }
        }
        contestants.sort_by_key(|c: &ContestantRecord| c.id);

        Ok(contestants)
    }

    async fn put_contestant(&self, contestant: &ContestantRecord) -> Result<(), StoreError> {
        let mut con = self.connection.clone();
        let json = serde_json::to_string(contestant)?;
        let _: () = con.set(contestant_key(contestant.id), json).await?;

        Ok(())
    }
}

/// In-memory store with the same contract. Backs tests and doubles as the
/// pure table-lookup flavor of the store seam.
#[derive(Default)]
pub struct MemoryTaskStore {
    tasks: Mutex<BTreeMap<u8, TaskRecord>>,
    contestants: Mutex<BTreeMap<u32, ContestantRecord>>,
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn get_task(&self, day: u8) -> Result<Option<TaskRecord>, StoreError> {
        Ok(self.tasks.lock().unwrap().get(&day).cloned())
    }

    async fn put_task_if_absent(&self, task: &TaskRecord) -> Result<bool, StoreError> {
        let mut tasks = self.tasks.lock().unwrap();
        if tasks.contains_key(&task.day) {
            return Ok(false);
        }
        tasks.insert(task.day, task.clone());

        Ok(true)
    }

    async fn list_tasks(&self) -> Result<Vec<TaskRecord>, StoreError> {
        Ok(self.tasks.lock().unwrap().values().cloned().collect())
    }

    async fn list_contestants(&self) -> Result<Vec<ContestantRecord>, StoreError> {
        Ok(self.contestants.lock().unwrap().values().cloned().collect())
    }

    async fn put_contestant(&self, contestant: &ContestantRecord) -> Result<(), StoreError> {
        self.contestants
            .lock()
            .unwrap()
            .insert(contestant.id, contestant.clone());

        Ok(())
    }
}

/// Writes the 7 canonical tasks into an empty store, stamping each with its
/// calendar date inside the window. Existing documents are left untouched,
/// and a dead store only logs — startup continues on the built-in table.
pub async fn seed_tasks(store: &dyn TaskStore, window: &CompetitionWindow, table: &[TaskRecord]) {
    let mut seeded = 0;
    for task in table {
        let mut record = task.clone();
        record.date = Some(window.date_for_day(record.day));

        match store.put_task_if_absent(&record).await {
            Ok(true) => seeded += 1,
            Ok(false) => {}
            Err(e) => {
                warn!("task seeding skipped: {e}");
                return;
            }
        }
    }

    if seeded > 0 {
        info!("Seeded {seeded} daily tasks");
    }
}

/// Populates the contestant collection with the built-in roster, but only
/// when the collection is empty. Store failures are logged and swallowed.
pub async fn seed_contestants(store: &dyn TaskStore, roster: &[ContestantRecord]) {
    match store.list_contestants().await {
        Ok(existing) if existing.is_empty() => {
            for contestant in roster {
                if let Err(e) = store.put_contestant(contestant).await {
                    warn!("contestant seeding stopped: {e}");
                    return;
                }
            }
            info!("Seeded {} contestants", roster.len());
        }
        Ok(_) => {}
        Err(e) => warn!("contestant seeding skipped: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::FALLBACK_TASKS;

    #[tokio::test]
    async fn memory_store_put_if_absent_keeps_first_write() {
        let store = MemoryTaskStore::default();
        let first = FALLBACK_TASKS[0].clone();

        assert!(store.put_task_if_absent(&first).await.unwrap());

        let mut second = first.clone();
        second.title = "Overwritten".to_string();
        assert!(!store.put_task_if_absent(&second).await.unwrap());

        let stored = store.get_task(1).await.unwrap().unwrap();
        assert_eq!(stored.title, first.title);
    }

    #[tokio::test]
    async fn memory_store_lists_contestants_by_id() {
        let store = MemoryTaskStore::default();
        for contestant in crate::contestants::seed_roster().iter().rev() {
            store.put_contestant(contestant).await.unwrap();
        }

        let ids: Vec<u32> = store
            .list_contestants()
            .await
            .unwrap()
            .iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, (1..=10).collect::<Vec<u32>>());
    }
}
