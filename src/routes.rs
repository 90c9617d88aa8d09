use std::sync::Arc;

use axum::{extract::State, Json};
use chrono::Utc;
use serde::Serialize;
use tracing::warn;

use crate::{
    config::PublicKeys,
    contestants::{seed_roster, ContestantRecord},
    resolver::resolve_day,
    state::State as AppState,
    tasks::{TaskRecord, FALLBACK_TASKS},
};

/// Everything the page needs for one render: roster, resolved day, that
/// day's task, and the public provider keys.
#[derive(Serialize)]
pub struct PageContext {
    pub current_day: u8,
    pub daily_task: TaskRecord,
    pub contestants: Vec<ContestantRecord>,
    #[serde(flatten)]
    pub keys: PublicKeys,
}

#[derive(Serialize)]
pub struct AdminContext {
    #[serde(flatten)]
    pub keys: PublicKeys,
}

#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
    pub timestamp: String,
}

/// The single content-producing function behind every page-shaped endpoint.
pub async fn page_context(state: &AppState) -> PageContext {
    let today = state.clock.now().date_naive();
    let (current_day, daily_task) = resolve_day(
        today,
        &state.window,
        state.store.as_deref(),
        &FALLBACK_TASKS[..],
    )
    .await;

    PageContext {
        current_day,
        daily_task,
        contestants: load_contestants(state).await,
        keys: state.config.public.clone(),
    }
}

async fn load_contestants(state: &AppState) -> Vec<ContestantRecord> {
    if let Some(store) = &state.store {
        match store.list_contestants().await {
            Ok(list) if !list.is_empty() => return list,
            Ok(_) => {}
            Err(e) => warn!("Contestant listing failed, using built-in roster: {e}"),
        }
    }

    seed_roster()
}

pub async fn index_handler(State(state): State<Arc<AppState>>) -> Json<PageContext> {
    Json(page_context(&state).await)
}

pub async fn admin_handler(State(state): State<Arc<AppState>>) -> Json<AdminContext> {
    Json(AdminContext {
        keys: state.config.public.clone(),
    })
}

pub async fn health_handler() -> Json<Health> {
    Json(Health {
        status: "healthy",
        timestamp: Utc::now().to_rfc3339(),
    })
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};

    use super::*;
    use crate::{
        clock::FixedClock,
        config::Config,
        store::{seed_tasks, MemoryTaskStore, TaskStore},
        tasks::CompetitionWindow,
    };

    fn test_state(store: Option<Arc<dyn TaskStore>>) -> AppState {
        let window = CompetitionWindow::new(
            NaiveDate::from_ymd_opt(2025, 4, 15).unwrap(),
            NaiveDate::from_ymd_opt(2025, 4, 21).unwrap(),
        )
        .unwrap();

        AppState {
            config: Config {
                port: 5000,
                window_start: window.start,
                window_end: window.end,
                store: None,
                public: PublicKeys::default(),
            },
            window,
            clock: Arc::new(FixedClock(Utc.with_ymd_and_hms(2025, 4, 17, 13, 30, 0).unwrap())),
            store,
        }
    }

    #[tokio::test]
    async fn page_context_without_store_uses_built_in_data() {
        let context = page_context(&test_state(None)).await;

        assert_eq!(context.current_day, 3);
        assert_eq!(context.daily_task.title, "Nollywood Skit Showdown");
        assert_eq!(context.contestants.len(), 10);
    }

    #[tokio::test]
    async fn page_context_prefers_seeded_store() {
        let store = Arc::new(MemoryTaskStore::default());
        let state = test_state(Some(store.clone()));
        seed_tasks(store.as_ref(), &state.window, &FALLBACK_TASKS[..]).await;

        let context = page_context(&state).await;

        assert_eq!(context.current_day, 3);
        // Seeded documents carry the calendar date the table copy lacks.
        assert_eq!(
            context.daily_task.date,
            Some(NaiveDate::from_ymd_opt(2025, 4, 17).unwrap())
        );
    }
}
