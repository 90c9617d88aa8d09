use std::sync::Arc;

use tracing::warn;

use crate::{
    clock::{Clock, SystemClock},
    config::Config,
    contestants::seed_roster,
    store::{seed_contestants, seed_tasks, RedisTaskStore, TaskStore},
    tasks::{CompetitionWindow, FALLBACK_TASKS},
};

pub struct State {
    pub config: Config,
    pub window: CompetitionWindow,
    pub clock: Arc<dyn Clock>,
    pub store: Option<Arc<dyn TaskStore>>,
}

impl State {
    pub async fn new() -> Arc<Self> {
        let config = Config::load();

        // A window that cannot hold the 7-task schedule is a deployment
        // defect, not something to recover per request.
        let window = CompetitionWindow::new(config.window_start, config.window_end)
            .expect("Competition window misconfigured!");

        let store = match &config.store {
            Some(creds) => match RedisTaskStore::connect(&creds.url).await {
                Ok(store) => Some(Arc::new(store) as Arc<dyn TaskStore>),
                Err(e) => {
                    warn!("Task store unavailable, serving built-in data: {e}");
                    None
                }
            },
            None => {
                warn!("No store credentials configured, serving built-in data");
                None
            }
        };

        if let Some(store) = &store {
            seed_tasks(store.as_ref(), &window, &FALLBACK_TASKS[..]).await;
            seed_contestants(store.as_ref(), &seed_roster()).await;
        }

        Arc::new(Self {
            config,
            window,
            clock: Arc::new(SystemClock),
            store,
        })
    }
}
