use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{error, info, warn};
use wayfare_core::AnalyticsSettings;
use wayfare_domain::FetchState;
use wayfare_store::{Snapshot, SnapshotLoader};

#[derive(Clone)]
pub struct AppState {
    pub dashboards: Arc<DashboardStore>,
    pub settings: Arc<AnalyticsSettings>,
}

impl AppState {
    pub fn new(loader: SnapshotLoader, settings: AnalyticsSettings) -> Self {
        Self {
            dashboards: Arc::new(DashboardStore::new(loader)),
            settings: Arc::new(settings),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RefreshOutcome {
    /// Generation of the snapshot now being served
    pub generation: u64,
    /// False when a newer refresh had already been applied
    pub applied: bool,
    pub loaded: bool,
}

struct Current {
    generation: u64,
    data: FetchState<Arc<Snapshot>>,
}

/// Single owner of the fetched snapshot every dashboard is computed from.
///
/// Refreshes are numbered when they start. A refresh only lands if no
/// refresh that started after it has landed already (last write wins).
pub struct DashboardStore {
    loader: SnapshotLoader,
    next_generation: AtomicU64,
    current: RwLock<Current>,
}

impl DashboardStore {
    pub fn new(loader: SnapshotLoader) -> Self {
        Self {
            loader,
            next_generation: AtomicU64::new(0),
            current: RwLock::new(Current {
                generation: 0,
                data: FetchState::Loading,
            }),
        }
    }

    pub fn loader(&self) -> &SnapshotLoader {
        &self.loader
    }

    pub async fn refresh(&self) -> RefreshOutcome {
        let generation = self.next_generation.fetch_add(1, Ordering::SeqCst) + 1;
        let result = self.loader.load().await;

        let mut current = self.current.write().await;
        if generation < current.generation {
            warn!(
                "Discarding refresh #{} superseded by #{}",
                generation, current.generation
            );
            return RefreshOutcome {
                generation: current.generation,
                applied: false,
                loaded: current.data.is_loaded(),
            };
        }

        current.generation = generation;
        current.data = match result {
            Ok(snapshot) => {
                info!("Dashboard data refreshed (generation {})", generation);
                FetchState::Loaded(Arc::new(snapshot))
            }
            Err(e) => {
                error!("Dashboard refresh #{} failed: {}", generation, e);
                FetchState::Failed(e.to_string())
            }
        };

        RefreshOutcome {
            generation,
            applied: true,
            loaded: current.data.is_loaded(),
        }
    }

    pub async fn current(&self) -> FetchState<Arc<Snapshot>> {
        self.current.read().await.data.clone()
    }

    pub async fn generation(&self) -> u64 {
        self.current.read().await.generation
    }
}
