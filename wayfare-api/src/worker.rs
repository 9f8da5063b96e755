use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{info, warn};

use crate::state::DashboardStore;

/// Periodically re-fetch the snapshot. The first tick fires immediately.
pub fn start_refresh_worker(store: Arc<DashboardStore>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!("Refresh worker started, interval {:?}", every);

        loop {
            ticker.tick().await;
            let outcome = store.refresh().await;
            if !outcome.loaded {
                warn!("Scheduled refresh left dashboards without data");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfare_domain::FetchState;
    use wayfare_store::{CollectionLayout, MemoryStore, SnapshotLoader};

    #[tokio::test]
    async fn test_worker_loads_on_first_tick() {
        let loader = SnapshotLoader::new(Arc::new(MemoryStore::new()), CollectionLayout::default());
        let store = Arc::new(DashboardStore::new(loader));

        let handle = start_refresh_worker(store.clone(), Duration::from_secs(3600));
        for _ in 0..50 {
            if store.current().await.is_loaded() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        handle.abort();

        assert!(matches!(store.current().await, FetchState::Loaded(_)));
        assert_eq!(store.generation().await, 1);
    }
}
