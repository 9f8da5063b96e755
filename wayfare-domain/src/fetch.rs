use serde::Serialize;

/// Outcome of loading data from the document store.
///
/// Keeps "still loading", "fetch failed" and "loaded but empty" apart so a
/// failed fetch never renders as a zeroed dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", content = "detail", rename_all = "lowercase")]
pub enum FetchState<T> {
    Loading,
    Failed(String),
    Loaded(T),
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        FetchState::Loading
    }
}

impl<T> FetchState<T> {
    pub fn is_loaded(&self) -> bool {
        matches!(self, FetchState::Loaded(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_failed_stay_distinct() {
        let empty: FetchState<Vec<u32>> = FetchState::Loaded(Vec::new());
        let failed: FetchState<Vec<u32>> = FetchState::Failed("timeout".to_string());

        assert!(empty.is_loaded());
        assert!(matches!(&empty, FetchState::Loaded(v) if v.is_empty()));
        assert!(!failed.is_loaded());
        assert!(matches!(&failed, FetchState::Failed(reason) if reason == "timeout"));
        assert!(matches!(FetchState::<u32>::default(), FetchState::Loading));
    }
}
