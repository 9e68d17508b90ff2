use std::sync::Arc;

use crate::search::{LevelSearch, SearchOptions, WordShapeSearch};
use crate::source::PagedSource;

/// Shared, read-only application state / 应用状态
pub struct AppState {
    pub words: WordShapeSearch,
    pub levels: LevelSearch,
    pub options: SearchOptions,
}

impl AppState {
    pub fn new(source: Arc<dyn PagedSource>, options: SearchOptions) -> Self {
        tracing::info!("Search backed by {} source", source.name());
        Self {
            words: WordShapeSearch::new(source.clone(), options.clone()),
            levels: LevelSearch::new(source),
            options,
        }
    }
}
