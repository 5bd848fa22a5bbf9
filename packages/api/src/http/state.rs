use std::sync::Arc;

use crate::analyzer::ClauseAnalyzer;

#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<ClauseAnalyzer>,
}

impl AppState {
    pub fn new(analyzer: ClauseAnalyzer) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
        }
    }
}
