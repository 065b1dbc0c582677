use std::sync::Arc;

use crate::config::Config;
use crate::repositories::ReportStoreTrait;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ReportStoreTrait>,
    pub config: Config,
}

impl AppState {
    pub fn new(store: Arc<dyn ReportStoreTrait>, config: Config) -> Self {
        Self { store, config }
    }
}
