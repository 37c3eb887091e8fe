use std::sync::Arc;

use crate::config::Config;
use crate::service::AnswerService;

/// Shared application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub answers: Arc<AnswerService>,
}

impl AppState {
    pub fn new(config: Config, answers: AnswerService) -> Self {
        Self {
            config: Arc::new(config),
            answers: Arc::new(answers),
        }
    }
}
