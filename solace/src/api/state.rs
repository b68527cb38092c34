use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::llm::LlmProvider;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub llm: LlmProvider,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let llm = LlmProvider::new(&config.llm)?;

        Ok(Self {
            config: Arc::new(config),
            llm,
        })
    }
}
