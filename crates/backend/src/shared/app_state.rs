use std::sync::Arc;

use crate::shared::config::Config;
use crate::shared::llm::{anthropic_provider::AnthropicProvider, LlmProvider};
use crate::usecases::u601_enrich_companies::{EnrichExecutor, EnrichmentClient};

/// Состояние приложения, общее для всех запросов (только чтение)
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub executor: Arc<EnrichExecutor>,
}

impl AppState {
    /// Собрать состояние с провайдером Anthropic из конфигурации
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let provider = AnthropicProvider::new(&config.enrichment)?;
        Ok(Self::with_provider(config, Arc::new(provider)))
    }

    /// Собрать состояние с произвольным LLM-провайдером
    pub fn with_provider(config: Config, provider: Arc<dyn LlmProvider>) -> Self {
        let client = EnrichmentClient::new(provider);
        let executor = EnrichExecutor::new(client, &config.enrichment);
        Self {
            config: Arc::new(config),
            executor: Arc::new(executor),
        }
    }
}
