use std::sync::Arc;

use contracts::usecases::u601_enrich_companies::EnrichedData;

use super::response_parser::parse_enriched_data;
use super::EnrichmentError;
use crate::shared::llm::{ChatMessage, LlmProvider};

/// Клиент обогащения: один запрос к LLM на одну компанию
pub struct EnrichmentClient {
    provider: Arc<dyn LlmProvider>,
}

impl EnrichmentClient {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.provider_name()
    }

    /// Запросить данные о компании и разобрать JSON из ответа.
    /// Без повторов и без проверки схемы.
    pub async fn enrich(&self, company_name: &str) -> Result<EnrichedData, EnrichmentError> {
        let messages = vec![ChatMessage::user(build_prompt(company_name))];
        let response = self.provider.chat_completion(messages).await?;

        tracing::debug!(
            "{} replied for {:?}: model={}, tokens={:?}, finish={:?}",
            self.provider.provider_name(),
            company_name,
            response.model,
            response.tokens_used,
            response.finish_reason
        );

        let data = parse_enriched_data(&response.content)?;

        let missing = data.missing_fields();
        if !missing.is_empty() {
            tracing::debug!("Reply for {:?} lacks fields: {:?}", company_name, missing);
        }

        Ok(data)
    }
}

/// Фиксированный промпт исследования компании
pub fn build_prompt(company_name: &str) -> String {
    format!(
        r#"Research the company "{company_name}" and return ONLY a JSON object with the following fields:
{{
  "industry": "primary industry",
  "employee_range": "estimated number of employees, e.g. 50-200",
  "revenue_range": "estimated annual revenue, e.g. $10M-$50M",
  "headquarters": "city and country",
  "founded_year": "year the company was founded",
  "tech_stack": ["technologies the company likely uses"],
  "pain_points": ["likely business challenges"],
  "decision_maker": "title of the most likely buyer",
  "linkedin_url": "company LinkedIn URL",
  "ideal_pitch": "one-sentence sales pitch tailored to this company",
  "buying_signals": ["signals that the company may be ready to buy"]
}}

Return ONLY valid JSON. Do not wrap it in markdown code fences and do not add any explanation."#
    )
}
