use chrono::{DateTime, Utc};
use contracts::usecases::u601_enrich_companies::{EnrichedData, EnrichmentSummary, ResultRow};
use tracing::Instrument;
use uuid::Uuid;

use super::{Company, CostModel, EnrichmentClient, EnrichmentError};
use crate::shared::config::EnrichmentConfig;

/// Результат обработки пакета
#[derive(Debug, Clone)]
pub struct BatchResult {
    pub rows: Vec<ResultRow>,
    pub summary: EnrichmentSummary,
}

/// Итог по одной компании, до сборки строки результата
#[derive(Debug)]
pub struct EnrichmentOutcome {
    pub company: Company,
    pub result: Result<EnrichedData, EnrichmentError>,
    pub finished_at: DateTime<Utc>,
}

impl EnrichmentOutcome {
    fn into_result_row(self, cost_model: &CostModel) -> ResultRow {
        match self.result {
            Ok(data) => {
                let cost = cost_model.estimate(&data);
                ResultRow::enriched(self.company.original_row, data, cost, self.finished_at)
            }
            Err(_) => ResultRow::failed(self.company.original_row),
        }
    }
}

/// Executor для UseCase обогащения компаний
pub struct EnrichExecutor {
    client: EnrichmentClient,
    cost_model: CostModel,
    batch_limit: usize,
    retail_value_per_record: f64,
}

impl EnrichExecutor {
    pub fn new(client: EnrichmentClient, config: &EnrichmentConfig) -> Self {
        Self {
            client,
            cost_model: CostModel::new(config.cost_per_record),
            batch_limit: config.batch_limit,
            retail_value_per_record: config.retail_value_per_record,
        }
    }

    pub fn batch_limit(&self) -> usize {
        self.batch_limit
    }

    /// Обработать пакет: обогащение по одной компании, затем подсчет итогов
    pub async fn run(&self, companies: Vec<Company>) -> BatchResult {
        let batch_id = Uuid::new_v4();
        let span = tracing::info_span!("enrich_batch", %batch_id, received = companies.len());

        async move {
            let outcomes = self.enrich_all(companies).await;

            let rows: Vec<ResultRow> = outcomes
                .into_iter()
                .map(|o| o.into_result_row(&self.cost_model))
                .collect();
            let failed = rows.iter().filter(|r| r.is_failed()).count();
            let summary = self.summarize(rows.len());

            tracing::info!(
                "Batch finished: {} processed, {} failed, estimated cost {:.2}",
                summary.total_processed,
                failed,
                summary.estimated_cost
            );

            BatchResult { rows, summary }
        }
        .instrument(span)
        .await
    }

    /// Последовательно, в порядке входа, не более `batch_limit` компаний.
    /// Ошибка одной компании не прерывает пакет.
    pub async fn enrich_all(&self, companies: Vec<Company>) -> Vec<EnrichmentOutcome> {
        if companies.len() > self.batch_limit {
            tracing::info!(
                "Batch truncated to {} of {} companies",
                self.batch_limit,
                companies.len()
            );
        }

        let mut outcomes = Vec::with_capacity(companies.len().min(self.batch_limit));

        for company in companies.into_iter().take(self.batch_limit) {
            let result = self.client.enrich(&company.name).await;

            if let Err(e) = &result {
                tracing::error!(
                    "Failed to enrich {:?} via {}: {}",
                    company.name,
                    self.client.provider_name(),
                    e
                );
            }

            outcomes.push(EnrichmentOutcome {
                company,
                result,
                finished_at: Utc::now(),
            });
        }

        outcomes
    }

    /// Итоги считаются только по количеству строк (успешных и с ошибкой)
    pub fn summarize(&self, count: usize) -> EnrichmentSummary {
        EnrichmentSummary::from_count(
            count,
            self.cost_model.cost_per_record(),
            self.retail_value_per_record,
        )
    }
}
