use serde::{Deserialize, Serialize};

use super::ResultRow;

/// Итоги пакета. Все суммы считаются как `количество × константа`.
///
/// Суммы всегда `f64`: пустой пакет дает `0.0`, а не целый `0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentSummary {
    pub total_processed: usize,
    pub estimated_cost: f64,
    pub retail_value: f64,
    pub margin: f64,
}

impl EnrichmentSummary {
    pub fn from_count(count: usize, cost_per_record: f64, retail_value_per_record: f64) -> Self {
        let estimated_cost = count as f64 * cost_per_record;
        let retail_value = count as f64 * retail_value_per_record;
        Self {
            total_processed: count,
            estimated_cost,
            retail_value,
            margin: retail_value - estimated_cost,
        }
    }
}

/// Ответ POST /api/enrich
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichResponse {
    pub success: bool,
    #[serde(flatten)]
    pub summary: EnrichmentSummary,
    pub data: Vec<ResultRow>,
}

impl EnrichResponse {
    pub fn new(summary: EnrichmentSummary, data: Vec<ResultRow>) -> Self {
        Self {
            success: true,
            summary,
            data,
        }
    }
}
