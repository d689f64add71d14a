use contracts::usecases::u601_enrich_companies::EnrichedData;

/// Оценка стоимости обогащения одной строки.
///
/// Это фиксированная константа, а не учет реально потраченных токенов.
#[derive(Debug, Clone, Copy)]
pub struct CostModel {
    cost_per_record: f64,
}

impl CostModel {
    pub fn new(cost_per_record: f64) -> Self {
        Self { cost_per_record }
    }

    pub fn cost_per_record(&self) -> f64 {
        self.cost_per_record
    }

    pub fn estimate(&self, _data: &EnrichedData) -> f64 {
        self.cost_per_record
    }
}
