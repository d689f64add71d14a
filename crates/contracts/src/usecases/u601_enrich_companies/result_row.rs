use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::EnrichedData;

/// Маркер ошибки обогащения. Причина в ответ не попадает, только в лог.
pub const ENRICHMENT_FAILED: &str = "Enrichment failed";

/// Строка входной таблицы: имя колонки -> строковое значение.
/// Порядок колонок соответствует заголовку файла.
pub type Record = Map<String, Value>;

/// Строка результата: исходные колонки плюс данные обогащения
/// (или поле `error`), плоским JSON-объектом.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultRow(pub Map<String, Value>);

impl ResultRow {
    /// Успешно обогащенная строка. Поля модели перекрывают одноименные
    /// исходные колонки, служебные поля перекрывают поля модели.
    pub fn enriched(
        original_row: Record,
        data: EnrichedData,
        enrichment_cost: f64,
        enriched_at: DateTime<Utc>,
    ) -> Self {
        let mut row = original_row;
        row.extend(data.into_inner());
        row.insert("enrichment_cost".to_string(), Value::from(enrichment_cost));
        row.insert(
            "enriched_at".to_string(),
            Value::String(enriched_at.to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        Self(row)
    }

    /// Строка, для которой обогащение не удалось
    pub fn failed(original_row: Record) -> Self {
        let mut row = original_row;
        row.insert(
            "error".to_string(),
            Value::String(ENRICHMENT_FAILED.to_string()),
        );
        Self(row)
    }

    pub fn is_failed(&self) -> bool {
        self.0.get("error").and_then(Value::as_str) == Some(ENRICHMENT_FAILED)
    }
}
