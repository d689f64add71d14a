use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Поля, которые модель должна вернуть для каждой компании
pub const ENRICHED_FIELDS: [&str; 11] = [
    "industry",
    "employee_range",
    "revenue_range",
    "headquarters",
    "founded_year",
    "tech_stack",
    "pain_points",
    "decision_maker",
    "linkedin_url",
    "ideal_pitch",
    "buying_signals",
];

/// Данные о компании, полученные от LLM.
///
/// Схема не проверяется: принимается любой JSON-объект, поля переносятся
/// в результирующую строку как есть.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnrichedData(pub Map<String, Value>);

impl EnrichedData {
    /// Какие из ожидаемых полей модель не вернула
    pub fn missing_fields(&self) -> Vec<&'static str> {
        ENRICHED_FIELDS
            .iter()
            .copied()
            .filter(|f| !self.0.contains_key(*f))
            .collect()
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for EnrichedData {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
