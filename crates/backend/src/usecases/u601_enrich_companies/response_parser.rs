use contracts::usecases::u601_enrich_companies::EnrichedData;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use super::EnrichmentError;

/// Жадный захват от первой `{` до последней `}`, включая переводы строк
static JSON_OBJECT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{[\s\S]*\}").expect("JSON object pattern must compile"));

/// Извлечь JSON-объект из свободного текста ответа модели.
///
/// Ошибки:
/// - `NoJsonFound` если в тексте нет фрагмента `{...}`;
/// - `MalformedJson` если фрагмент не разбирается как JSON-объект.
///
/// Состав полей не проверяется.
pub fn parse_enriched_data(text: &str) -> Result<EnrichedData, EnrichmentError> {
    let candidate = JSON_OBJECT
        .find(text)
        .ok_or(EnrichmentError::NoJsonFound)?
        .as_str();

    serde_json::from_str::<Map<String, Value>>(candidate)
        .map(EnrichedData::from)
        .map_err(EnrichmentError::MalformedJson)
}
