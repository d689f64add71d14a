use contracts::usecases::u601_enrich_companies::Record;
use serde_json::Value;

use super::ExtractError;

/// Колонки с названием компании, в порядке приоритета
pub const NAME_ALIASES: [&str; 4] = ["company", "Company", "business_name", "Company Name"];

/// Компания из входного файла вместе с исходной строкой
#[derive(Debug, Clone, PartialEq)]
pub struct Company {
    pub name: String,
    pub original_row: Record,
}

/// Разобрать CSV с заголовком в список компаний.
///
/// Строки без названия компании пропускаются. Любая ошибка разбора
/// прерывает весь разбор, частичный результат не возвращается.
pub fn extract_companies(bytes: &[u8]) -> Result<Vec<Company>, ExtractError> {
    let text = std::str::from_utf8(bytes)?;
    // Strip UTF-8 BOM if present
    let text = text.trim_start_matches('\u{FEFF}');

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();

    let mut companies = Vec::new();
    let mut skipped = 0usize;

    for result in reader.records() {
        let record = result?;

        // Лишние поля без заголовка отбрасываются, недостающие просто отсутствуют
        let row: Record = headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.to_string(), Value::String(v.to_string())))
            .collect();

        match resolve_company_name(&row) {
            Some(name) => companies.push(Company {
                name,
                original_row: row,
            }),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::debug!("Skipped {} rows without a company name", skipped);
    }

    Ok(companies)
}

/// Название компании: первая непустая колонка из `NAME_ALIASES`,
/// иначе первое значение строки.
pub fn resolve_company_name(row: &Record) -> Option<String> {
    NAME_ALIASES
        .iter()
        .filter_map(|alias| non_empty(row.get(*alias)))
        .next()
        .or_else(|| non_empty(row.values().next()))
        .map(str::to_string)
}

fn non_empty(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}
