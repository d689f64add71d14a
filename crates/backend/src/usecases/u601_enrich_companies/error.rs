use thiserror::Error;

use crate::shared::llm::LlmError;

/// Ошибка разбора загруженной таблицы. Прерывает весь запрос.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("uploaded file is not valid UTF-8: {0}")]
    InvalidEncoding(#[from] std::str::Utf8Error),

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Ошибка обогащения одной компании. Пакет при этом продолжается.
#[derive(Debug, Error)]
pub enum EnrichmentError {
    #[error("service error: {0}")]
    Service(#[from] LlmError),

    #[error("no JSON object found in model reply")]
    NoJsonFound,

    #[error("malformed JSON in model reply: {0}")]
    MalformedJson(#[source] serde_json::Error),
}
