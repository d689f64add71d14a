//! UseCase u601: обогащение загруженного списка компаний через LLM

pub mod cost_model;
pub mod enrichment_client;
pub mod error;
pub mod executor;
pub mod response_parser;
pub mod row_extractor;

pub use cost_model::CostModel;
pub use enrichment_client::EnrichmentClient;
pub use error::{EnrichmentError, ExtractError};
pub use executor::{BatchResult, EnrichExecutor};
pub use row_extractor::{extract_companies, Company};
