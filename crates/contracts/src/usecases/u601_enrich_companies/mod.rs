//! Контракты UseCase обогащения списка компаний

pub mod enriched_data;
pub mod response;
pub mod result_row;

pub use enriched_data::{EnrichedData, ENRICHED_FIELDS};
pub use response::{EnrichResponse, EnrichmentSummary};
pub use result_row::{Record, ResultRow, ENRICHMENT_FAILED};
