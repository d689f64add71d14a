pub mod health;
pub mod u601_enrich_companies;
pub mod webhook;
