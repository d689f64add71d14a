pub mod u601_enrich_companies;
