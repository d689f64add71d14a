pub mod app_state;
pub mod config;
pub mod llm;
pub mod logger;
pub mod request_log;
