pub mod anthropic_provider;
pub mod types;

#[cfg(test)]
pub mod testing;

pub use types::*;
