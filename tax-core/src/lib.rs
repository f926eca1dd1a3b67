pub mod calculations;
pub mod engine;
pub mod error;
pub mod models;

#[cfg(test)]
mod test_support;

pub use calculations::{MagiAdjustments, calculate_magi};
pub use engine::TaxEngine;
pub use error::ParameterError;
pub use models::*;
