//! Fundamental data request parameters

/// Financial statement request builder
pub mod statement;

pub use statement::FinancialStatement;
