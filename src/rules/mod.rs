pub mod rules_model;

pub use rules_model::{ClimateRiskLevel, RegulatoryTables};
