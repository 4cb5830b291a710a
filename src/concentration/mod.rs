pub mod concentration_model;
pub mod concentration_service;

pub use concentration_model::{
    ConcentrationAnalysis, ConcentrationAnalysisResponse, ConcentrationBucket,
};
pub use concentration_service::{ConcentrationAnalyzer, ConcentrationService};

#[cfg(test)]
mod tests;
