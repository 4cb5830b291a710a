pub mod esg_model;
pub mod esg_service;

pub use esg_model::{EsgDimension, EsgExtractedData, EsgScoreResponse, EsgSubScore};
pub use esg_service::EsgScoringEngine;

#[cfg(test)]
mod tests;
