use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::utils::decimal_serde::decimal_serde;

/// One exposure bucket within a concentration dimension
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConcentrationBucket {
    pub label: String,
    #[serde(with = "decimal_serde")]
    pub value: Decimal,
    /// Share of total invested capital, 0-100
    #[serde(with = "decimal_serde")]
    pub percentage: Decimal,
    pub is_concentrated: bool,
}

/// Exposure breakdown across the four concentration dimensions, plus flat
/// human-readable flags for any bucket over the threshold.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConcentrationAnalysis {
    pub sector: Vec<ConcentrationBucket>,
    pub geography: Vec<ConcentrationBucket>,
    pub counterparty: Vec<ConcentrationBucket>,
    pub currency: Vec<ConcentrationBucket>,
    pub flags: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ConcentrationAnalysisResponse {
    pub portfolio_id: String,
    pub analysis: ConcentrationAnalysis,
    pub as_of: DateTime<Utc>,
}
