use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::portfolio::SfdrClassification;
use crate::utils::decimal_serde::decimal_serde;

/// Outcome of one Do-No-Significant-Harm objective check
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DnshStatus {
    Compliant,
    NeedsAssessment,
    NonCompliant,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DnshCheck {
    pub objective: String,
    pub status: DnshStatus,
}

/// Per-holding EU Taxonomy evaluation. Alignment is a refinement of
/// eligibility: `aligned` implies `eligible`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaxonomyResult {
    pub holding_id: String,
    pub asset_name: String,
    pub eligible: bool,
    pub aligned: bool,
    /// Taxonomy economic activity, when the holding maps to one
    pub activity: Option<String>,
    pub dnsh_checks: Vec<DnshCheck>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaiStatus {
    Met,
    PendingMeasurement,
    Estimated,
    NeedsAssessment,
    NeedsData,
}

/// One of the fourteen mandatory Principal Adverse Impact indicators
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaiIndicator {
    pub number: u8,
    pub name: String,
    pub value: String,
    pub status: PaiStatus,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceOverallStatus {
    Compliant,
    NeedsAttention,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceStatusResponse {
    pub portfolio_id: String,
    pub sfdr_classification: SfdrClassification,
    /// Taxonomy-eligible share of current portfolio value, 0-100
    #[serde(with = "decimal_serde")]
    pub eligible_pct: Decimal,
    /// Taxonomy-aligned (sustainable) share of current portfolio value, 0-100
    #[serde(with = "decimal_serde")]
    pub sustainable_pct: Decimal,
    pub overall_status: ComplianceOverallStatus,
    pub holdings: Vec<TaxonomyResult>,
    pub pai_indicators: Vec<PaiIndicator>,
    pub as_of: DateTime<Utc>,
}
