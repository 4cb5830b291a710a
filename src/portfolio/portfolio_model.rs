use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::utils::decimal_serde::{decimal_serde, decimal_serde_option};

/// SFDR classification of a fund. Immutable input to the compliance
/// thresholds; never recomputed by this engine.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SfdrClassification {
    NotApplicable,
    Article6,
    Article8,
    Article9,
}

impl SfdrClassification {
    pub fn as_str(&self) -> &'static str {
        match self {
            SfdrClassification::NotApplicable => "not_applicable",
            SfdrClassification::Article6 => "article_6",
            SfdrClassification::Article8 => "article_8",
            SfdrClassification::Article9 => "article_9",
        }
    }
}

impl FromStr for SfdrClassification {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not_applicable" => Ok(SfdrClassification::NotApplicable),
            "article_6" => Ok(SfdrClassification::Article6),
            "article_8" => Ok(SfdrClassification::Article8),
            "article_9" => Ok(SfdrClassification::Article9),
            _ => Err(format!("Unknown SFDR classification: {}", s)),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub id: String,
    pub org_id: String,
    pub name: String,
    pub sfdr_classification: SfdrClassification,
    pub strategy: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AssetType {
    Equity,
    Debt,
    ProjectFinance,
    Infrastructure,
    Other,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HoldingStatus {
    Active,
    Exited,
    WrittenOff,
}

/// A position in one underlying asset. Only `Active` holdings participate in
/// risk, scenario and taxonomy computation; repositories filter on fetch.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub id: String,
    pub portfolio_id: String,
    pub asset_name: String,
    pub asset_type: AssetType,
    pub currency: String,
    #[serde(with = "decimal_serde")]
    pub investment_amount: Decimal,
    #[serde(with = "decimal_serde")]
    pub current_value: Decimal,
    pub project_id: Option<String>,
    pub status: HoldingStatus,
}

/// Latest computed fund-level return metrics, consumed as the stress baseline
/// by the scenario engine. Produced elsewhere; read-only here.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FundMetricsSnapshot {
    pub portfolio_id: String,
    #[serde(with = "decimal_serde_option")]
    pub net_irr: Option<Decimal>,
    #[serde(with = "decimal_serde_option")]
    pub tvpi: Option<Decimal>,
    #[serde(with = "decimal_serde_option")]
    pub dpi: Option<Decimal>,
    pub as_of: DateTime<Utc>,
}
