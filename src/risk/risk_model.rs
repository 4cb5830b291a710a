use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::concentration::ConcentrationAnalysis;
use crate::constants::{
    DOMAIN_LEVEL_CRITICAL, DOMAIN_LEVEL_HIGH, DOMAIN_LEVEL_MEDIUM, SEVERITY_WEIGHT_CRITICAL,
    SEVERITY_WEIGHT_HIGH, SEVERITY_WEIGHT_LOW, SEVERITY_WEIGHT_MEDIUM,
};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }

    /// Numeric weight used for domain scoring and dashboard ranking.
    pub fn weight(&self) -> f64 {
        match self {
            Severity::Low => SEVERITY_WEIGHT_LOW,
            Severity::Medium => SEVERITY_WEIGHT_MEDIUM,
            Severity::High => SEVERITY_WEIGHT_HIGH,
            Severity::Critical => SEVERITY_WEIGHT_CRITICAL,
        }
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            "critical" => Ok(Severity::Critical),
            _ => Err(format!("Unknown severity: {}", s)),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Probability {
    Unlikely,
    Possible,
    Likely,
}

impl Probability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Probability::Unlikely => "unlikely",
            Probability::Possible => "possible",
            Probability::Likely => "likely",
        }
    }

    pub fn weight(&self) -> f64 {
        match self {
            Probability::Unlikely => 1.0,
            Probability::Possible => 2.0,
            Probability::Likely => 3.0,
        }
    }
}

/// Risk categories emitted by the composition rule set
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RiskType {
    Sector,
    Geography,
    Currency,
    Liquidity,
    Climate,
    Regulatory,
    Counterparty,
}

impl RiskType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskType::Sector => "sector",
            RiskType::Geography => "geography",
            RiskType::Currency => "currency",
            RiskType::Liquidity => "liquidity",
            RiskType::Climate => "climate",
            RiskType::Regulatory => "regulatory",
            RiskType::Counterparty => "counterparty",
        }
    }
}

/// The five risk domains of the scorecard
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RiskDomain {
    Market,
    Climate,
    Regulatory,
    Technology,
    Liquidity,
}

impl RiskDomain {
    pub const ALL: [RiskDomain; 5] = [
        RiskDomain::Market,
        RiskDomain::Climate,
        RiskDomain::Regulatory,
        RiskDomain::Technology,
        RiskDomain::Liquidity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskDomain::Market => "market",
            RiskDomain::Climate => "climate",
            RiskDomain::Regulatory => "regulatory",
            RiskDomain::Technology => "technology",
            RiskDomain::Liquidity => "liquidity",
        }
    }
}

/// Bucket label attached to a domain score
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
    Unknown,
}

impl RiskLevel {
    /// Fixed bucket thresholds: >=75 critical, >=50 high, >=25 medium, else low.
    pub fn from_score(score: Option<f64>) -> Self {
        match score {
            Some(s) if s >= DOMAIN_LEVEL_CRITICAL => RiskLevel::Critical,
            Some(s) if s >= DOMAIN_LEVEL_HIGH => RiskLevel::High,
            Some(s) if s >= DOMAIN_LEVEL_MEDIUM => RiskLevel::Medium,
            Some(_) => RiskLevel::Low,
            None => RiskLevel::Unknown,
        }
    }
}

/// An auto-identified risk finding. Ephemeral: recomputed fresh on every
/// invocation, never persisted.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AutoRiskFinding {
    pub risk_type: RiskType,
    pub severity: Severity,
    pub probability: Probability,
    pub description: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentEntityType {
    Portfolio,
    Project,
}

/// Stored per-domain score with its free-text mitigation
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct StoredDomainScore {
    pub score: f64,
    pub mitigation: Option<String>,
}

/// The five stored numeric domain scores (0-100)
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DomainScores {
    pub market: StoredDomainScore,
    pub climate: StoredDomainScore,
    pub regulatory: StoredDomainScore,
    pub technology: StoredDomainScore,
    pub liquidity: StoredDomainScore,
}

impl DomainScores {
    pub fn get(&self, domain: RiskDomain) -> &StoredDomainScore {
        match domain {
            RiskDomain::Market => &self.market,
            RiskDomain::Climate => &self.climate,
            RiskDomain::Regulatory => &self.regulatory,
            RiskDomain::Technology => &self.technology,
            RiskDomain::Liquidity => &self.liquidity,
        }
    }
}

/// A stored risk assessment: either a legacy single-dimension classification
/// (`risk_type`/`severity`/`probability`) or a five-domain record
/// (`domain_scores`). `active_alerts_count` is maintained by the alerting
/// collaborator and read-only here.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub id: String,
    pub entity_type: AssessmentEntityType,
    pub entity_id: String,
    pub risk_type: Option<String>,
    pub severity: Option<Severity>,
    pub probability: Option<Probability>,
    pub description: Option<String>,
    pub domain_scores: Option<DomainScores>,
    pub monitoring_enabled: bool,
    pub active_alerts_count: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MonitoringAlert {
    pub id: String,
    pub portfolio_id: String,
    pub domain: RiskDomain,
    pub message: String,
    pub score: f64,
    pub resolved: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewMonitoringAlert {
    pub portfolio_id: String,
    pub domain: RiskDomain,
    pub message: String,
    pub score: f64,
}

/// Where a scorecard came from: a stored five-domain assessment or a fallback
/// computed from legacy findings. Carried through to the caller.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScoreSource {
    Stored,
    Computed,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DomainScorecardEntry {
    pub domain: RiskDomain,
    pub score: Option<f64>,
    pub level: RiskLevel,
    pub mitigation: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FiveDomainRiskResponse {
    pub portfolio_id: String,
    pub source: ScoreSource,
    pub domains: Vec<DomainScorecardEntry>,
    pub overall_score: Option<f64>,
    pub overall_level: RiskLevel,
    pub active_alerts_count: i64,
    pub as_of: DateTime<Utc>,
}

/// One row of the dashboard risk list, from either the rule engine or a
/// stored manual assessment.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RankedRisk {
    pub risk_type: String,
    pub severity: Severity,
    pub probability: Option<Probability>,
    pub description: String,
    pub auto_identified: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SeverityCounts {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    pub critical: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RiskTrendPoint {
    /// Calendar month, `YYYY-MM`
    pub period: String,
    pub score: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RiskDashboardResponse {
    pub portfolio_id: String,
    pub overall_risk_score: Option<f64>,
    pub severity_counts: SeverityCounts,
    pub risks: Vec<RankedRisk>,
    pub top_risks: Vec<RankedRisk>,
    pub concentration: ConcentrationAnalysis,
    pub trend: Vec<RiskTrendPoint>,
    pub as_of: DateTime<Utc>,
}
