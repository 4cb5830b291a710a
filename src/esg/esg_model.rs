use serde::{Deserialize, Serialize};

/// ESG sub-scores extracted upstream from project documentation. Every field
/// is optional; the scorer substitutes its neutral baseline for anything
/// missing.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct EsgExtractedData {
    pub waste_management: Option<f64>,
    pub water_usage: Option<f64>,
    pub community_impact: Option<f64>,
    pub labor_practices: Option<f64>,
    pub health_safety: Option<f64>,
    pub board_independence: Option<f64>,
    pub transparency: Option<f64>,
    pub business_ethics: Option<f64>,
    pub regulatory_compliance: Option<f64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EsgSubScore {
    pub name: String,
    pub score: f64,
}

/// One dimension group: the unweighted mean of its four named sub-scores
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EsgDimension {
    pub score: f64,
    pub sub_scores: Vec<EsgSubScore>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EsgScoreResponse {
    pub project_id: String,
    pub environment: EsgDimension,
    pub social: EsgDimension,
    pub governance: EsgDimension,
    /// Environment x0.4 + Social x0.3 + Governance x0.3, one decimal
    pub overall_score: f64,
}
