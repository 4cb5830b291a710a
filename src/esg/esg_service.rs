use std::sync::Arc;

use crate::constants::{
    DEFAULT_BOARD_INDEPENDENCE_SCORE, DEFAULT_BUSINESS_ETHICS_SCORE, DEFAULT_CARBON_FOOTPRINT_SCORE,
    DEFAULT_COMMUNITY_IMPACT_SCORE, DEFAULT_ENERGY_EFFICIENCY_SCORE, DEFAULT_HEALTH_SAFETY_SCORE,
    DEFAULT_JOBS_IMPACT_SCORE, DEFAULT_LABOR_PRACTICES_SCORE, DEFAULT_REGULATORY_COMPLIANCE_SCORE,
    DEFAULT_TRANSPARENCY_SCORE, DEFAULT_WASTE_MANAGEMENT_SCORE, DEFAULT_WATER_USAGE_SCORE,
    ESG_ENVIRONMENT_WEIGHT, ESG_GOVERNANCE_WEIGHT, ESG_SOCIAL_WEIGHT,
};
use crate::esg::esg_model::{EsgDimension, EsgExtractedData, EsgScoreResponse, EsgSubScore};
use crate::projects::{Project, SignalScores};
use crate::rules::RegulatoryTables;

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Weighted rule-based ESG scorer for a single project. Missing extracted
/// data never faults; every sub-score has an explicit neutral baseline.
pub struct EsgScoringEngine {
    tables: Arc<RegulatoryTables>,
}

impl EsgScoringEngine {
    pub fn new(tables: Arc<RegulatoryTables>) -> Self {
        EsgScoringEngine { tables }
    }

    pub fn score_esg(
        &self,
        project: &Project,
        signal_scores: Option<&SignalScores>,
        extracted: Option<&EsgExtractedData>,
    ) -> EsgScoreResponse {
        let default_extracted = EsgExtractedData::default();
        let extracted = extracted.unwrap_or(&default_extracted);

        let environment = Self::dimension(vec![
            EsgSubScore {
                name: "carbon_footprint".to_string(),
                score: self
                    .tables
                    .carbon_footprint_scores
                    .get(&project.project_type)
                    .copied()
                    .unwrap_or(DEFAULT_CARBON_FOOTPRINT_SCORE),
            },
            EsgSubScore {
                name: "energy_efficiency".to_string(),
                score: signal_scores
                    .and_then(|s| s.technical)
                    .map(|technical| (technical * 1.2).min(100.0))
                    .unwrap_or(DEFAULT_ENERGY_EFFICIENCY_SCORE),
            },
            EsgSubScore {
                name: "waste_management".to_string(),
                score: extracted
                    .waste_management
                    .unwrap_or(DEFAULT_WASTE_MANAGEMENT_SCORE),
            },
            EsgSubScore {
                name: "water_usage".to_string(),
                score: extracted.water_usage.unwrap_or(DEFAULT_WATER_USAGE_SCORE),
            },
        ]);

        let social = Self::dimension(vec![
            EsgSubScore {
                name: "jobs_created".to_string(),
                score: project
                    .jobs_created
                    .map(|jobs| (jobs * 2.0).min(100.0))
                    .unwrap_or(DEFAULT_JOBS_IMPACT_SCORE),
            },
            EsgSubScore {
                name: "community_impact".to_string(),
                score: extracted
                    .community_impact
                    .unwrap_or(DEFAULT_COMMUNITY_IMPACT_SCORE),
            },
            EsgSubScore {
                name: "labor_practices".to_string(),
                score: extracted
                    .labor_practices
                    .unwrap_or(DEFAULT_LABOR_PRACTICES_SCORE),
            },
            EsgSubScore {
                name: "health_safety".to_string(),
                score: extracted
                    .health_safety
                    .unwrap_or(DEFAULT_HEALTH_SAFETY_SCORE),
            },
        ]);

        let governance = Self::dimension(vec![
            EsgSubScore {
                name: "board_independence".to_string(),
                score: extracted
                    .board_independence
                    .unwrap_or(DEFAULT_BOARD_INDEPENDENCE_SCORE),
            },
            EsgSubScore {
                name: "transparency".to_string(),
                score: extracted.transparency.unwrap_or(DEFAULT_TRANSPARENCY_SCORE),
            },
            EsgSubScore {
                name: "business_ethics".to_string(),
                score: extracted
                    .business_ethics
                    .unwrap_or(DEFAULT_BUSINESS_ETHICS_SCORE),
            },
            EsgSubScore {
                name: "regulatory_compliance".to_string(),
                score: extracted
                    .regulatory_compliance
                    .unwrap_or(DEFAULT_REGULATORY_COMPLIANCE_SCORE),
            },
        ]);

        let overall_score = round_one_decimal(
            environment.score * ESG_ENVIRONMENT_WEIGHT
                + social.score * ESG_SOCIAL_WEIGHT
                + governance.score * ESG_GOVERNANCE_WEIGHT,
        );

        EsgScoreResponse {
            project_id: project.id.clone(),
            environment,
            social,
            governance,
            overall_score,
        }
    }

    /// Unweighted mean of the group's sub-scores, one decimal
    fn dimension(sub_scores: Vec<EsgSubScore>) -> EsgDimension {
        let score = round_one_decimal(
            sub_scores.iter().map(|s| s.score).sum::<f64>() / sub_scores.len() as f64,
        );
        EsgDimension { score, sub_scores }
    }
}
