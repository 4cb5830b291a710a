use chrono::{Datelike, Utc};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::concentration::ConcentrationAnalyzer;
use crate::constants::TOP_RISKS_LIMIT;
use crate::errors::Result;
use crate::portfolio::{HoldingsRepositoryTrait, PortfolioRepositoryTrait};
use crate::projects::ProjectRepositoryTrait;
use crate::risk::risk_mapper::RiskMapper;
use crate::risk::risk_model::{
    RankedRisk, RiskAssessment, RiskDashboardResponse, RiskTrendPoint, SeverityCounts,
};
use crate::risk::risk_traits::RiskAssessmentRepositoryTrait;
use crate::rules::RegulatoryTables;

/// Top-level orchestrator: composes the concentration analyzer, the rule
/// engine and stored assessments into one aggregate dashboard view.
pub struct RiskService {
    portfolio_repository: Arc<dyn PortfolioRepositoryTrait>,
    holdings_repository: Arc<dyn HoldingsRepositoryTrait>,
    project_repository: Arc<dyn ProjectRepositoryTrait>,
    assessment_repository: Arc<dyn RiskAssessmentRepositoryTrait>,
    mapper: RiskMapper,
}

impl RiskService {
    pub fn new(
        portfolio_repository: Arc<dyn PortfolioRepositoryTrait>,
        holdings_repository: Arc<dyn HoldingsRepositoryTrait>,
        project_repository: Arc<dyn ProjectRepositoryTrait>,
        assessment_repository: Arc<dyn RiskAssessmentRepositoryTrait>,
        tables: Arc<RegulatoryTables>,
    ) -> Self {
        RiskService {
            portfolio_repository,
            holdings_repository,
            project_repository,
            assessment_repository,
            mapper: RiskMapper::new(tables),
        }
    }

    pub async fn get_risk_dashboard(
        &self,
        portfolio_id: &str,
        org_id: &str,
    ) -> Result<RiskDashboardResponse> {
        let portfolio = self
            .portfolio_repository
            .get_portfolio(portfolio_id, org_id)
            .await?;
        let holdings = self
            .holdings_repository
            .get_active_holdings(&portfolio.id)
            .await?;

        let project_ids: Vec<String> = holdings
            .iter()
            .filter_map(|h| h.project_id.clone())
            .collect();
        let projects_by_id = self
            .project_repository
            .get_projects_by_ids(&project_ids)
            .await?;

        let assessments = self
            .assessment_repository
            .get_assessments_for_portfolio(&portfolio.id)
            .await?;

        let mut risks: Vec<RankedRisk> = self
            .mapper
            .identify_risks(&holdings, &projects_by_id)
            .into_iter()
            .map(|finding| RankedRisk {
                risk_type: finding.risk_type.as_str().to_string(),
                severity: finding.severity,
                probability: Some(finding.probability),
                description: finding.description,
                auto_identified: true,
            })
            .collect();
        risks.extend(Self::stored_risks(&assessments));

        let severity_counts = Self::count_severities(&risks);
        let overall_risk_score = Self::mean_severity_weight(&risks);
        let top_risks = Self::rank_top(&risks);
        let trend = Self::build_trend(&assessments, overall_risk_score);

        let concentration = ConcentrationAnalyzer::analyze(&holdings, &projects_by_id);

        Ok(RiskDashboardResponse {
            portfolio_id: portfolio.id,
            overall_risk_score,
            severity_counts,
            risks,
            top_risks,
            concentration,
            trend,
            as_of: Utc::now(),
        })
    }

    fn stored_risks(assessments: &[RiskAssessment]) -> Vec<RankedRisk> {
        assessments
            .iter()
            .filter_map(|a| {
                let severity = a.severity?;
                Some(RankedRisk {
                    risk_type: a.risk_type.clone().unwrap_or_else(|| "other".to_string()),
                    severity,
                    probability: a.probability,
                    description: a
                        .description
                        .clone()
                        .unwrap_or_else(|| "Manually recorded risk".to_string()),
                    auto_identified: false,
                })
            })
            .collect()
    }

    fn count_severities(risks: &[RankedRisk]) -> SeverityCounts {
        use crate::risk::risk_model::Severity;
        let mut counts = SeverityCounts {
            low: 0,
            medium: 0,
            high: 0,
            critical: 0,
        };
        for risk in risks {
            match risk.severity {
                Severity::Low => counts.low += 1,
                Severity::Medium => counts.medium += 1,
                Severity::High => counts.high += 1,
                Severity::Critical => counts.critical += 1,
            }
        }
        counts
    }

    fn mean_severity_weight(risks: &[RankedRisk]) -> Option<f64> {
        if risks.is_empty() {
            return None;
        }
        let sum: f64 = risks.iter().map(|r| r.severity.weight()).sum();
        Some(((sum / risks.len() as f64) * 10.0).round() / 10.0)
    }

    /// Top risks ranked by severity weight, then probability weight. The sort
    /// is stable so ties keep emission order.
    fn rank_top(risks: &[RankedRisk]) -> Vec<RankedRisk> {
        let mut ranked = risks.to_vec();
        ranked.sort_by(|a, b| {
            b.severity
                .weight()
                .partial_cmp(&a.severity.weight())
                .unwrap_or(Ordering::Equal)
                .then_with(|| {
                    let pa = a.probability.map(|p| p.weight()).unwrap_or(0.0);
                    let pb = b.probability.map(|p| p.weight()).unwrap_or(0.0);
                    pb.partial_cmp(&pa).unwrap_or(Ordering::Equal)
                })
        });
        ranked.truncate(TOP_RISKS_LIMIT);
        ranked
    }

    /// Monthly trend from stored assessments (mean severity weight per month
    /// of record creation), with the live overall score as the current point.
    fn build_trend(
        assessments: &[RiskAssessment],
        current_score: Option<f64>,
    ) -> Vec<RiskTrendPoint> {
        let mut by_month: BTreeMap<String, Vec<f64>> = BTreeMap::new();
        for assessment in assessments {
            if let Some(severity) = assessment.severity {
                let period = format!(
                    "{:04}-{:02}",
                    assessment.created_at.year(),
                    assessment.created_at.month()
                );
                by_month.entry(period).or_default().push(severity.weight());
            }
        }

        let mut trend: BTreeMap<String, f64> = by_month
            .into_iter()
            .map(|(period, weights)| {
                let mean = weights.iter().sum::<f64>() / weights.len() as f64;
                (period, (mean * 10.0).round() / 10.0)
            })
            .collect();

        if let Some(score) = current_score {
            let now = Utc::now();
            trend.insert(format!("{:04}-{:02}", now.year(), now.month()), score);
        }

        trend
            .into_iter()
            .map(|(period, score)| RiskTrendPoint { period, score })
            .collect()
    }
}
