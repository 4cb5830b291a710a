use chrono::Utc;
use log::debug;
use std::collections::HashMap;
use std::sync::Arc;

use crate::errors::Result;
use crate::portfolio::PortfolioRepositoryTrait;
use crate::risk::risk_model::{
    DomainScorecardEntry, FiveDomainRiskResponse, RiskAssessment, RiskDomain, RiskLevel,
    ScoreSource,
};
use crate::risk::risk_traits::RiskAssessmentRepositoryTrait;
use crate::rules::RegulatoryTables;

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Reconciles the five-domain scorecard: a stored assessment wins outright;
/// otherwise an equivalent card is computed from legacy single-dimension
/// findings. The branch taken is carried to the caller via `source`.
pub struct FiveDomainResolver {
    tables: Arc<RegulatoryTables>,
}

impl FiveDomainResolver {
    pub fn new(tables: Arc<RegulatoryTables>) -> Self {
        FiveDomainResolver { tables }
    }

    pub fn resolve(
        &self,
        portfolio_id: &str,
        stored: Option<&RiskAssessment>,
        legacy: &[RiskAssessment],
        active_alerts_count: i64,
    ) -> FiveDomainRiskResponse {
        match stored.and_then(|a| a.domain_scores.as_ref()) {
            Some(scores) => {
                let domains: Vec<DomainScorecardEntry> = RiskDomain::ALL
                    .iter()
                    .map(|&domain| {
                        let entry = scores.get(domain);
                        DomainScorecardEntry {
                            domain,
                            score: Some(entry.score),
                            level: RiskLevel::from_score(Some(entry.score)),
                            mitigation: entry.mitigation.clone(),
                        }
                    })
                    .collect();
                let overall = round_one_decimal(
                    domains.iter().filter_map(|d| d.score).sum::<f64>() / domains.len() as f64,
                );

                FiveDomainRiskResponse {
                    portfolio_id: portfolio_id.to_string(),
                    source: ScoreSource::Stored,
                    overall_level: RiskLevel::from_score(Some(overall)),
                    overall_score: Some(overall),
                    domains,
                    active_alerts_count,
                    as_of: Utc::now(),
                }
            }
            None => self.compute_from_legacy(portfolio_id, legacy, active_alerts_count),
        }
    }

    /// Fallback: map each legacy finding's free-form risk type onto a domain
    /// and keep the maximum severity weight seen per domain.
    fn compute_from_legacy(
        &self,
        portfolio_id: &str,
        legacy: &[RiskAssessment],
        active_alerts_count: i64,
    ) -> FiveDomainRiskResponse {
        let mut max_by_domain: HashMap<RiskDomain, f64> = HashMap::new();

        for assessment in legacy {
            let (risk_type, severity) = match (&assessment.risk_type, assessment.severity) {
                (Some(rt), Some(sev)) => (rt, sev),
                _ => continue,
            };
            match self.tables.risk_domain_map.get(&risk_type.to_lowercase()) {
                Some(&domain) => {
                    let weight = severity.weight();
                    max_by_domain
                        .entry(domain)
                        .and_modify(|w| *w = w.max(weight))
                        .or_insert(weight);
                }
                None => {
                    debug!(
                        "Legacy risk type '{}' has no domain mapping, skipping",
                        risk_type
                    );
                }
            }
        }

        let domains: Vec<DomainScorecardEntry> = RiskDomain::ALL
            .iter()
            .map(|&domain| {
                let score = max_by_domain.get(&domain).copied();
                DomainScorecardEntry {
                    domain,
                    score,
                    level: RiskLevel::from_score(score),
                    mitigation: score
                        .and(self.tables.domain_mitigations.get(&domain).cloned()),
                }
            })
            .collect();

        let contributing: Vec<f64> = domains.iter().filter_map(|d| d.score).collect();
        let overall_score = if contributing.is_empty() {
            None
        } else {
            Some(round_one_decimal(
                contributing.iter().sum::<f64>() / contributing.len() as f64,
            ))
        };

        FiveDomainRiskResponse {
            portfolio_id: portfolio_id.to_string(),
            source: ScoreSource::Computed,
            overall_level: RiskLevel::from_score(overall_score),
            overall_score,
            domains,
            active_alerts_count,
            as_of: Utc::now(),
        }
    }
}

pub struct FiveDomainService {
    portfolio_repository: Arc<dyn PortfolioRepositoryTrait>,
    assessment_repository: Arc<dyn RiskAssessmentRepositoryTrait>,
    resolver: FiveDomainResolver,
}

impl FiveDomainService {
    pub fn new(
        portfolio_repository: Arc<dyn PortfolioRepositoryTrait>,
        assessment_repository: Arc<dyn RiskAssessmentRepositoryTrait>,
        tables: Arc<RegulatoryTables>,
    ) -> Self {
        FiveDomainService {
            portfolio_repository,
            assessment_repository,
            resolver: FiveDomainResolver::new(tables),
        }
    }

    pub async fn get_five_domain_scores(
        &self,
        portfolio_id: &str,
        org_id: &str,
    ) -> Result<FiveDomainRiskResponse> {
        let portfolio = self
            .portfolio_repository
            .get_portfolio(portfolio_id, org_id)
            .await?;

        let stored = self
            .assessment_repository
            .get_five_domain_assessment(&portfolio.id)
            .await?;
        let legacy = match stored.as_ref().and_then(|a| a.domain_scores.as_ref()) {
            Some(_) => Vec::new(),
            None => {
                self.assessment_repository
                    .get_assessments_for_portfolio(&portfolio.id)
                    .await?
            }
        };
        let active_alerts_count = self
            .assessment_repository
            .count_active_alerts(&portfolio.id)
            .await?;

        Ok(self
            .resolver
            .resolve(&portfolio.id, stored.as_ref(), &legacy, active_alerts_count))
    }
}
