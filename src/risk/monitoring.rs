use log::{info, warn};
use std::sync::Arc;

use crate::constants::DOMAIN_LEVEL_CRITICAL;
use crate::errors::Result;
use crate::portfolio::PortfolioRepositoryTrait;
use crate::risk::five_domain::FiveDomainResolver;
use crate::risk::risk_model::{MonitoringAlert, NewMonitoringAlert};
use crate::risk::risk_traits::{AlertWriterTrait, RiskAssessmentRepositoryTrait};
use crate::rules::RegulatoryTables;

/// Threshold-check flow: the only side-effecting path in the engine. Appends
/// one alert per critical domain; repeated runs are not deduplicated.
pub struct MonitoringService {
    portfolio_repository: Arc<dyn PortfolioRepositoryTrait>,
    assessment_repository: Arc<dyn RiskAssessmentRepositoryTrait>,
    alert_writer: Arc<dyn AlertWriterTrait>,
    resolver: FiveDomainResolver,
}

impl MonitoringService {
    pub fn new(
        portfolio_repository: Arc<dyn PortfolioRepositoryTrait>,
        assessment_repository: Arc<dyn RiskAssessmentRepositoryTrait>,
        alert_writer: Arc<dyn AlertWriterTrait>,
        tables: Arc<RegulatoryTables>,
    ) -> Self {
        MonitoringService {
            portfolio_repository,
            assessment_repository,
            alert_writer,
            resolver: FiveDomainResolver::new(tables),
        }
    }

    pub async fn run_threshold_check(
        &self,
        portfolio_id: &str,
        org_id: &str,
    ) -> Result<Vec<MonitoringAlert>> {
        let portfolio = self
            .portfolio_repository
            .get_portfolio(portfolio_id, org_id)
            .await?;

        let stored = self
            .assessment_repository
            .get_five_domain_assessment(&portfolio.id)
            .await?;
        let monitoring_enabled = stored.as_ref().map(|a| a.monitoring_enabled).unwrap_or(false);
        if !monitoring_enabled {
            info!(
                "Monitoring disabled for portfolio {}, skipping threshold check",
                portfolio.id
            );
            return Ok(Vec::new());
        }

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
        let scorecard =
            self.resolver
                .resolve(&portfolio.id, stored.as_ref(), &legacy, active_alerts_count);

        let mut created = Vec::new();
        for entry in &scorecard.domains {
            let score = match entry.score {
                Some(s) if s >= DOMAIN_LEVEL_CRITICAL => s,
                _ => continue,
            };
            warn!(
                "Portfolio {} breached critical threshold in {} domain ({})",
                portfolio.id,
                entry.domain.as_str(),
                score
            );
            let alert = self
                .alert_writer
                .append_alert(NewMonitoringAlert {
                    portfolio_id: portfolio.id.clone(),
                    domain: entry.domain,
                    message: format!(
                        "{} risk score {} is at or above the critical threshold",
                        entry.domain.as_str(),
                        score
                    ),
                    score,
                })
                .await?;
            created.push(alert);
        }

        Ok(created)
    }
}
