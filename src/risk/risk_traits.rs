use async_trait::async_trait;

use crate::errors::Result;
use crate::risk::risk_model::{MonitoringAlert, NewMonitoringAlert, RiskAssessment};

/// Trait for risk assessment lookup operations
#[async_trait]
pub trait RiskAssessmentRepositoryTrait: Send + Sync {
    /// The stored five-domain assessment for a portfolio, when one exists.
    async fn get_five_domain_assessment(
        &self,
        portfolio_id: &str,
    ) -> Result<Option<RiskAssessment>>;

    /// All stored assessments for a portfolio (legacy single-dimension shape).
    async fn get_assessments_for_portfolio(
        &self,
        portfolio_id: &str,
    ) -> Result<Vec<RiskAssessment>>;

    /// Count of unresolved monitoring alerts, maintained by the alerting
    /// collaborator. Always freshly queried.
    async fn count_active_alerts(&self, portfolio_id: &str) -> Result<i64>;
}

/// Append-only sink for monitoring alerts. The single side-effecting seam of
/// the engine; everything else is pure computation over fetched snapshots.
#[async_trait]
pub trait AlertWriterTrait: Send + Sync {
    async fn append_alert(&self, alert: NewMonitoringAlert) -> Result<MonitoringAlert>;
}
