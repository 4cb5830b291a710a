pub mod five_domain;
pub mod monitoring;
pub mod risk_mapper;
pub mod risk_model;
pub mod risk_service;
pub mod risk_traits;

pub use five_domain::{FiveDomainResolver, FiveDomainService};
pub use monitoring::MonitoringService;
pub use risk_mapper::RiskMapper;
pub use risk_model::{
    AssessmentEntityType, AutoRiskFinding, DomainScorecardEntry, DomainScores,
    FiveDomainRiskResponse, MonitoringAlert, NewMonitoringAlert, Probability, RankedRisk,
    RiskAssessment, RiskDashboardResponse, RiskDomain, RiskLevel, RiskTrendPoint, RiskType,
    ScoreSource, Severity, SeverityCounts, StoredDomainScore,
};
pub use risk_service::RiskService;
pub use risk_traits::{AlertWriterTrait, RiskAssessmentRepositoryTrait};

#[cfg(test)]
mod tests;
