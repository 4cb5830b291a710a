use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::errors::{Error, Result};
use crate::portfolio::{
    AssetType, Holding, HoldingStatus, HoldingsRepositoryTrait, Portfolio,
    PortfolioRepositoryTrait, SfdrClassification,
};
use crate::projects::{Project, ProjectRepositoryTrait, ProjectType};
use crate::risk::five_domain::FiveDomainResolver;
use crate::risk::risk_mapper::RiskMapper;
use crate::risk::risk_model::*;
use crate::risk::risk_traits::{AlertWriterTrait, RiskAssessmentRepositoryTrait};
use crate::risk::{MonitoringService, RiskService};
use crate::rules::RegulatoryTables;

// --- Fixtures ---

fn holding(id: &str, amount: Decimal, currency: &str, project_id: Option<&str>) -> Holding {
    Holding {
        id: id.to_string(),
        portfolio_id: "pf-1".to_string(),
        asset_name: format!("Asset {}", id),
        asset_type: AssetType::ProjectFinance,
        currency: currency.to_string(),
        investment_amount: amount,
        current_value: amount,
        project_id: project_id.map(|p| p.to_string()),
        status: HoldingStatus::Active,
    }
}

fn project(id: &str, project_type: ProjectType, country: &str) -> Project {
    Project {
        id: id.to_string(),
        org_id: "org-1".to_string(),
        name: format!("Project {}", id),
        project_type,
        country: country.to_string(),
        jobs_created: None,
        signal_scores: None,
    }
}

fn projects_map(projects: Vec<Project>) -> HashMap<String, Project> {
    projects.into_iter().map(|p| (p.id.clone(), p)).collect()
}

fn legacy_assessment(id: &str, risk_type: &str, severity: Severity) -> RiskAssessment {
    RiskAssessment {
        id: id.to_string(),
        entity_type: AssessmentEntityType::Portfolio,
        entity_id: "pf-1".to_string(),
        risk_type: Some(risk_type.to_string()),
        severity: Some(severity),
        probability: Some(Probability::Possible),
        description: Some(format!("{} risk", risk_type)),
        domain_scores: None,
        monitoring_enabled: false,
        active_alerts_count: 0,
        created_at: Utc.with_ymd_and_hms(2026, 3, 15, 12, 0, 0).unwrap(),
    }
}

fn stored_assessment(monitoring_enabled: bool) -> RiskAssessment {
    let entry = |score: f64| StoredDomainScore {
        score,
        mitigation: Some("documented mitigation".to_string()),
    };
    RiskAssessment {
        id: "ra-stored".to_string(),
        entity_type: AssessmentEntityType::Portfolio,
        entity_id: "pf-1".to_string(),
        risk_type: None,
        severity: None,
        probability: None,
        description: None,
        domain_scores: Some(DomainScores {
            market: entry(80.0),
            climate: entry(40.0),
            regulatory: entry(55.0),
            technology: entry(10.0),
            liquidity: entry(65.0),
        }),
        monitoring_enabled,
        active_alerts_count: 2,
        created_at: Utc.with_ymd_and_hms(2026, 5, 1, 9, 0, 0).unwrap(),
    }
}

fn mapper() -> RiskMapper {
    RiskMapper::new(RegulatoryTables::standard())
}

fn count_type(findings: &[AutoRiskFinding], risk_type: RiskType) -> usize {
    findings.iter().filter(|f| f.risk_type == risk_type).count()
}

// --- Risk mapper ---

#[test]
fn empty_portfolio_emits_no_findings() {
    let findings = mapper().identify_risks(&[], &HashMap::new());
    assert!(findings.is_empty());
}

#[test]
fn sector_share_at_exactly_25_percent_does_not_trigger() {
    // renewable_generation at exactly 25%, energy_storage at 75%
    let holdings = vec![
        holding("h1", dec!(250), "USD", Some("p1")),
        holding("h2", dec!(750), "USD", Some("p2")),
    ];
    let projects = projects_map(vec![
        project("p1", ProjectType::Solar, "DE"),
        project("p2", ProjectType::Storage, "DE"),
    ]);

    let findings = mapper().identify_risks(&holdings, &projects);

    let sector_findings: Vec<&AutoRiskFinding> = findings
        .iter()
        .filter(|f| f.risk_type == RiskType::Sector)
        .collect();
    assert_eq!(sector_findings.len(), 1);
    assert!(sector_findings[0].description.contains("energy_storage"));
    assert_eq!(sector_findings[0].severity, Severity::High);
    assert_eq!(sector_findings[0].probability, Probability::Likely);
}

#[test]
fn currency_exposure_boundary_is_strict() {
    let projects = HashMap::new();

    let at_threshold = vec![
        holding("h1", dec!(900), "USD", None),
        holding("h2", dec!(100), "EUR", None),
    ];
    let findings = mapper().identify_risks(&at_threshold, &projects);
    assert_eq!(count_type(&findings, RiskType::Currency), 0);

    let over_threshold = vec![
        holding("h1", dec!(899), "USD", None),
        holding("h2", dec!(101), "EUR", None),
    ];
    let findings = mapper().identify_risks(&over_threshold, &projects);
    assert_eq!(count_type(&findings, RiskType::Currency), 1);
}

#[test]
fn liquidity_finding_fires_for_any_nonempty_portfolio() {
    let holdings = vec![holding("h1", dec!(100), "USD", None)];
    let findings = mapper().identify_risks(&holdings, &HashMap::new());

    let liquidity: Vec<&AutoRiskFinding> = findings
        .iter()
        .filter(|f| f.risk_type == RiskType::Liquidity)
        .collect();
    assert_eq!(liquidity.len(), 1);
    assert_eq!(liquidity[0].severity, Severity::Medium);
    assert_eq!(liquidity[0].probability, Probability::Likely);
}

#[test]
fn high_scrutiny_jurisdiction_triggers_regulatory_finding() {
    let holdings = vec![
        holding("h1", dec!(900), "USD", Some("p1")),
        holding("h2", dec!(100), "USD", Some("p2")),
    ];
    let projects = projects_map(vec![
        project("p1", ProjectType::Solar, "DE"),
        project("p2", ProjectType::Wind, "RU"),
    ]);

    let findings = mapper().identify_risks(&holdings, &projects);
    assert_eq!(count_type(&findings, RiskType::Regulatory), 1);
}

#[test]
fn concentrated_single_sector_portfolio_example() {
    // Three active holdings of 5M/3M/2M, same sector, same country
    let holdings = vec![
        holding("h1", dec!(5_000_000), "USD", Some("p1")),
        holding("h2", dec!(3_000_000), "USD", Some("p2")),
        holding("h3", dec!(2_000_000), "USD", Some("p3")),
    ];
    let projects = projects_map(vec![
        project("p1", ProjectType::Solar, "DE"),
        project("p2", ProjectType::Wind, "DE"),
        project("p3", ProjectType::Hydro, "DE"),
    ]);

    let findings = mapper().identify_risks(&holdings, &projects);

    assert_eq!(count_type(&findings, RiskType::Sector), 1);
    assert_eq!(count_type(&findings, RiskType::Geography), 1);
    assert_eq!(count_type(&findings, RiskType::Liquidity), 1);
    // Solar/wind/hydro all carry elevated physical climate risk
    assert_eq!(count_type(&findings, RiskType::Climate), 1);
    // p1 at 50% and p2 at 30% both breach the counterparty threshold
    assert_eq!(count_type(&findings, RiskType::Counterparty), 2);
    assert_eq!(count_type(&findings, RiskType::Currency), 0);
    assert_eq!(count_type(&findings, RiskType::Regulatory), 0);

    let sector = findings
        .iter()
        .find(|f| f.risk_type == RiskType::Sector)
        .unwrap();
    assert_eq!(sector.severity, Severity::High);
    assert!(sector.description.contains("100"));
}

// --- Risk level buckets ---

#[test]
fn risk_level_bucket_thresholds() {
    assert_eq!(RiskLevel::from_score(Some(90.0)), RiskLevel::Critical);
    assert_eq!(RiskLevel::from_score(Some(75.0)), RiskLevel::Critical);
    assert_eq!(RiskLevel::from_score(Some(74.9)), RiskLevel::High);
    assert_eq!(RiskLevel::from_score(Some(50.0)), RiskLevel::High);
    assert_eq!(RiskLevel::from_score(Some(49.9)), RiskLevel::Medium);
    assert_eq!(RiskLevel::from_score(Some(25.0)), RiskLevel::Medium);
    assert_eq!(RiskLevel::from_score(Some(24.9)), RiskLevel::Low);
    assert_eq!(RiskLevel::from_score(None), RiskLevel::Unknown);
}

// --- Five-domain resolver ---

#[test]
fn stored_assessment_wins_and_keeps_its_mitigations() {
    let resolver = FiveDomainResolver::new(RegulatoryTables::standard());
    let stored = stored_assessment(false);

    let response = resolver.resolve("pf-1", Some(&stored), &[], 2);

    assert_eq!(response.source, ScoreSource::Stored);
    assert_eq!(response.active_alerts_count, 2);
    assert_eq!(response.domains.len(), 5);
    // (80 + 40 + 55 + 10 + 65) / 5
    assert_eq!(response.overall_score, Some(50.0));
    assert_eq!(response.overall_level, RiskLevel::High);

    let market = &response.domains[0];
    assert_eq!(market.domain, RiskDomain::Market);
    assert_eq!(market.score, Some(80.0));
    assert_eq!(market.level, RiskLevel::Critical);
    assert_eq!(market.mitigation.as_deref(), Some("documented mitigation"));
}

#[test]
fn computed_branch_takes_max_severity_per_domain() {
    let resolver = FiveDomainResolver::new(RegulatoryTables::standard());
    let legacy = vec![
        legacy_assessment("ra-1", "market", Severity::High),
        legacy_assessment("ra-2", "concentration", Severity::Medium),
        legacy_assessment("ra-3", "climate", Severity::Critical),
    ];

    let response = resolver.resolve("pf-1", None, &legacy, 0);

    assert_eq!(response.source, ScoreSource::Computed);

    let by_domain: HashMap<RiskDomain, &DomainScorecardEntry> =
        response.domains.iter().map(|d| (d.domain, d)).collect();

    // market keeps the high weight (60), not the medium one (35)
    assert_eq!(by_domain[&RiskDomain::Market].score, Some(60.0));
    assert_eq!(by_domain[&RiskDomain::Climate].score, Some(85.0));
    assert_eq!(by_domain[&RiskDomain::Climate].level, RiskLevel::Critical);

    // domains without contributing findings stay unknown
    assert_eq!(by_domain[&RiskDomain::Technology].score, None);
    assert_eq!(by_domain[&RiskDomain::Technology].level, RiskLevel::Unknown);
    assert_eq!(by_domain[&RiskDomain::Technology].mitigation, None);

    // overall = mean of contributing domains only
    assert_eq!(response.overall_score, Some(72.5));
}

#[test]
fn computed_branch_with_no_findings_reports_no_overall() {
    let resolver = FiveDomainResolver::new(RegulatoryTables::standard());
    let legacy = vec![legacy_assessment("ra-1", "astrological", Severity::High)];

    let response = resolver.resolve("pf-1", None, &legacy, 0);

    assert_eq!(response.source, ScoreSource::Computed);
    assert_eq!(response.overall_score, None);
    assert_eq!(response.overall_level, RiskLevel::Unknown);
    assert!(response.domains.iter().all(|d| d.score.is_none()));
}

// --- Mock repositories ---

struct MockPortfolioRepository {
    portfolio: Portfolio,
}

#[async_trait]
impl PortfolioRepositoryTrait for MockPortfolioRepository {
    async fn get_portfolio(&self, portfolio_id: &str, org_id: &str) -> Result<Portfolio> {
        if portfolio_id == self.portfolio.id && org_id == self.portfolio.org_id {
            Ok(self.portfolio.clone())
        } else {
            Err(Error::NotFound(format!("portfolio {}", portfolio_id)))
        }
    }
}

struct MockHoldingsRepository {
    holdings: Vec<Holding>,
}

#[async_trait]
impl HoldingsRepositoryTrait for MockHoldingsRepository {
    async fn get_active_holdings(&self, _portfolio_id: &str) -> Result<Vec<Holding>> {
        Ok(self.holdings.clone())
    }
}

struct MockProjectRepository {
    projects: HashMap<String, Project>,
}

#[async_trait]
impl ProjectRepositoryTrait for MockProjectRepository {
    async fn get_projects_by_ids(&self, ids: &[String]) -> Result<HashMap<String, Project>> {
        Ok(self
            .projects
            .iter()
            .filter(|(id, _)| ids.contains(id))
            .map(|(id, p)| (id.clone(), p.clone()))
            .collect())
    }
}

struct MockAssessmentRepository {
    stored: Option<RiskAssessment>,
    legacy: Vec<RiskAssessment>,
    active_alerts: i64,
}

#[async_trait]
impl RiskAssessmentRepositoryTrait for MockAssessmentRepository {
    async fn get_five_domain_assessment(
        &self,
        _portfolio_id: &str,
    ) -> Result<Option<RiskAssessment>> {
        Ok(self.stored.clone())
    }

    async fn get_assessments_for_portfolio(
        &self,
        _portfolio_id: &str,
    ) -> Result<Vec<RiskAssessment>> {
        Ok(self.legacy.clone())
    }

    async fn count_active_alerts(&self, _portfolio_id: &str) -> Result<i64> {
        Ok(self.active_alerts)
    }
}

#[derive(Default)]
struct MockAlertWriter {
    appended: Mutex<Vec<NewMonitoringAlert>>,
}

#[async_trait]
impl AlertWriterTrait for MockAlertWriter {
    async fn append_alert(&self, alert: NewMonitoringAlert) -> Result<MonitoringAlert> {
        let created = MonitoringAlert {
            id: uuid::Uuid::new_v4().to_string(),
            portfolio_id: alert.portfolio_id.clone(),
            domain: alert.domain,
            message: alert.message.clone(),
            score: alert.score,
            resolved: false,
            created_at: Utc::now(),
        };
        self.appended.lock().unwrap().push(alert);
        Ok(created)
    }
}

fn test_portfolio() -> Portfolio {
    Portfolio {
        id: "pf-1".to_string(),
        org_id: "org-1".to_string(),
        name: "Green Infra Fund I".to_string(),
        sfdr_classification: SfdrClassification::Article8,
        strategy: None,
    }
}

// --- Dashboard assembler ---

#[tokio::test]
async fn dashboard_composes_findings_and_ranks_top_risks() {
    let holdings = vec![
        holding("h1", dec!(5_000_000), "USD", Some("p1")),
        holding("h2", dec!(3_000_000), "USD", Some("p2")),
        holding("h3", dec!(2_000_000), "USD", Some("p3")),
    ];
    let projects = projects_map(vec![
        project("p1", ProjectType::Solar, "DE"),
        project("p2", ProjectType::Wind, "DE"),
        project("p3", ProjectType::Hydro, "DE"),
    ]);
    let service = RiskService::new(
        Arc::new(MockPortfolioRepository {
            portfolio: test_portfolio(),
        }),
        Arc::new(MockHoldingsRepository { holdings }),
        Arc::new(MockProjectRepository { projects }),
        Arc::new(MockAssessmentRepository {
            stored: None,
            legacy: vec![legacy_assessment("ra-1", "technology", Severity::Low)],
            active_alerts: 0,
        }),
        RegulatoryTables::standard(),
    );

    let dashboard = service.get_risk_dashboard("pf-1", "org-1").await.unwrap();

    // 6 auto findings + 1 stored assessment
    assert_eq!(dashboard.risks.len(), 7);
    assert_eq!(dashboard.severity_counts.high, 4);
    assert_eq!(dashboard.severity_counts.medium, 2);
    assert_eq!(dashboard.severity_counts.low, 1);
    assert_eq!(dashboard.severity_counts.critical, 0);

    assert_eq!(dashboard.top_risks.len(), 5);
    // High-severity findings outrank everything; within highs the likely
    // sector finding leads
    assert_eq!(dashboard.top_risks[0].risk_type, "sector");
    assert!(dashboard.top_risks.iter().all(|r| r.severity != Severity::Low));

    assert!(dashboard.overall_risk_score.is_some());
    assert!(!dashboard.concentration.flags.is_empty());
    // Stored assessment month plus the current live point
    assert!(dashboard.trend.len() >= 2);
    assert_eq!(dashboard.trend[0].period, "2026-03");
}

#[tokio::test]
async fn dashboard_for_unknown_portfolio_is_not_found() {
    let service = RiskService::new(
        Arc::new(MockPortfolioRepository {
            portfolio: test_portfolio(),
        }),
        Arc::new(MockHoldingsRepository { holdings: vec![] }),
        Arc::new(MockProjectRepository {
            projects: HashMap::new(),
        }),
        Arc::new(MockAssessmentRepository {
            stored: None,
            legacy: vec![],
            active_alerts: 0,
        }),
        RegulatoryTables::standard(),
    );

    let err = service
        .get_risk_dashboard("pf-1", "other-org")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

// --- Five-domain service ---

#[tokio::test]
async fn five_domain_service_reports_freshly_queried_alert_count() {
    use crate::risk::FiveDomainService;

    let service = FiveDomainService::new(
        Arc::new(MockPortfolioRepository {
            portfolio: test_portfolio(),
        }),
        Arc::new(MockAssessmentRepository {
            stored: Some(stored_assessment(false)),
            legacy: vec![],
            active_alerts: 7,
        }),
        RegulatoryTables::standard(),
    );

    let response = service.get_five_domain_scores("pf-1", "org-1").await.unwrap();

    assert_eq!(response.source, ScoreSource::Stored);
    // The stored record says 2, but the live count wins
    assert_eq!(response.active_alerts_count, 7);
}

// --- Monitoring threshold check ---

#[tokio::test]
async fn threshold_check_appends_one_alert_per_critical_domain() {
    let writer = Arc::new(MockAlertWriter::default());
    let service = MonitoringService::new(
        Arc::new(MockPortfolioRepository {
            portfolio: test_portfolio(),
        }),
        Arc::new(MockAssessmentRepository {
            stored: Some(stored_assessment(true)),
            legacy: vec![],
            active_alerts: 0,
        }),
        writer.clone(),
        RegulatoryTables::standard(),
    );

    let created = service.run_threshold_check("pf-1", "org-1").await.unwrap();

    // Only the market domain (80) is at or above the critical bucket
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].domain, RiskDomain::Market);
    assert!(!created[0].resolved);
    assert_eq!(writer.appended.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn threshold_check_is_skipped_when_monitoring_disabled() {
    let writer = Arc::new(MockAlertWriter::default());
    let service = MonitoringService::new(
        Arc::new(MockPortfolioRepository {
            portfolio: test_portfolio(),
        }),
        Arc::new(MockAssessmentRepository {
            stored: Some(stored_assessment(false)),
            legacy: vec![],
            active_alerts: 0,
        }),
        writer.clone(),
        RegulatoryTables::standard(),
    );

    let created = service.run_threshold_check("pf-1", "org-1").await.unwrap();

    assert!(created.is_empty());
    assert!(writer.appended.lock().unwrap().is_empty());
}
