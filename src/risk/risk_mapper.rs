use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::sync::Arc;

use crate::constants::{
    CLIMATE_EXPOSURE_THRESHOLD, CONCENTRATION_THRESHOLD, CURRENCY_EXPOSURE_THRESHOLD,
    FUNCTIONAL_CURRENCY, ILLIQUID_RATIO_THRESHOLD,
};
use crate::portfolio::Holding;
use crate::projects::Project;
use crate::risk::risk_model::{AutoRiskFinding, Probability, RiskType, Severity};
use crate::rules::RegulatoryTables;

/// Rule engine that turns portfolio composition into auto-identified risk
/// findings. Rules are evaluated independently; emission follows rule order.
pub struct RiskMapper {
    tables: Arc<RegulatoryTables>,
}

impl RiskMapper {
    pub fn new(tables: Arc<RegulatoryTables>) -> Self {
        RiskMapper { tables }
    }

    pub fn identify_risks(
        &self,
        holdings: &[Holding],
        projects_by_id: &HashMap<String, Project>,
    ) -> Vec<AutoRiskFinding> {
        if holdings.is_empty() {
            return Vec::new();
        }

        let total: Decimal = holdings.iter().map(|h| h.investment_amount).sum();
        // Guard against divide-by-zero; shares over a zero book are not meaningful
        let total = if total > Decimal::ZERO { total } else { dec!(1) };

        let mut findings = Vec::new();

        // Rule 1: sector concentration
        for (sector, share) in
            Self::over_threshold(Self::sector_exposure(holdings, projects_by_id), total)
        {
            findings.push(AutoRiskFinding {
                risk_type: RiskType::Sector,
                severity: Severity::High,
                probability: Probability::Likely,
                description: format!(
                    "Sector {} represents {}% of invested capital",
                    sector,
                    (share * dec!(100)).round_dp(1)
                ),
            });
        }

        // Rule 2: geography concentration
        for (country, share) in
            Self::over_threshold(Self::geography_exposure(holdings, projects_by_id), total)
        {
            findings.push(AutoRiskFinding {
                risk_type: RiskType::Geography,
                severity: Severity::Medium,
                probability: Probability::Possible,
                description: format!(
                    "Geography {} represents {}% of invested capital",
                    country,
                    (share * dec!(100)).round_dp(1)
                ),
            });
        }

        // Rule 3: non-functional-currency exposure
        let foreign: Decimal = holdings
            .iter()
            .filter(|h| h.currency != FUNCTIONAL_CURRENCY)
            .map(|h| h.investment_amount)
            .sum();
        let foreign_share = foreign / total;
        if foreign_share > CURRENCY_EXPOSURE_THRESHOLD {
            findings.push(AutoRiskFinding {
                risk_type: RiskType::Currency,
                severity: Severity::Medium,
                probability: Probability::Possible,
                description: format!(
                    "Non-{} exposure at {}% of invested capital",
                    FUNCTIONAL_CURRENCY,
                    (foreign_share * dec!(100)).round_dp(1)
                ),
            });
        }

        // Rule 4: illiquidity. Every holding on the platform is illiquid
        // infrastructure, so the ratio is count/count and the rule fires for
        // any non-empty portfolio.
        let illiquid_count = holdings.len();
        let illiquid_ratio = illiquid_count as f64 / holdings.len() as f64;
        if illiquid_ratio >= ILLIQUID_RATIO_THRESHOLD {
            findings.push(AutoRiskFinding {
                risk_type: RiskType::Liquidity,
                severity: Severity::Medium,
                probability: Probability::Likely,
                description: format!(
                    "{}% of holdings are illiquid infrastructure assets with no liquid secondary market",
                    (illiquid_ratio * 100.0).round()
                ),
            });
        }

        // Rule 5: physical climate exposure
        let climate_exposed: Decimal = holdings
            .iter()
            .filter(|h| {
                Self::linked_project(h, projects_by_id)
                    .map(|p| self.tables.is_climate_exposed(&p.project_type))
                    .unwrap_or(false)
            })
            .map(|h| h.investment_amount)
            .sum();
        let climate_share = climate_exposed / total;
        if climate_share > CLIMATE_EXPOSURE_THRESHOLD {
            findings.push(AutoRiskFinding {
                risk_type: RiskType::Climate,
                severity: Severity::High,
                probability: Probability::Possible,
                description: format!(
                    "{}% of invested capital sits in assets with elevated physical climate risk",
                    (climate_share * dec!(100)).round_dp(1)
                ),
            });
        }

        // Rule 6: high-scrutiny jurisdictions
        let scrutinized: Decimal = holdings
            .iter()
            .filter(|h| {
                Self::linked_project(h, projects_by_id)
                    .map(|p| self.tables.high_scrutiny_countries.contains(&p.country))
                    .unwrap_or(false)
            })
            .map(|h| h.investment_amount)
            .sum();
        if scrutinized > Decimal::ZERO {
            findings.push(AutoRiskFinding {
                risk_type: RiskType::Regulatory,
                severity: Severity::Medium,
                probability: Probability::Possible,
                description: format!(
                    "{}% of invested capital exposed to high-scrutiny jurisdictions",
                    (scrutinized / total * dec!(100)).round_dp(1)
                ),
            });
        }

        // Rule 7: single-counterparty concentration
        let mut by_project: HashMap<&str, Decimal> = HashMap::new();
        for holding in holdings {
            if let Some(project_id) = holding.project_id.as_deref() {
                *by_project.entry(project_id).or_insert(Decimal::ZERO) +=
                    holding.investment_amount;
            }
        }
        let mut counterparties: Vec<(String, Decimal)> = by_project
            .into_iter()
            .filter(|(_, value)| *value / total > CONCENTRATION_THRESHOLD)
            .map(|(id, value)| {
                let name = projects_by_id
                    .get(id)
                    .map(|p| p.name.clone())
                    .unwrap_or_else(|| id.to_string());
                (name, value / total)
            })
            .collect();
        counterparties.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        for (name, share) in counterparties {
            findings.push(AutoRiskFinding {
                risk_type: RiskType::Counterparty,
                severity: Severity::High,
                probability: Probability::Unlikely,
                description: format!(
                    "Counterparty {} represents {}% of invested capital",
                    name,
                    (share * dec!(100)).round_dp(1)
                ),
            });
        }

        findings
    }

    fn linked_project<'a>(
        holding: &Holding,
        projects_by_id: &'a HashMap<String, Project>,
    ) -> Option<&'a Project> {
        holding
            .project_id
            .as_ref()
            .and_then(|id| projects_by_id.get(id))
    }

    fn sector_exposure(
        holdings: &[Holding],
        projects_by_id: &HashMap<String, Project>,
    ) -> HashMap<String, Decimal> {
        let mut exposure = HashMap::new();
        for holding in holdings {
            if let Some(project) = Self::linked_project(holding, projects_by_id) {
                *exposure
                    .entry(project.project_type.sector().to_string())
                    .or_insert(Decimal::ZERO) += holding.investment_amount;
            }
        }
        exposure
    }

    fn geography_exposure(
        holdings: &[Holding],
        projects_by_id: &HashMap<String, Project>,
    ) -> HashMap<String, Decimal> {
        let mut exposure = HashMap::new();
        for holding in holdings {
            if let Some(project) = Self::linked_project(holding, projects_by_id) {
                *exposure
                    .entry(project.country.clone())
                    .or_insert(Decimal::ZERO) += holding.investment_amount;
            }
        }
        exposure
    }

    /// Buckets whose share strictly exceeds the concentration threshold,
    /// largest first with a stable label tie-break.
    fn over_threshold(
        exposure: HashMap<String, Decimal>,
        total: Decimal,
    ) -> Vec<(String, Decimal)> {
        let mut over: Vec<(String, Decimal)> = exposure
            .into_iter()
            .map(|(label, value)| (label, value / total))
            .filter(|(_, share)| *share > CONCENTRATION_THRESHOLD)
            .collect();
        over.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        over
    }
}
