use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::sync::Arc;

use crate::concentration::concentration_model::{
    ConcentrationAnalysis, ConcentrationAnalysisResponse, ConcentrationBucket,
};
use crate::constants::CONCENTRATION_THRESHOLD;
use crate::errors::Result;
use crate::portfolio::{Holding, HoldingsRepositoryTrait, PortfolioRepositoryTrait};
use crate::projects::{Project, ProjectRepositoryTrait};

/// Pure aggregation over one portfolio's active holdings. Side-effect free;
/// safe to call concurrently and repeatedly.
pub struct ConcentrationAnalyzer;

impl ConcentrationAnalyzer {
    pub fn analyze(
        holdings: &[Holding],
        projects_by_id: &HashMap<String, Project>,
    ) -> ConcentrationAnalysis {
        let total_invested: Decimal = holdings.iter().map(|h| h.investment_amount).sum();

        let mut sector: HashMap<String, Decimal> = HashMap::new();
        let mut geography: HashMap<String, Decimal> = HashMap::new();
        let mut counterparty: HashMap<String, Decimal> = HashMap::new();
        let mut currency: HashMap<String, Decimal> = HashMap::new();

        for holding in holdings {
            // Sector and geography require a resolvable linked project
            if let Some(project) = holding
                .project_id
                .as_ref()
                .and_then(|id| projects_by_id.get(id))
            {
                *sector
                    .entry(project.project_type.sector().to_string())
                    .or_insert(Decimal::ZERO) += holding.investment_amount;
                *geography
                    .entry(project.country.clone())
                    .or_insert(Decimal::ZERO) += holding.investment_amount;
            }

            // Every holding lands in exactly one counterparty bucket
            let counterparty_label = match holding
                .project_id
                .as_ref()
                .and_then(|id| projects_by_id.get(id))
            {
                Some(project) => project.name.clone(),
                None => holding.asset_name.clone(),
            };
            *counterparty
                .entry(counterparty_label)
                .or_insert(Decimal::ZERO) += holding.investment_amount;

            *currency
                .entry(holding.currency.clone())
                .or_insert(Decimal::ZERO) += holding.investment_amount;
        }

        let sector = Self::rank_buckets(sector, total_invested);
        let geography = Self::rank_buckets(geography, total_invested);
        let counterparty = Self::rank_buckets(counterparty, total_invested);
        let currency = Self::rank_buckets(currency, total_invested);

        let mut flags = Vec::new();
        Self::collect_flags(&mut flags, "Sector", &sector);
        Self::collect_flags(&mut flags, "Geography", &geography);
        Self::collect_flags(&mut flags, "Counterparty", &counterparty);
        Self::collect_flags(&mut flags, "Currency", &currency);

        ConcentrationAnalysis {
            sector,
            geography,
            counterparty,
            currency,
            flags,
        }
    }

    /// Ranked descending by value, with a stable label tie-break. Percentages
    /// are 0 when nothing is invested.
    fn rank_buckets(
        buckets: HashMap<String, Decimal>,
        total_invested: Decimal,
    ) -> Vec<ConcentrationBucket> {
        let mut ranked: Vec<ConcentrationBucket> = buckets
            .into_iter()
            .map(|(label, value)| {
                let (percentage, is_concentrated) = if total_invested > Decimal::ZERO {
                    let share = value / total_invested;
                    (share * dec!(100), share > CONCENTRATION_THRESHOLD)
                } else {
                    (Decimal::ZERO, false)
                };
                ConcentrationBucket {
                    label,
                    value,
                    percentage,
                    is_concentrated,
                }
            })
            .collect();
        ranked.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.label.cmp(&b.label)));
        ranked
    }

    fn collect_flags(flags: &mut Vec<String>, dimension: &str, buckets: &[ConcentrationBucket]) {
        for bucket in buckets.iter().filter(|b| b.is_concentrated) {
            flags.push(format!(
                "{} concentration: {} holds {}% of invested capital",
                dimension,
                bucket.label,
                bucket.percentage.round_dp(1)
            ));
        }
    }
}

pub struct ConcentrationService {
    portfolio_repository: Arc<dyn PortfolioRepositoryTrait>,
    holdings_repository: Arc<dyn HoldingsRepositoryTrait>,
    project_repository: Arc<dyn ProjectRepositoryTrait>,
}

impl ConcentrationService {
    pub fn new(
        portfolio_repository: Arc<dyn PortfolioRepositoryTrait>,
        holdings_repository: Arc<dyn HoldingsRepositoryTrait>,
        project_repository: Arc<dyn ProjectRepositoryTrait>,
    ) -> Self {
        ConcentrationService {
            portfolio_repository,
            holdings_repository,
            project_repository,
        }
    }

    pub async fn get_concentration_analysis(
        &self,
        portfolio_id: &str,
        org_id: &str,
    ) -> Result<ConcentrationAnalysisResponse> {
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

        Ok(ConcentrationAnalysisResponse {
            portfolio_id: portfolio.id,
            analysis: ConcentrationAnalyzer::analyze(&holdings, &projects_by_id),
            as_of: Utc::now(),
        })
    }
}
