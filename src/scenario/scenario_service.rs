use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

use crate::constants::{MAX_RATE_HAIRCUT, WATERFALL_MIN_DELTA};
use crate::errors::Result;
use crate::portfolio::{
    AssetType, FundMetricsRepositoryTrait, FundMetricsSnapshot, Holding,
    HoldingsRepositoryTrait, PortfolioRepositoryTrait,
};
use crate::scenario::scenario_model::{
    HoldingImpact, ScenarioParameters, ScenarioResult, WaterfallStep,
    SCENARIO_CARBON_PRICE_CHANGE, SCENARIO_CLIMATE_EVENT, SCENARIO_CUSTOM,
    SCENARIO_INTEREST_RATE_SHOCK, SCENARIO_REGULATORY_CHANGE, SCENARIO_TECHNOLOGY_DISRUPTION,
};

/// Deterministic stress-test simulator. Pure: identical inputs produce an
/// identical result, with no hidden randomness or clock reads.
pub struct ScenarioEngine;

impl ScenarioEngine {
    pub fn run(
        portfolio_id: &str,
        holdings: &[Holding],
        latest_metrics: Option<&FundMetricsSnapshot>,
        scenario_type: &str,
        params: &ScenarioParameters,
    ) -> ScenarioResult {
        let holding_impacts: Vec<HoldingImpact> = holdings
            .iter()
            .map(|holding| {
                let stressed_value = Self::stress_holding(holding, scenario_type, params);
                HoldingImpact {
                    holding_id: holding.id.clone(),
                    asset_name: holding.asset_name.clone(),
                    current_value: holding.current_value,
                    stressed_value,
                    delta: stressed_value - holding.current_value,
                }
            })
            .collect();

        let nav_before: Decimal = holdings.iter().map(|h| h.current_value).sum();
        let nav_after: Decimal = holding_impacts.iter().map(|i| i.stressed_value).sum();
        let nav_delta = nav_after - nav_before;
        let nav_delta_pct = if nav_before > Decimal::ZERO {
            nav_delta / nav_before * dec!(100)
        } else {
            Decimal::ZERO
        };

        let mut waterfall = Vec::with_capacity(holding_impacts.len() + 2);
        waterfall.push(WaterfallStep {
            label: "Baseline NAV".to_string(),
            amount: nav_before,
        });
        for impact in &holding_impacts {
            if impact.delta.abs() > WATERFALL_MIN_DELTA {
                waterfall.push(WaterfallStep {
                    label: impact.asset_name.clone(),
                    amount: impact.delta,
                });
            }
        }
        waterfall.push(WaterfallStep {
            label: "Stressed NAV".to_string(),
            amount: nav_after,
        });

        let irr_before = latest_metrics.and_then(|m| m.net_irr);
        // Heuristic shift: half the relative NAV move applied to the IRR
        let irr_after = match irr_before {
            Some(irr) if nav_before > Decimal::ZERO => {
                Some(irr + (nav_delta / nav_before) * irr * dec!(0.5))
            }
            _ => None,
        };

        let narrative = format!(
            "Under the {} scenario, portfolio NAV moves from {} to {} ({}%).",
            scenario_type,
            nav_before.round_dp(2),
            nav_after.round_dp(2),
            nav_delta_pct.round_dp(2)
        );

        ScenarioResult {
            portfolio_id: portfolio_id.to_string(),
            scenario_type: scenario_type.to_string(),
            nav_before,
            nav_after,
            nav_delta,
            nav_delta_pct,
            irr_before,
            irr_after,
            holding_impacts,
            waterfall,
            narrative,
        }
    }

    /// Per-holding stress function. Unknown scenario types fall through to a
    /// no-op; callers wanting strict rejection must validate beforehand.
    fn stress_holding(
        holding: &Holding,
        scenario_type: &str,
        params: &ScenarioParameters,
    ) -> Decimal {
        let value = holding.current_value;
        match scenario_type {
            SCENARIO_INTEREST_RATE_SHOCK => {
                // Modified-duration approximation, capped at a 50% haircut
                let basis_points = params.basis_points.unwrap_or(Decimal::ZERO);
                let duration_years = params.duration_years.unwrap_or(Decimal::ZERO);
                let haircut =
                    (duration_years * basis_points / dec!(10000)).min(MAX_RATE_HAIRCUT);
                value * (Decimal::ONE - haircut)
            }
            SCENARIO_CARBON_PRICE_CHANGE => match holding.asset_type {
                AssetType::Equity | AssetType::Debt => {
                    let pct_change = params.pct_change.unwrap_or(Decimal::ZERO);
                    let carbon_revenue_pct = params.carbon_revenue_pct.unwrap_or(Decimal::ZERO);
                    value * (Decimal::ONE + pct_change / dec!(100) * carbon_revenue_pct)
                }
                _ => value,
            },
            SCENARIO_TECHNOLOGY_DISRUPTION => {
                // No project-type visibility at this layer: a non-empty sector
                // list applies the haircut across the whole book
                match params.sectors.as_ref() {
                    Some(sectors) if !sectors.is_empty() => {
                        let haircut = params.haircut_pct.unwrap_or(Decimal::ZERO) / dec!(100);
                        value * (Decimal::ONE - haircut)
                    }
                    _ => value,
                }
            }
            SCENARIO_REGULATORY_CHANGE => {
                let haircut = params.compliance_cost_pct.unwrap_or(Decimal::ZERO) / dec!(100);
                value * (Decimal::ONE - haircut)
            }
            SCENARIO_CLIMATE_EVENT => {
                let damage_pct = params.damage_pct.unwrap_or(Decimal::ZERO);
                let affected = params.portfolio_affected_pct.unwrap_or(Decimal::ZERO);
                value * (Decimal::ONE - damage_pct / dec!(100) * affected)
            }
            SCENARIO_CUSTOM => {
                let nav_change_pct = params.nav_change_pct.unwrap_or(Decimal::ZERO);
                value * (Decimal::ONE + nav_change_pct / dec!(100))
            }
            _ => {
                debug!("Unknown scenario type '{}', applying no stress", scenario_type);
                value
            }
        }
    }
}

pub struct ScenarioService {
    portfolio_repository: Arc<dyn PortfolioRepositoryTrait>,
    holdings_repository: Arc<dyn HoldingsRepositoryTrait>,
    metrics_repository: Arc<dyn FundMetricsRepositoryTrait>,
}

impl ScenarioService {
    pub fn new(
        portfolio_repository: Arc<dyn PortfolioRepositoryTrait>,
        holdings_repository: Arc<dyn HoldingsRepositoryTrait>,
        metrics_repository: Arc<dyn FundMetricsRepositoryTrait>,
    ) -> Self {
        ScenarioService {
            portfolio_repository,
            holdings_repository,
            metrics_repository,
        }
    }

    pub async fn run_scenario_analysis(
        &self,
        portfolio_id: &str,
        org_id: &str,
        scenario_type: &str,
        params: &ScenarioParameters,
    ) -> Result<ScenarioResult> {
        let portfolio = self
            .portfolio_repository
            .get_portfolio(portfolio_id, org_id)
            .await?;
        let holdings = self
            .holdings_repository
            .get_active_holdings(&portfolio.id)
            .await?;
        let latest_metrics = self
            .metrics_repository
            .get_latest_metrics(&portfolio.id)
            .await?;

        Ok(ScenarioEngine::run(
            &portfolio.id,
            &holdings,
            latest_metrics.as_ref(),
            scenario_type,
            params,
        ))
    }
}
