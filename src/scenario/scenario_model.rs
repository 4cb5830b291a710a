use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::utils::decimal_serde::{decimal_serde, decimal_serde_option};

pub const SCENARIO_INTEREST_RATE_SHOCK: &str = "interest_rate_shock";
pub const SCENARIO_CARBON_PRICE_CHANGE: &str = "carbon_price_change";
pub const SCENARIO_TECHNOLOGY_DISRUPTION: &str = "technology_disruption";
pub const SCENARIO_REGULATORY_CHANGE: &str = "regulatory_change";
pub const SCENARIO_CLIMATE_EVENT: &str = "climate_event";
pub const SCENARIO_CUSTOM: &str = "custom";

/// Union of the parameters accepted across scenario types. Absent fields fall
/// back to zero-impact defaults rather than faulting.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct ScenarioParameters {
    pub basis_points: Option<Decimal>,
    pub duration_years: Option<Decimal>,
    pub pct_change: Option<Decimal>,
    /// Share of revenue tied to carbon pricing, 0-1
    pub carbon_revenue_pct: Option<Decimal>,
    pub sectors: Option<Vec<String>>,
    pub haircut_pct: Option<Decimal>,
    pub compliance_cost_pct: Option<Decimal>,
    pub damage_pct: Option<Decimal>,
    /// Share of the portfolio hit by the event, 0-1
    pub portfolio_affected_pct: Option<Decimal>,
    pub nav_change_pct: Option<Decimal>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HoldingImpact {
    pub holding_id: String,
    pub asset_name: String,
    #[serde(with = "decimal_serde")]
    pub current_value: Decimal,
    #[serde(with = "decimal_serde")]
    pub stressed_value: Decimal,
    #[serde(with = "decimal_serde")]
    pub delta: Decimal,
}

/// One labeled step of the NAV waterfall
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WaterfallStep {
    pub label: String,
    #[serde(with = "decimal_serde")]
    pub amount: Decimal,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioResult {
    pub portfolio_id: String,
    /// Echoes the requested type; unknown types no-op and are echoed as-is
    pub scenario_type: String,
    #[serde(with = "decimal_serde")]
    pub nav_before: Decimal,
    #[serde(with = "decimal_serde")]
    pub nav_after: Decimal,
    #[serde(with = "decimal_serde")]
    pub nav_delta: Decimal,
    #[serde(with = "decimal_serde")]
    pub nav_delta_pct: Decimal,
    #[serde(with = "decimal_serde_option")]
    pub irr_before: Option<Decimal>,
    #[serde(with = "decimal_serde_option")]
    pub irr_after: Option<Decimal>,
    pub holding_impacts: Vec<HoldingImpact>,
    pub waterfall: Vec<WaterfallStep>,
    pub narrative: String,
}
