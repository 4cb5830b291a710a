pub mod scenario_model;
pub mod scenario_service;

pub use scenario_model::{
    HoldingImpact, ScenarioParameters, ScenarioResult, WaterfallStep,
    SCENARIO_CARBON_PRICE_CHANGE, SCENARIO_CLIMATE_EVENT, SCENARIO_CUSTOM,
    SCENARIO_INTEREST_RATE_SHOCK, SCENARIO_REGULATORY_CHANGE, SCENARIO_TECHNOLOGY_DISRUPTION,
};
pub use scenario_service::{ScenarioEngine, ScenarioService};
