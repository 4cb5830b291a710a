use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::projects::ProjectType;
use crate::risk::risk_model::RiskDomain;

/// Physical climate risk tag attached to a project type
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ClimateRiskLevel {
    High,
    Medium,
    Low,
}

/// Regulatory reference data consumed by the rule engines. Static
/// configuration, not algorithm: injected at service construction so the
/// engines stay testable against alternative regimes. `Default` supplies the
/// standard regime; a deployment may load a replacement from JSON instead.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RegulatoryTables {
    /// Physical climate risk by project type
    pub climate_risk: HashMap<ProjectType, ClimateRiskLevel>,
    /// Countries under heightened regulatory scrutiny
    pub high_scrutiny_countries: HashSet<String>,
    /// EU Taxonomy economic activity per eligible project type
    pub taxonomy_activities: HashMap<ProjectType, String>,
    /// Project types treated as low-carbon for the climate mitigation DNSH check
    pub low_carbon_types: HashSet<ProjectType>,
    /// Clean-technology set backing the GHG scope PAI estimates
    pub clean_tech_types: HashSet<ProjectType>,
    /// Renewable generation set backing the non-renewable-energy PAI estimate
    pub renewable_types: HashSet<ProjectType>,
    /// Legacy free-form risk type to five-domain mapping
    pub risk_domain_map: HashMap<String, RiskDomain>,
    /// Rule-based carbon footprint sub-score by project type (0-100)
    pub carbon_footprint_scores: HashMap<ProjectType, f64>,
    /// Default mitigation guidance per domain for computed scorecards
    pub domain_mitigations: HashMap<RiskDomain, String>,
}

impl Default for RegulatoryTables {
    fn default() -> Self {
        use ProjectType::*;

        let climate_risk = HashMap::from([
            (Hydro, ClimateRiskLevel::High),
            (Biomass, ClimateRiskLevel::High),
            (Wind, ClimateRiskLevel::Medium),
            (Solar, ClimateRiskLevel::Medium),
            (Geothermal, ClimateRiskLevel::Low),
            (Storage, ClimateRiskLevel::Low),
            (EnergyEfficiency, ClimateRiskLevel::Low),
        ]);

        let high_scrutiny_countries = HashSet::from([
            "RU".to_string(),
            "BY".to_string(),
            "IR".to_string(),
            "VE".to_string(),
            "MM".to_string(),
        ]);

        let taxonomy_activities = HashMap::from([
            (Solar, "4.1 Electricity generation using solar PV".to_string()),
            (Wind, "4.3 Electricity generation from wind power".to_string()),
            (Hydro, "4.5 Electricity generation from hydropower".to_string()),
            (
                Geothermal,
                "4.6 Electricity generation from geothermal energy".to_string(),
            ),
            (Biomass, "4.8 Electricity generation from bioenergy".to_string()),
            (Storage, "4.10 Storage of electricity".to_string()),
            (
                EnergyEfficiency,
                "7.3 Installation of energy efficiency equipment".to_string(),
            ),
        ]);

        let low_carbon_types = HashSet::from([Solar, Wind, Hydro, Geothermal, Storage]);
        let clean_tech_types = HashSet::from([Solar, Wind, Hydro, Geothermal, Storage]);
        let renewable_types = HashSet::from([Solar, Wind, Hydro, Geothermal, Biomass]);

        let risk_domain_map = HashMap::from([
            ("market".to_string(), RiskDomain::Market),
            ("concentration".to_string(), RiskDomain::Market),
            ("sector".to_string(), RiskDomain::Market),
            ("geography".to_string(), RiskDomain::Market),
            ("currency".to_string(), RiskDomain::Market),
            ("counterparty".to_string(), RiskDomain::Market),
            ("climate".to_string(), RiskDomain::Climate),
            ("environmental".to_string(), RiskDomain::Climate),
            ("regulatory".to_string(), RiskDomain::Regulatory),
            ("compliance".to_string(), RiskDomain::Regulatory),
            ("political".to_string(), RiskDomain::Regulatory),
            ("technology".to_string(), RiskDomain::Technology),
            ("operational".to_string(), RiskDomain::Technology),
            ("liquidity".to_string(), RiskDomain::Liquidity),
        ]);

        let carbon_footprint_scores = HashMap::from([
            (Wind, 92.0),
            (Solar, 90.0),
            (Geothermal, 88.0),
            (Hydro, 85.0),
            (EnergyEfficiency, 85.0),
            (Storage, 80.0),
            (Biomass, 60.0),
        ]);

        let domain_mitigations = HashMap::from([
            (
                RiskDomain::Market,
                "Diversify across sectors, geographies and counterparties".to_string(),
            ),
            (
                RiskDomain::Climate,
                "Commission physical climate risk assessments for exposed assets".to_string(),
            ),
            (
                RiskDomain::Regulatory,
                "Track regulatory developments in high-scrutiny jurisdictions".to_string(),
            ),
            (
                RiskDomain::Technology,
                "Review technology obsolescence and O&M counterparty coverage".to_string(),
            ),
            (
                RiskDomain::Liquidity,
                "Maintain secondary-market relationships and staged exit plans".to_string(),
            ),
        ]);

        RegulatoryTables {
            climate_risk,
            high_scrutiny_countries,
            taxonomy_activities,
            low_carbon_types,
            clean_tech_types,
            renewable_types,
            risk_domain_map,
            carbon_footprint_scores,
            domain_mitigations,
        }
    }
}

lazy_static! {
    static ref STANDARD_TABLES: Arc<RegulatoryTables> = Arc::new(RegulatoryTables::default());
}

impl RegulatoryTables {
    /// Shared handle to the standard regime.
    pub fn standard() -> Arc<RegulatoryTables> {
        STANDARD_TABLES.clone()
    }

    /// Load an alternative regulatory regime from JSON.
    pub fn from_json(json: &str) -> crate::errors::Result<Self> {
        let tables = serde_json::from_str(json)?;
        Ok(tables)
    }

    pub fn is_climate_exposed(&self, project_type: &ProjectType) -> bool {
        matches!(
            self.climate_risk.get(project_type),
            Some(ClimateRiskLevel::High) | Some(ClimateRiskLevel::Medium)
        )
    }

    pub fn is_taxonomy_eligible(&self, project_type: &ProjectType) -> bool {
        self.taxonomy_activities.contains_key(project_type)
    }
}
