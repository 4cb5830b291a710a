use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Project technology type. Drives the climate-risk and taxonomy-activity
/// lookup tables.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ProjectType {
    Solar,
    Wind,
    Hydro,
    Geothermal,
    Biomass,
    Storage,
    EnergyEfficiency,
    Other,
}

impl ProjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Solar => "solar",
            ProjectType::Wind => "wind",
            ProjectType::Hydro => "hydro",
            ProjectType::Geothermal => "geothermal",
            ProjectType::Biomass => "biomass",
            ProjectType::Storage => "storage",
            ProjectType::EnergyEfficiency => "energy_efficiency",
            ProjectType::Other => "other",
        }
    }

    /// Sector bucket used for concentration analysis.
    pub fn sector(&self) -> &'static str {
        match self {
            ProjectType::Solar
            | ProjectType::Wind
            | ProjectType::Hydro
            | ProjectType::Geothermal
            | ProjectType::Biomass => "renewable_generation",
            ProjectType::Storage => "energy_storage",
            ProjectType::EnergyEfficiency => "energy_efficiency",
            ProjectType::Other => "other",
        }
    }
}

impl FromStr for ProjectType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "solar" => Ok(ProjectType::Solar),
            "wind" => Ok(ProjectType::Wind),
            "hydro" => Ok(ProjectType::Hydro),
            "geothermal" => Ok(ProjectType::Geothermal),
            "biomass" => Ok(ProjectType::Biomass),
            "storage" => Ok(ProjectType::Storage),
            "energy_efficiency" => Ok(ProjectType::EnergyEfficiency),
            _ => Ok(ProjectType::Other),
        }
    }
}

/// Signal sub-scores previously computed for a project. Read-only here; the
/// ESG engine consumes the technical sub-score as an efficiency proxy.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct SignalScores {
    pub overall: Option<f64>,
    pub technical: Option<f64>,
    pub financial: Option<f64>,
    pub team: Option<f64>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub org_id: String,
    pub name: String,
    pub project_type: ProjectType,
    pub country: String,
    pub jobs_created: Option<f64>,
    pub signal_scores: Option<SignalScores>,
}
