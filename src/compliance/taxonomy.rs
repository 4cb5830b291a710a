use std::sync::Arc;

use crate::compliance::compliance_model::{DnshCheck, DnshStatus, TaxonomyResult};
use crate::portfolio::Holding;
use crate::projects::Project;
use crate::rules::RegulatoryTables;

pub const OBJECTIVE_CLIMATE_MITIGATION: &str = "climate_change_mitigation";
pub const OBJECTIVE_CLIMATE_ADAPTATION: &str = "climate_change_adaptation";
pub const OBJECTIVE_WATER_MARINE: &str = "water_and_marine_resources";
pub const OBJECTIVE_CIRCULAR_ECONOMY: &str = "circular_economy";
pub const OBJECTIVE_POLLUTION_PREVENTION: &str = "pollution_prevention";
pub const OBJECTIVE_BIODIVERSITY: &str = "biodiversity_and_ecosystems";

/// Per-holding EU Taxonomy rule evaluator. A holding without a resolvable
/// linked project is ineligible rather than an error.
pub struct TaxonomyChecker {
    tables: Arc<RegulatoryTables>,
}

impl TaxonomyChecker {
    pub fn new(tables: Arc<RegulatoryTables>) -> Self {
        TaxonomyChecker { tables }
    }

    pub fn check_holding(&self, holding: &Holding, project: Option<&Project>) -> TaxonomyResult {
        let activity = project
            .and_then(|p| self.tables.taxonomy_activities.get(&p.project_type))
            .cloned();
        let eligible = activity.is_some();

        let dnsh_checks = self.dnsh_checks(project);
        // `needs_assessment` does not block alignment under the current rules;
        // only an explicit non-compliance does.
        let aligned =
            eligible && !dnsh_checks.iter().any(|c| c.status == DnshStatus::NonCompliant);

        TaxonomyResult {
            holding_id: holding.id.clone(),
            asset_name: holding.asset_name.clone(),
            eligible,
            aligned,
            activity,
            dnsh_checks,
        }
    }

    /// The six DNSH environmental objectives. Mitigation is compliant only
    /// for the low-carbon set; biodiversity always needs a site assessment.
    fn dnsh_checks(&self, project: Option<&Project>) -> Vec<DnshCheck> {
        let mitigation_status = match project {
            Some(p) if self.tables.low_carbon_types.contains(&p.project_type) => {
                DnshStatus::Compliant
            }
            _ => DnshStatus::NeedsAssessment,
        };

        vec![
            DnshCheck {
                objective: OBJECTIVE_CLIMATE_MITIGATION.to_string(),
                status: mitigation_status,
            },
            DnshCheck {
                objective: OBJECTIVE_CLIMATE_ADAPTATION.to_string(),
                status: DnshStatus::Compliant,
            },
            DnshCheck {
                objective: OBJECTIVE_WATER_MARINE.to_string(),
                status: DnshStatus::Compliant,
            },
            DnshCheck {
                objective: OBJECTIVE_CIRCULAR_ECONOMY.to_string(),
                status: DnshStatus::Compliant,
            },
            DnshCheck {
                objective: OBJECTIVE_POLLUTION_PREVENTION.to_string(),
                status: DnshStatus::Compliant,
            },
            DnshCheck {
                objective: OBJECTIVE_BIODIVERSITY.to_string(),
                status: DnshStatus::NeedsAssessment,
            },
        ]
    }
}
