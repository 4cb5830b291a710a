use crate::esg::{EsgExtractedData, EsgScoringEngine};
use crate::projects::{Project, ProjectType, SignalScores};
use crate::rules::RegulatoryTables;

fn project(project_type: ProjectType, jobs_created: Option<f64>) -> Project {
    Project {
        id: "p1".to_string(),
        org_id: "org-1".to_string(),
        name: "Test Project".to_string(),
        project_type,
        country: "DE".to_string(),
        jobs_created,
        signal_scores: None,
    }
}

fn engine() -> EsgScoringEngine {
    EsgScoringEngine::new(RegulatoryTables::standard())
}

#[test]
fn missing_extracted_data_degrades_to_neutral_baseline() {
    let response = engine().score_esg(&project(ProjectType::Solar, None), None, None);

    // Environment: carbon 90 (solar), efficiency 70, waste 70, water 70
    assert_eq!(response.environment.score, 75.0);
    // Social: jobs 50, community 70, labor 75, health/safety 60
    assert_eq!(response.social.score, 63.8);
    // Governance: board 70, transparency 65, ethics 80, compliance 75
    assert_eq!(response.governance.score, 72.5);
    // 75.0*0.4 + 63.8*0.3 + 72.5*0.3
    assert_eq!(response.overall_score, 70.9);
}

#[test]
fn each_dimension_has_four_named_sub_scores() {
    let response = engine().score_esg(&project(ProjectType::Wind, Some(10.0)), None, None);

    assert_eq!(response.environment.sub_scores.len(), 4);
    assert_eq!(response.social.sub_scores.len(), 4);
    assert_eq!(response.governance.sub_scores.len(), 4);
}

#[test]
fn jobs_created_is_doubled_and_capped() {
    let scored = engine().score_esg(&project(ProjectType::Solar, Some(30.0)), None, None);
    let jobs = &scored.social.sub_scores[0];
    assert_eq!(jobs.name, "jobs_created");
    assert_eq!(jobs.score, 60.0);

    let capped = engine().score_esg(&project(ProjectType::Solar, Some(80.0)), None, None);
    assert_eq!(capped.social.sub_scores[0].score, 100.0);
}

#[test]
fn energy_efficiency_derives_from_technical_signal_capped_at_100() {
    let signals = SignalScores {
        overall: Some(80.0),
        technical: Some(90.0),
        financial: None,
        team: None,
    };
    let response = engine().score_esg(&project(ProjectType::Solar, None), Some(&signals), None);

    let efficiency = &response.environment.sub_scores[1];
    assert_eq!(efficiency.name, "energy_efficiency");
    assert_eq!(efficiency.score, 100.0);

    let modest = SignalScores {
        technical: Some(50.0),
        ..Default::default()
    };
    let response = engine().score_esg(&project(ProjectType::Solar, None), Some(&modest), None);
    assert_eq!(response.environment.sub_scores[1].score, 60.0);
}

#[test]
fn extracted_scores_override_defaults() {
    let extracted = EsgExtractedData {
        waste_management: Some(90.0),
        water_usage: Some(85.0),
        business_ethics: Some(40.0),
        ..Default::default()
    };
    let response = engine().score_esg(&project(ProjectType::Wind, None), None, Some(&extracted));

    // Environment: carbon 92 (wind), efficiency 70, waste 90, water 85
    assert_eq!(response.environment.score, 84.3);
    // Governance: board 70, transparency 65, ethics 40, compliance 75
    assert_eq!(response.governance.score, 62.5);
}

#[test]
fn unlisted_project_type_uses_carbon_baseline() {
    let response = engine().score_esg(&project(ProjectType::Other, None), None, None);
    let carbon = &response.environment.sub_scores[0];
    assert_eq!(carbon.name, "carbon_footprint");
    assert_eq!(carbon.score, 50.0);
}
