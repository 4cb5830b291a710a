use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;

use crate::concentration::ConcentrationAnalyzer;
use crate::portfolio::{AssetType, Holding, HoldingStatus};
use crate::projects::{Project, ProjectType};

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

#[test]
fn percentages_sum_to_one_hundred_per_dimension() {
    let holdings = vec![
        holding("h1", dec!(5_000_000), "USD", Some("p1")),
        holding("h2", dec!(3_000_000), "EUR", Some("p2")),
        holding("h3", dec!(2_000_000), "USD", Some("p3")),
    ];
    let projects = projects_map(vec![
        project("p1", ProjectType::Solar, "DE"),
        project("p2", ProjectType::Storage, "FR"),
        project("p3", ProjectType::Wind, "DE"),
    ]);

    let analysis = ConcentrationAnalyzer::analyze(&holdings, &projects);

    for buckets in [
        &analysis.sector,
        &analysis.geography,
        &analysis.counterparty,
        &analysis.currency,
    ] {
        let total: Decimal = buckets.iter().map(|b| b.percentage).sum();
        assert_eq!(total.round_dp(6), dec!(100));
    }
}

#[test]
fn zero_invested_reports_zero_percentages() {
    let holdings = vec![
        holding("h1", Decimal::ZERO, "USD", Some("p1")),
        holding("h2", Decimal::ZERO, "USD", None),
    ];
    let projects = projects_map(vec![project("p1", ProjectType::Solar, "DE")]);

    let analysis = ConcentrationAnalyzer::analyze(&holdings, &projects);

    for buckets in [
        &analysis.sector,
        &analysis.geography,
        &analysis.counterparty,
        &analysis.currency,
    ] {
        assert!(buckets.iter().all(|b| b.percentage == Decimal::ZERO));
        assert!(buckets.iter().all(|b| !b.is_concentrated));
    }
    assert!(analysis.flags.is_empty());
}

#[test]
fn share_at_exactly_threshold_is_not_concentrated() {
    // Four equal counterparties at 25% each: strict > must not mark them
    let holdings = vec![
        holding("h1", dec!(250), "USD", Some("p1")),
        holding("h2", dec!(250), "USD", Some("p2")),
        holding("h3", dec!(250), "USD", Some("p3")),
        holding("h4", dec!(250), "USD", Some("p4")),
    ];
    let projects = projects_map(vec![
        project("p1", ProjectType::Solar, "DE"),
        project("p2", ProjectType::Wind, "FR"),
        project("p3", ProjectType::Hydro, "ES"),
        project("p4", ProjectType::Storage, "IT"),
    ]);

    let analysis = ConcentrationAnalyzer::analyze(&holdings, &projects);

    assert!(analysis.counterparty.iter().all(|b| !b.is_concentrated));
    assert!(analysis
        .flags
        .iter()
        .all(|f| !f.starts_with("Counterparty")));
}

#[test]
fn holdings_without_project_skip_sector_and_geography() {
    let holdings = vec![
        holding("h1", dec!(600), "USD", Some("p1")),
        holding("h2", dec!(400), "EUR", None),
    ];
    let projects = projects_map(vec![project("p1", ProjectType::Solar, "DE")]);

    let analysis = ConcentrationAnalyzer::analyze(&holdings, &projects);

    // Sector/geography see only the linked holding
    let sector_total: Decimal = analysis.sector.iter().map(|b| b.value).sum();
    assert_eq!(sector_total, dec!(600));
    let geography_total: Decimal = analysis.geography.iter().map(|b| b.value).sum();
    assert_eq!(geography_total, dec!(600));

    // Counterparty and currency see everything
    let counterparty_total: Decimal = analysis.counterparty.iter().map(|b| b.value).sum();
    assert_eq!(counterparty_total, dec!(1000));
    assert_eq!(analysis.currency.len(), 2);
}

#[test]
fn single_sector_portfolio_is_fully_concentrated_and_flagged() {
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

    let analysis = ConcentrationAnalyzer::analyze(&holdings, &projects);

    assert_eq!(analysis.sector.len(), 1);
    assert_eq!(analysis.sector[0].label, "renewable_generation");
    assert_eq!(analysis.sector[0].percentage, dec!(100));
    assert!(analysis.sector[0].is_concentrated);
    assert!(analysis
        .flags
        .iter()
        .any(|f| f.starts_with("Sector concentration")));
}

#[test]
fn buckets_are_ranked_by_value_descending() {
    let holdings = vec![
        holding("h1", dec!(100), "EUR", None),
        holding("h2", dec!(300), "USD", None),
        holding("h3", dec!(200), "GBP", None),
    ];
    let analysis = ConcentrationAnalyzer::analyze(&holdings, &HashMap::new());

    let labels: Vec<&str> = analysis.currency.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, vec!["USD", "GBP", "EUR"]);
}
