//! End-to-end tests for the analysis pipeline

use scenario_roi_core::ingest::parse_workflow;
use scenario_roi_core::{
    run_analysis, ActivityStep, AnalysisConfig, PersonnelRole, Series, Stage, Workflow,
};
use serde_json::json;

fn workflow() -> Workflow {
    let json = json!({
        "roles": [
            {"role": "Engineer", "hourly_rate": 65},
            {"role": "Researcher", "hourly_rate": 25}
        ],
        "scenarios": [
            {"name": "BAU 1", "steps": [
                {"stage": "Data Collection & Access or Transfer", "step": "Export",
                 "duration_weeks": 13, "roles": {"Engineer": 50}},
                {"stage": "Reporting", "step": "Write",
                 "duration_weeks": 13, "roles": {"Researcher": 100}}
            ]},
            {"name": "Proposed Tool", "steps": [
                {"stage": "Data Collection & Access or Transfer", "step": "Export",
                 "duration_weeks": 1, "roles": {"Engineer": 50}},
                {"stage": "Reporting", "step": "Write",
                 "duration_weeks": 12, "roles": {"Researcher": 100}}
            ]}
        ],
        "infrastructure": [
            {"category": "Software Licenses",
             "cost_by_scenario": {"BAU 1": 0, "Proposed Tool": 500}}
        ],
        "roi": {
            "learning_sd": 0.1,
            "econ_per_sd": 1000,
            "discovery_rate_pct": 50,
            "total_reach": 100,
            "total_investment": 25000,
            "orgs_by_scenario": {"BAU 1": 1, "Proposed Tool": 4},
            "concurrent_studies": 1
        }
    });
    parse_workflow(&json.to_string()).unwrap().0
}

#[test]
fn test_report_covers_every_scenario() {
    let report = run_analysis(&workflow(), &AnalysisConfig::default()).unwrap();

    assert_eq!(report.baseline.as_deref(), Some("BAU 1"));
    assert_eq!(report.impact_per_study, 5000.0);
    assert_eq!(report.scenarios.len(), 2);
    assert_eq!(report.projection_rows().count(), 100);
}

#[test]
fn test_projection_inputs_per_scenario() {
    let report = run_analysis(&workflow(), &AnalysisConfig::default()).unwrap();

    let bau = report.scenario("BAU 1").unwrap();
    // 26 calendar weeks = 6 months
    assert_eq!(bau.projection_inputs.study_duration_months, 6.0);
    // 13 * 0.5 * 40 * 65 + 13 * 1.0 * 40 * 25
    assert_eq!(bau.projection_inputs.cost_per_study, 16_900.0 + 13_000.0);
    assert_eq!(bau.projection_inputs.fixed_cost, 0.0);
    assert_eq!(bau.projection_inputs.num_orgs, 1);
    assert_eq!(bau.projection[0].studies_per_org, 2);

    let tool = report.scenario("Proposed Tool").unwrap();
    assert_eq!(tool.projection_inputs.study_duration_months, 3.0);
    assert_eq!(tool.projection_inputs.fixed_cost, 25_000.0);
    assert_eq!(tool.projection_inputs.num_orgs, 4);
    assert_eq!(tool.projection[0].studies_per_org, 4);
    assert_eq!(tool.projection[0].impact, 5000.0 * 4.0 * 4.0);
}

#[test]
fn test_comparisons_are_baseline_first() {
    let report = run_analysis(&workflow(), &AnalysisConfig::default()).unwrap();

    let hours = report.stage_hours.as_ref().unwrap();
    assert_eq!(hours.scenarios, vec!["BAU 1", "Proposed Tool"]);
    assert_eq!(hours.saved(Stage::DataCollection.label()), Some(240.0));

    let roles = report.role_hours.as_ref().unwrap();
    let labels: Vec<&str> = roles.rows.iter().map(|row| row.label.as_str()).collect();
    assert_eq!(labels, vec!["Engineer", "Researcher"]);

    let costs = report.stage_costs.as_ref().unwrap();
    assert_eq!(costs.saved("Infrastructure"), Some(-500.0));
}

#[test]
fn test_fixed_cost_override() {
    let config = AnalysisConfig::from_json_str(
        r#"{"fixed_costs": {"BAU 1": 1000}, "tool_scenario": "Nobody"}"#,
    )
    .unwrap();
    let report = run_analysis(&workflow(), &config).unwrap();
    assert_eq!(report.scenario("BAU 1").unwrap().projection_inputs.fixed_cost, 1000.0);
    assert_eq!(
        report.scenario("Proposed Tool").unwrap().projection_inputs.fixed_cost,
        0.0
    );
}

#[test]
fn test_report_is_pure_and_repeatable() {
    let workflow = workflow();
    let before = workflow.clone();
    let first = run_analysis(&workflow, &AnalysisConfig::default()).unwrap();
    let second = run_analysis(&workflow, &AnalysisConfig::default()).unwrap();
    assert_eq!(first, second);
    assert_eq!(workflow, before);
}

#[test]
fn test_steps_hash_tracks_step_changes() {
    let mut workflow = workflow();
    let config = AnalysisConfig::default();
    let before = run_analysis(&workflow, &config).unwrap();

    workflow
        .add_step("Proposed Tool", ActivityStep::new(Stage::StudyDesign, "Configure"))
        .unwrap();
    let after = run_analysis(&workflow, &config).unwrap();

    assert_eq!(
        before.scenario("BAU 1").unwrap().steps_hash,
        after.scenario("BAU 1").unwrap().steps_hash
    );
    assert_ne!(
        before.scenario("Proposed Tool").unwrap().steps_hash,
        after.scenario("Proposed Tool").unwrap().steps_hash
    );
}

#[test]
fn test_removed_role_drops_out_of_costs() {
    let mut workflow = workflow();
    workflow.remove_role("Engineer");
    workflow.add_role(PersonnelRole::new("Analyst", 30.0)).unwrap();

    let report = run_analysis(&workflow, &AnalysisConfig::default()).unwrap();
    let bau = report.scenario("BAU 1").unwrap();
    assert_eq!(bau.aggregate.personnel_cost, 13_000.0);
    assert_eq!(bau.cost_by_role.get("Analyst"), 0.0);
    assert_eq!(bau.hours_by_stage.total(), bau.hours_by_role.total());
}

#[test]
fn test_default_workflow_is_all_zero() {
    let report = run_analysis(&Workflow::with_defaults(), &AnalysisConfig::default()).unwrap();
    for summary in &report.scenarios {
        assert_eq!(summary.aggregate.total_cost, 0.0);
        assert!(summary.projection.iter().all(|row| row.studies_per_org == 0));
    }
}
