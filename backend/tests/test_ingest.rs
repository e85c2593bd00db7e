//! Tests for boundary ingestion of raw workflow records

use scenario_roi_core::ingest::{ingest_workflow, parse_workflow, IngestIssue, RawWorkflow};
use scenario_roi_core::{person_hours_by_stage, IngestError, Stage, Workflow};
use serde_json::json;

fn workflow_json(steps: serde_json::Value) -> String {
    json!({
        "roles": [
            {"role": "Engineer", "hourly_rate": 65},
            {"role": "Researcher", "hourly_rate": "25.5"}
        ],
        "scenarios": [{"name": "BAU 1", "steps": steps}],
        "infrastructure": [
            {"category": "Storage", "cost_by_scenario": {"BAU 1": "120", "Proposed Tool": -5}}
        ],
        "roi": {
            "learning_sd": 0.1,
            "econ_per_sd": 1000,
            "discovery_rate_pct": 40,
            "total_reach": 200,
            "total_investment": 10000,
            "orgs_by_scenario": {"BAU 1": 2},
            "concurrent_studies": 2
        },
        "assumptions": ["Studies run back to back"]
    })
    .to_string()
}

#[test]
fn test_well_formed_input_is_clean() {
    let json = workflow_json(json!([{
        "stage": "Reporting",
        "step": "Write",
        "notes": "",
        "duration_weeks": 2,
        "roles": {"Engineer": 10, "Researcher": 90}
    }]));

    let (workflow, report) = parse_workflow(&json).unwrap();

    // Only the negative infrastructure amount needed fixing
    assert_eq!(report.issues.len(), 1);
    assert!(matches!(
        &report.issues[0],
        IngestIssue::Coerced { value, .. } if *value == 0.0
    ));

    assert_eq!(workflow.role("Researcher").unwrap().hourly_rate(), 25.5);
    assert_eq!(workflow.infrastructure()[0].cost_for("BAU 1"), 120.0);
    assert_eq!(workflow.infrastructure()[0].cost_for("Proposed Tool"), 0.0);
    assert_eq!(workflow.roi().orgs_for("BAU 1"), 2);
    assert_eq!(workflow.roi().concurrent_studies(), 2);
    assert_eq!(workflow.assumptions()[0].text(), "Studies run back to back");

    let step = &workflow.scenario("BAU 1").unwrap().stage_steps(Stage::Reporting)[0];
    assert_eq!(step.allocation("Researcher"), 90.0);
}

#[test]
fn test_malformed_numbers_become_zero() {
    let json = workflow_json(json!([{
        "stage": "Data Cleaning",
        "step": "Clean",
        "duration_weeks": "about three",
        "roles": {"Engineer": null, "Researcher": "lots"}
    }]));

    let (workflow, report) = parse_workflow(&json).unwrap();
    let step = &workflow.scenario("BAU 1").unwrap().stage_steps(Stage::DataCleaning)[0];

    assert_eq!(step.duration_weeks(), 0.0);
    assert_eq!(step.allocation("Engineer"), 0.0);
    assert_eq!(step.allocation("Researcher"), 0.0);

    let fields: Vec<&str> = report
        .issues
        .iter()
        .filter_map(|issue| match issue {
            IngestIssue::Coerced { field, .. } => Some(field.as_str()),
            _ => None,
        })
        .collect();
    assert!(fields.iter().any(|f| f.ends_with("duration_weeks")));
    assert!(fields.iter().any(|f| f.ends_with("roles[Researcher]")));
    // Null is treated as absent and not reported
    assert!(!fields.iter().any(|f| f.ends_with("roles[Engineer]")));
}

#[test]
fn test_unknown_stage_names_scenario_and_index() {
    let json = workflow_json(json!([
        {"stage": "Reporting", "step": "Write"},
        {"stage": "Marketing", "step": "Launch"}
    ]));

    let err = parse_workflow(&json).unwrap_err();
    match &err {
        IngestError::UnknownStage { scenario, index, .. } => {
            assert_eq!(scenario, "BAU 1");
            assert_eq!(*index, 1);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("Marketing"));
}

#[test]
fn test_malformed_json() {
    assert!(matches!(
        parse_workflow("{\"roles\": [").unwrap_err(),
        IngestError::Json(_)
    ));
}

#[test]
fn test_empty_document_is_empty_workflow() {
    let (workflow, report) = parse_workflow("{}").unwrap();
    assert!(workflow.roles().is_empty());
    assert!(workflow.scenarios().is_empty());
    assert!(report.is_clean());
}

#[test]
fn test_duplicate_scenario_skipped() {
    let raw: RawWorkflow = serde_json::from_value(json!({
        "scenarios": [
            {"name": "BAU 1", "steps": [{"stage": "Reporting", "step": "A"}]},
            {"name": "BAU 1", "steps": [{"stage": "Reporting", "step": "B"}]}
        ]
    }))
    .unwrap();

    let (workflow, report) = ingest_workflow(&raw).unwrap();
    assert_eq!(workflow.scenarios().len(), 1);
    assert_eq!(
        workflow.scenario("BAU 1").unwrap().stage_steps(Stage::Reporting)[0].step_description(),
        "A"
    );
    assert!(matches!(report.issues[0], IngestIssue::Skipped { .. }));
}

#[test]
fn test_template_round_trip() {
    let template = serde_json::to_string(&RawWorkflow::from(&Workflow::with_defaults())).unwrap();
    let (workflow, report) = parse_workflow(&template).unwrap();

    assert!(report.is_clean());
    assert_eq!(workflow.role_names(), vec!["Engineer", "Researcher", "Project Manager"]);
    assert_eq!(workflow.scenario_names(), vec!["BAU 1", "BAU 2", "Proposed Tool"]);
    assert_eq!(workflow.infrastructure().len(), 4);
}

#[test]
fn test_padded_names_resolve_to_their_references() {
    let raw: RawWorkflow = serde_json::from_value(json!({
        "roles": [{"role": "Engineer ", "hourly_rate": 50}],
        "scenarios": [{
            "name": "Proposed Tool ",
            "steps": [{
                "stage": "Data Cleaning",
                "step": "Clean",
                "duration_weeks": 12,
                "roles": {"Engineer ": 100}
            }]
        }],
        "infrastructure": [{"category": "Storage", "cost_by_scenario": {"Proposed Tool ": 500}}],
        "roi": {"orgs_by_scenario": {" Proposed Tool": 4}}
    }))
    .unwrap();

    let (workflow, report) = ingest_workflow(&raw).unwrap();
    assert!(report.is_clean(), "unexpected issues: {:?}", report.issues);

    assert_eq!(workflow.role_names(), vec!["Engineer"]);
    let scenario = workflow.scenario("Proposed Tool").unwrap();
    let step = &scenario.stage_steps(Stage::DataCleaning)[0];
    assert_eq!(step.allocation("Engineer"), 100.0);
    assert_eq!(step.role_allocation().len(), 1);

    let hours = person_hours_by_stage(scenario.steps());
    assert_eq!(hours.get(Stage::DataCleaning), 480.0);
    assert_eq!(workflow.infrastructure()[0].cost_for("Proposed Tool"), 500.0);
    assert_eq!(workflow.roi().orgs_for("Proposed Tool"), 4);
}
