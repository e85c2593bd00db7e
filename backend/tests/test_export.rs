//! Tests for delimited-text export of engine outputs

use scenario_roi_core::export::{
    activity_preview_table, assumptions_table, comparison_table, projection_table, roles_table,
    stage_cost_table, summary_table, Measure,
};
use scenario_roi_core::projection::ProjectionInputs;
use scenario_roi_core::{
    compare_stages, run_analysis, ActivityStep, AnalysisConfig, Assumption, ExportError,
    PersonnelRole, Scenario, Stage, StageCostTable, StageTable, Workflow,
};

#[test]
fn test_projection_csv_columns_and_precision() {
    let inputs = ProjectionInputs::new("X", 6.0, 1000.0, 5000.0, 20_000.0, 2);
    let csv = projection_table(&inputs.rows().take(1).collect::<Vec<_>>())
        .to_delimited(',')
        .unwrap();

    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some(
            "Scenario,Year,StudiesPerOrg,FixedCost,VariableCost,TotalCost,Impact,\
             ImpactPerDollarVariable,ImpactPerDollarTotal"
        )
    );
    assert_eq!(
        lines.next(),
        Some("X,1,2,20000.00,4000.00,24000.00,20000.00,5.0000,0.8333")
    );
    assert_eq!(lines.next(), None);
}

#[test]
fn test_stage_cost_csv_has_infrastructure_and_total() {
    let mut stages = StageTable::zeroed();
    stages.add(Stage::Reporting, 1234.567);
    let table = stage_cost_table(&StageCostTable {
        stages,
        infrastructure: Some(100.0),
    });

    let csv = table.to_delimited(',').unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "Stage,Cost");
    assert_eq!(lines.len(), 1 + 8 + 1 + 1);
    assert_eq!(lines[8], "Reporting,1234.57");
    assert_eq!(lines[9], "Infrastructure,100.00");
    assert_eq!(lines[10], "TOTAL,1334.57");
}

#[test]
fn test_step_text_with_commas_is_quoted() {
    let mut scenario = Scenario::new("BAU 1");
    scenario.push_step(
        ActivityStep::new(Stage::DataCollection, "Collection, Documentation, Anonymization")
            .with_duration(1.0)
            .with_allocation("Engineer", 100.0),
    );
    let table = activity_preview_table(&scenario, &[PersonnelRole::new("Engineer", 10.0)]);

    let csv = table.to_delimited(',').unwrap();
    assert!(csv.contains(",\"Collection, Documentation, Anonymization\",Engineer,"));

    let semicolon = table.to_delimited(';').unwrap();
    assert!(semicolon.contains(";Collection, Documentation, Anonymization;Engineer;"));
}

#[test]
fn test_comparison_csv() {
    let mut bau = StageTable::zeroed();
    bau.add(Stage::DataCleaning, 160.0);
    let mut tool = StageTable::zeroed();
    tool.add(Stage::DataCleaning, 20.0);

    let comparison = compare_stages("BAU 1", &bau, "Proposed Tool", &tool);
    let table = comparison_table(&comparison, Measure::Hours);
    let csv = table.to_delimited(',').unwrap();
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines[0], "Stage,BAU 1,Proposed Tool,Saved vs Proposed Tool");
    assert!(lines.contains(&"Data Cleaning,160.00,20.00,140.00"));
    assert_eq!(lines.last(), Some(&"TOTAL,160.00,20.00,140.00"));
}

#[test]
fn test_roles_and_assumptions_quote_free_text() {
    let roles = [PersonnelRole::new("Engineer", 65.0).with_notes("e.g. \"Data\" Engineer, senior")];
    let csv = roles_table(&roles).to_delimited(',').unwrap();
    assert_eq!(
        csv,
        "Role,Hourly Rate,Notes\nEngineer,65.00,\"e.g. \"\"Data\"\" Engineer, senior\"\n"
    );

    let assumptions = [Assumption::new("Line one\nline two")];
    let csv = assumptions_table(&assumptions).to_delimited(',').unwrap();
    assert_eq!(csv, "Assumption\n\"Line one\nline two\"\n");
}

#[test]
fn test_activity_preview_lists_step_per_role() {
    let mut scenario = Scenario::new("BAU 1");
    scenario.push_step(
        ActivityStep::new(Stage::DataCleaning, "Clean")
            .with_duration(2.0)
            .with_allocation("Engineer", 50.0)
            .with_allocation("Researcher", 25.0),
    );
    let roles = [
        PersonnelRole::new("Engineer", 65.0),
        PersonnelRole::new("Researcher", 25.0),
    ];

    let table = activity_preview_table(&scenario, &roles);
    assert_eq!(table.rows().len(), 2);
    let csv = table.to_delimited(',').unwrap();
    assert!(csv.contains("Data Cleaning,Clean,Engineer,2.00,50.00,40.00,65.00,2600.00,"));
    assert!(csv.contains("Data Cleaning,Clean,Researcher,2.00,25.00,20.00,25.00,500.00,"));
}

#[test]
fn test_summary_has_one_row_per_scenario() {
    let report = run_analysis(&Workflow::with_defaults(), &AnalysisConfig::default()).unwrap();
    let table = summary_table(&report);
    assert_eq!(table.rows().len(), 3);
    assert_eq!(table.header()[0], "Scenario");

    let json = table.to_json().unwrap();
    assert_eq!(json[2]["Scenario"], "Proposed Tool");
    assert_eq!(json[2]["Organisations"], 1);
}

#[test]
fn test_newline_delimiter_rejected() {
    let table = roles_table(&[]);
    assert!(matches!(
        table.to_delimited('\n'),
        Err(ExportError::InvalidDelimiter('\n'))
    ));
}
