//! End-to-end: config file to rendered reports.

use queuesim_simulation::{simulate, SimulationError};
use queuesim_simulator::{to_json, SimulationTable, SimulatorConfig, SimulatorError, Sweep};
use std::io::Write;

const CLINIC_TOML: &str = r#"
patients = 50
seed = 25
day_start = "7.00"

[lcg]
multiplier = 241
increment = 59
modulus = 10007

[inter_arrival]
outcomes = [2, 3, 4, 5, 6]
probabilities = [0.15, 0.25, 0.20, 0.25, 0.15]

[service]
outcomes = [2, 3, 4, 5, 6]
probabilities = [0.10, 0.25, 0.30, 0.20, 0.15]
"#;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_clinic_file_matches_defaults() {
    let file = write_config(CLINIC_TOML);
    let config = SimulatorConfig::load(file.path()).unwrap();
    assert_eq!(config, SimulatorConfig::default());
}

#[test]
fn test_clinic_file_run() {
    let file = write_config(CLINIC_TOML);
    let config = SimulatorConfig::load(file.path()).unwrap();
    let run = simulate(config.to_queue_config().unwrap()).unwrap();

    assert_eq!(run.stats.total_wait_minutes, 404);
    assert_eq!(run.stats.total_idle_minutes, 8);
    assert_eq!(run.stats.closing_time.to_string(), "10.35");

    let table = SimulationTable::new(&run).to_string();
    assert!(table.contains("Total waiting time: 6.75 hours"));

    let json = to_json(&run.stats).unwrap();
    assert!(json.contains("\"closing_time\": \"10.35\""));
}

#[test]
fn test_overrides_apply_on_top_of_file() {
    let file = write_config("seed = 427\n");
    let config = SimulatorConfig::load(file.path())
        .unwrap()
        .with_patients(78)
        .with_day_start_str("8.30")
        .unwrap();
    let run = simulate(config.to_queue_config().unwrap()).unwrap();

    assert_eq!(run.records.len(), 78);
    assert_eq!(run.records[0].branch, queuesim_types::StepBranch::Opening);
    assert!(run.records[0].arrival.to_string().starts_with("8.3"));
}

#[test]
fn test_invalid_file_tables_rejected() {
    let file = write_config(
        r#"
        [service]
        outcomes = [1, 2, 3]
        probabilities = [0.5, 0.5]
        "#,
    );
    let config = SimulatorConfig::load(file.path()).unwrap();
    let err = config.to_queue_config().unwrap_err();
    assert!(matches!(
        err,
        SimulatorError::Simulation(SimulationError::Configuration(_))
    ));
    assert!(err.to_string().contains("service"), "{err}");
}

#[test]
fn test_sweep_from_file() {
    let file = write_config("patients = 20\n");
    let config = SimulatorConfig::load(file.path()).unwrap();
    let report = Sweep::from_config(&config, 4)
        .unwrap()
        .with_master_seed(99)
        .run()
        .unwrap();

    assert_eq!(report.runs.len(), 4);
    assert!(report.runs.iter().all(|r| r.stats.patients == 20));
}
