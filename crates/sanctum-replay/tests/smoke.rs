use std::fs;
use std::path::Path;

use sanctum_replay::config::ReplayConfig;
use sanctum_replay::runner::{ReplayRunner, RunnerError};
use tempfile::tempdir;

const SNAPSHOTS: &str = r#"{"context_id":7,"visible":false,"rooms":[]}
{"context_id":7,"rooms":[[{"kind":"Boss"}],[{"kind":"Gauntlet"},{"kind":"Chalice","modifier":"Iron Manacles"}],[{"kind":"Escape"}]],"connections":[[[0,1]],[[0],[0]]]}

{"context_id":7,"current":{"layer":1,"index":0},"rooms":[[{"kind":"Boss"}],[{"kind":""},{"kind":""}],[{"kind":"Escape"}]],"connections":[[[0,1]],[[0],[0]]]}
{"context_id":8,"rooms":[[{"kind":"Boss"}],[{"kind":"Gauntlet"}],[{"kind":"Ritual"}]],"connections":[[[0]],[[0]]]}
{"context_id":8,"rooms":[[{"kind":"Boss"}],[{"kind":"Gauntlet"}],[{"kind":"Ritual"}]],"connections":[[[0]],[[0]]]}
"#;

fn load_config(dir: &Path, extra: &str) -> ReplayConfig {
    let snapshots = dir.join("captures.jsonl");
    fs::write(&snapshots, SNAPSHOTS).expect("write snapshots");

    let yaml = format!(
        r#"
run_id: "smoke"
input:
  snapshots: "{snapshots}"
outputs:
  jsonl: "{jsonl}"
  summary_md: "{summary}"
{extra}"#,
        snapshots = snapshots.display(),
        jsonl = dir.join("out/{run_id}/routes.jsonl").display(),
        summary = dir.join("out/{run_id}/summary.md").display(),
    );
    let mut cfg: ReplayConfig = serde_yaml::from_str(&yaml).expect("valid yaml");
    cfg.validate().expect("config validates");
    cfg
}

fn rows(path: &Path) -> Vec<serde_json::Value> {
    fs::read_to_string(path)
        .expect("jsonl readable")
        .lines()
        .map(|line| serde_json::from_str(line).expect("row decodes"))
        .collect()
}

#[test]
fn replay_writes_one_row_per_snapshot() {
    let dir = tempdir().expect("temp dir");
    let config = load_config(dir.path(), "");
    let paths = config.resolved_paths();

    let mut runner = ReplayRunner::new(config, paths).expect("runner created");
    let summary = runner.run().expect("replay completes");

    assert_eq!(summary.ticks, 5);
    assert_eq!(summary.hidden, 1);
    assert_eq!(summary.context_resets, 1);
    assert_eq!(summary.refreshed, 3);
    assert_eq!(summary.contexts, 2);
    assert_eq!(summary.known_rooms, 3);

    let rows = rows(&summary.jsonl_path);
    let outcomes: Vec<_> = rows
        .iter()
        .map(|row| row["outcome"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        outcomes,
        ["hidden", "refreshed", "refreshed", "context_reset", "refreshed"]
    );

    // Chalice with neutral manacles outweighs the Gauntlet.
    assert_eq!(rows[1]["route"][1], serde_json::json!({"layer": 1, "index": 1}));
    // The player stands in the Gauntlet: the route ends there and is not highlighted.
    assert_eq!(rows[2]["route"].as_array().unwrap().len(), 2);
    assert_eq!(rows[2]["highlight"].as_array().unwrap().len(), 1);
    assert!(rows[3]["route"].as_array().unwrap().is_empty());
    assert!(rows[0].get("annotations").is_none());

    let markdown = fs::read_to_string(&summary.summary_path).expect("summary readable");
    assert!(markdown.contains("| Context resets | 1 |"));
    assert!(markdown.contains("(2, 0) → (1, 0) → (0, 0)"));
}

#[test]
fn evasion_override_and_debug_rows() {
    let dir = tempdir().expect("temp dir");
    let config = load_config(dir.path(), "debug: true\nevasion_rating: 9000\n");
    let paths = config.resolved_paths();

    let mut runner = ReplayRunner::new(config, paths).expect("runner created");
    let summary = runner.run().expect("replay completes");
    let rows = rows(&summary.jsonl_path);

    // Manacles now cost 5000, so the Gauntlet wins.
    assert_eq!(rows[1]["route"][1], serde_json::json!({"layer": 1, "index": 0}));
    let annotations = rows[1]["annotations"].as_array().expect("debug annotations");
    assert_eq!(annotations.len(), 4);
    assert!(
        annotations
            .iter()
            .any(|a| a["text"].as_str().unwrap().contains("high evasion build"))
    );
}

#[test]
fn custom_profiles_are_loaded_from_disk() {
    let dir = tempdir().expect("temp dir");
    let profiles = dir.path().join("profiles.json");
    fs::write(
        &profiles,
        r#"{"Ritualist": {"room_kind_weights": {"Ritual": 4000, "Gauntlet": -4000}}}"#,
    )
    .expect("write profiles");
    let extra = format!(
        "profile: \"Ritualist\"\nprofiles_path: \"{}\"\n",
        profiles.display()
    );
    let config = load_config(dir.path(), &extra);
    let paths = config.resolved_paths();

    let mut runner = ReplayRunner::new(config, paths).expect("runner created");
    assert_eq!(runner.advisor().active_profile(), "Ritualist");
    let summary = runner.run().expect("replay completes");
    assert_eq!(summary.final_route.len(), 3);
    assert_eq!(summary.final_score, Some(3_000_000.0 + 4000.0 - 4000.0 - 100.0));
}

#[test]
fn unknown_profile_fails_before_replaying() {
    let dir = tempdir().expect("temp dir");
    let config = load_config(dir.path(), "profile: \"Nonexistent\"\n");
    let paths = config.resolved_paths();

    let err = ReplayRunner::new(config, paths).err().expect("unknown profile");
    assert!(matches!(err, RunnerError::Advisor(_)));
}

#[test]
fn malformed_snapshot_reports_its_line() {
    let dir = tempdir().expect("temp dir");
    let config = load_config(dir.path(), "");
    let paths = config.resolved_paths();
    fs::write(&paths.snapshots, "{\"context_id\":1,\"rooms\":[]}\nnot json\n")
        .expect("overwrite snapshots");

    let mut runner = ReplayRunner::new(config, paths).expect("runner created");
    let err = runner.run().expect_err("bad line");
    assert!(matches!(err, RunnerError::Snapshot { line: 2, .. }));
}
