use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

const JOB: &str = r#"{
  "name": "paint-line",
  "attributes": [
    { "column": "Color", "changeoverTime": 20 }
  ],
  "orders": [
    { "id": "A", "values": { "Color": "Red" } },
    { "id": "B", "values": { "Color": "Blue" } },
    { "id": "C", "values": { "Color": "Red" } }
  ]
}"#;

struct TestContext {
    dir: TempDir,
    job_path: PathBuf,
}

impl TestContext {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let job_path = dir.path().join("job.json");
        fs::write(&job_path, JOB).unwrap();
        Self { dir, job_path }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

fn strip_ansi(s: &str) -> String {
    let re = Regex::new(r"\x1b\[[0-9;]*m").unwrap();
    re.replace_all(s, "").to_string()
}

fn run(args: &[&str]) -> (bool, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_changeover"))
        .args(args)
        .output()
        .expect("Failed to run binary");
    let stdout = strip_ansi(&String::from_utf8_lossy(&output.stdout));
    (output.status.success(), stdout)
}

fn p(path: &Path) -> &str {
    path.to_str().unwrap()
}

fn parse_totals(stdout: &str) -> (f64, f64) {
    let re = Regex::new(r"Work: ([0-9.]+) -> ([0-9.]+)").unwrap();
    let caps = re.captures(stdout).expect("No totals line in output");
    (caps[1].parse().unwrap(), caps[2].parse().unwrap())
}

#[test]
fn test_cli_optimize_reports_savings() {
    let ctx = TestContext::new();
    let (ok, stdout) = run(&["optimize", p(&ctx.job_path)]);
    assert!(ok, "optimize failed:\n{}", stdout);

    let (before, after) = parse_totals(&stdout);
    assert_eq!(before, 40.0);
    assert_eq!(after, 20.0);
}

#[test]
fn test_cli_optimize_writes_json() {
    let ctx = TestContext::new();
    let out = ctx.path("result.json");
    let (ok, _) = run(&["optimize", p(&ctx.job_path), "--output", p(&out)]);
    assert!(ok);

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json["totalBefore"], 40.0);
    assert_eq!(json["totalAfter"], 20.0);
    assert_eq!(json["savingsPercent"], 50.0);
    assert_eq!(json["sequence"].as_array().unwrap().len(), 3);
    assert_eq!(json["sequence"][0]["sequenceNumber"], 1);
}

#[test]
fn test_cli_matrix_csv_is_applied() {
    let ctx = TestContext::new();
    let csv = ctx.path("matrix.csv");
    fs::write(&csv, "attribute,from,to,minutes\nColor,Red,Blue,2\nColor,Blue,Red,2\n").unwrap();

    let (ok, stdout) = run(&["optimize", p(&ctx.job_path), "--matrix", p(&csv)]);
    assert!(ok);
    let (before, after) = parse_totals(&stdout);
    assert_eq!(before, 4.0);
    assert_eq!(after, 2.0);
}

#[test]
fn test_cli_batch_and_strict() {
    let ctx = TestContext::new();
    let second = ctx.path("second.json");
    fs::write(&second, JOB.replace("\"Color\": \"Red\" } },\n    { \"id\": \"B\"", "\"Colour\": \"Red\" } },\n    { \"id\": \"B\"")).unwrap();

    let out = ctx.path("batch.json");
    let (ok, _) = run(&["optimize", p(&ctx.job_path), p(&second), "--output", p(&out)]);
    assert!(ok);
    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 2);

    let (ok, _) = run(&["optimize", p(&second), "--strict"]);
    assert!(!ok);
}

#[test]
fn test_cli_evaluate_keeps_order() {
    let ctx = TestContext::new();
    let (ok, stdout) = run(&["evaluate", p(&ctx.job_path)]);
    assert!(ok);
    assert!(stdout.contains("Work: 40.00"));

    let row = Regex::new(r"\|\s*1\s*\|\s*A\s*\|").unwrap();
    assert!(row.is_match(&stdout), "first row should be A:\n{}", stdout);
}

#[test]
fn test_cli_generate_then_optimize() {
    let ctx = TestContext::new();
    let job = ctx.path("synthetic.json");
    let (ok, _) = run(&[
        "generate",
        "--orders",
        "30",
        "--attributes",
        "3",
        "--groups",
        "2",
        "--seed",
        "5",
        p(&job),
    ]);
    assert!(ok);

    let (ok, stdout) = run(&["optimize", p(&job), "--objective", "downtime"]);
    assert!(ok);
    let (before, after) = parse_totals(&stdout);
    assert!(after <= before);
}

#[test]
fn test_cli_config_file_and_override() {
    let ctx = TestContext::new();
    let cfg = ctx.path("config.json");
    fs::write(&cfg, r#"{ "search": { "max_passes": 1 } }"#).unwrap();

    let (ok, stdout) = run(&["--config", p(&cfg), "optimize", p(&ctx.job_path)]);
    assert!(ok);
    let (_, after) = parse_totals(&stdout);
    assert_eq!(after, 20.0);

    let (ok, _) = run(&["--config", p(&ctx.path("missing.json")), "optimize", p(&ctx.job_path)]);
    assert!(!ok);
}

#[test]
fn test_cli_missing_job_fails() {
    let ctx = TestContext::new();
    let (ok, _) = run(&["optimize", p(&ctx.path("nope.json"))]);
    assert!(!ok);
}

#[test]
fn test_cli_evaluate_reads_config_file() {
    let ctx = TestContext::new();
    let job = ctx.path("with_matrix.json");
    let with_matrix = JOB.replace(
        "  \"orders\": [",
        "  \"matrix\": [\n    { \"attribute\": \"Color\", \"from\": \"Red\", \"to\": \"Blue\", \"minutes\": 2 },\n    { \"attribute\": \"Color\", \"from\": \"Blue\", \"to\": \"Red\", \"minutes\": 3 }\n  ],\n  \"orders\": [",
    );
    fs::write(&job, with_matrix).unwrap();
    let cfg = ctx.path("config.json");
    fs::write(&cfg, r#"{ "search": { "use_matrix": true } }"#).unwrap();

    let (ok, stdout) = run(&["evaluate", p(&job)]);
    assert!(ok);
    assert!(stdout.contains("Work: 40.00"), "{}", stdout);

    let (ok, stdout) = run(&["--config", p(&cfg), "evaluate", p(&job)]);
    assert!(ok);
    assert!(stdout.contains("Work: 5.00"), "{}", stdout);
}
