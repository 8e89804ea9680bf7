use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const AS_OF: &str = "2024-06-01T12:00:00Z";

struct CliTestEnv {
    _temp_dir: TempDir,
    home: PathBuf,
    xdg_config: PathBuf,
    xdg_state: PathBuf,
}

impl CliTestEnv {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let base = temp_dir.path().to_path_buf();
        let home = base.join("home");
        let xdg_config = base.join("xdg-config");
        let xdg_state = base.join("xdg-state");

        fs::create_dir_all(&home).expect("failed to create HOME");
        fs::create_dir_all(&xdg_config).expect("failed to create XDG_CONFIG_HOME");
        fs::create_dir_all(&xdg_state).expect("failed to create XDG_STATE_HOME");

        Self {
            _temp_dir: temp_dir,
            home,
            xdg_config,
            xdg_state,
        }
    }

    fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.home.join(name);
        fs::write(&path, contents).expect("failed to write fixture");
        path
    }

    fn write_config(&self, contents: &str) {
        let dir = self.xdg_config.join("social-autopilot");
        fs::create_dir_all(&dir).expect("failed to create config dir");
        fs::write(dir.join("config.toml"), contents).expect("failed to write config");
    }
}

fn run_report(env: &CliTestEnv, args: &[&str]) -> Output {
    let bin_path = PathBuf::from(assert_cmd::cargo::cargo_bin!("autopilot-report"));

    Command::new(bin_path)
        .args(args)
        .env("HOME", &env.home)
        .env("XDG_CONFIG_HOME", &env.xdg_config)
        .env("XDG_STATE_HOME", &env.xdg_state)
        .env_remove("RUST_LOG")
        .output()
        .unwrap_or_else(|e| panic!("failed to execute autopilot-report: {e}"))
}

fn assert_success(args: &[&str], output: &Output) {
    assert!(
        output.status.success(),
        "autopilot-report {:?} failed\nstdout:\n{}\nstderr:\n{}",
        args,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
}

fn json_output(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

fn path_arg(path: &Path) -> &str {
    path.to_str().expect("utf-8 path")
}

#[test]
fn demo_report_exports_sorted_json() {
    let env = CliTestEnv::new();
    let args = ["--demo", "--as-of", AS_OF, "--export", "json"];
    let output = run_report(&env, &args);
    assert_success(&args, &output);

    let json = json_output(&output);
    let contacts = json["contacts"].as_array().expect("contacts array");
    assert_eq!(contacts.len(), 7);
    assert_eq!(json["summary"]["contactCount"], 7);
    assert_eq!(json["simulated"], false);

    let scores: Vec<u64> = contacts
        .iter()
        .map(|c| c["healthScore"].as_u64().expect("healthScore"))
        .collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn simulate_adds_thirty_days() {
    let env = CliTestEnv::new();
    let live_args = ["--demo", "--as-of", AS_OF, "--export", "json"];
    let sim_args = ["--demo", "--as-of", AS_OF, "--export", "json", "--simulate"];

    let live = json_output(&run_report(&env, &live_args));
    let output = run_report(&env, &sim_args);
    assert_success(&sim_args, &output);
    let simulated = json_output(&output);

    assert_eq!(simulated["simulated"], true);
    for contact in simulated["contacts"].as_array().expect("contacts array") {
        let name = contact["name"].as_str().expect("name");
        let before = live["contacts"]
            .as_array()
            .expect("contacts array")
            .iter()
            .find(|c| c["name"] == name)
            .expect("same contact in live run");
        assert_eq!(
            contact["daysSinceLastInteraction"].as_u64().unwrap(),
            before["daysSinceLastInteraction"].as_u64().unwrap() + 30
        );
        assert_eq!(contact["trendDirection"], "down");
    }
}

#[test]
fn input_file_with_custom_self_identity() {
    let env = CliTestEnv::new();
    let input = env.write(
        "events.json",
        r#"[
            {"timestamp": "2024-05-31 08:00:00", "sender": "Me", "receiver": "Ana", "message": "coffee?"},
            {"timestamp": "2024-05-31T10:00:00Z", "sender": "Ana", "receiver": "Me", "message": "yes!"}
        ]"#,
    );
    let args = [
        "--input",
        path_arg(&input),
        "--self-id",
        "Me",
        "--as-of",
        AS_OF,
        "--export",
        "json",
    ];
    let output = run_report(&env, &args);
    assert_success(&args, &output);

    let json = json_output(&output);
    let ana = &json["contacts"][0];
    assert_eq!(ana["name"], "Ana");
    assert_eq!(ana["avgResponseDelay"], 2);
    assert_eq!(ana["initiationRatio"], 50);
    assert_eq!(ana["state"], "Thriving");
}

#[test]
fn malformed_timestamp_fails_the_run() {
    let env = CliTestEnv::new();
    let input = env.write(
        "events.json",
        r#"[
            {"timestamp": "2024-05-31 08:00:00", "sender": "You", "receiver": "Ana", "message": "hi"},
            {"timestamp": "last tuesday", "sender": "Ana", "receiver": "You", "message": "hey"}
        ]"#,
    );
    let output = run_report(&env, &["--input", path_arg(&input), "--as-of", AS_OF]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("malformed input at event 1"), "stderr: {stderr}");
}

#[test]
fn feature_bundle_is_clamped() {
    let env = CliTestEnv::new();
    let bundle = env.write(
        "features.json",
        r#"{"contacts": [{"name": "Group chat", "health": 180, "days_since_last": 2, "messages_last30": 40}]}"#,
    );
    let args = ["--features", path_arg(&bundle), "--export", "json"];
    let output = run_report(&env, &args);
    assert_success(&args, &output);

    let json = json_output(&output);
    assert_eq!(json["contacts"][0]["healthScore"], 100);
    assert_eq!(json["contacts"][0]["state"], "Thriving");
    assert_eq!(json["summary"]["stateCounts"]["thriving"], 1);
}

#[test]
fn as_of_conflicts_with_feature_bundle() {
    let env = CliTestEnv::new();
    let bundle = env.write(
        "features.json",
        r#"{"contacts": [{"name": "Ana", "health": 60}]}"#,
    );
    let output = run_report(&env, &["--features", path_arg(&bundle), "--as-of", AS_OF]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cannot be used with"), "stderr: {stderr}");
}

#[test]
fn invalid_config_weights_are_rejected() {
    let env = CliTestEnv::new();
    env.write_config("[scoring]\nrecency_weight = 0.9\n");

    let output = run_report(&env, &["--demo", "--as-of", AS_OF]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("sum to 1.0"), "stderr: {stderr}");
}

#[test]
fn markdown_and_terminal_outputs() {
    let env = CliTestEnv::new();

    let md_args = ["--demo", "--as-of", AS_OF, "--export", "md"];
    let output = run_report(&env, &md_args);
    assert_success(&md_args, &output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("# RELATIONSHIP HEALTH"));
    assert!(stdout.contains("| Sarah Chen |"));

    let term_args = ["--demo", "--as-of", AS_OF];
    let output = run_report(&env, &term_args);
    assert_success(&term_args, &output);
    assert!(String::from_utf8_lossy(&output.stdout).contains("Luna Zhang"));
}

#[test]
fn unknown_export_format_fails() {
    let env = CliTestEnv::new();
    let output = run_report(&env, &["--demo", "--as-of", AS_OF, "--export", "xml"]);
    assert!(!output.status.success());
}
