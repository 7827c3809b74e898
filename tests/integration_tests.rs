//! Integration tests for the loudscan pipeline
//!
//! These tests drive the full pipeline against a stub analyzer executable
//! that speaks ffmpeg's diagnostic format, so no real ffmpeg or audio
//! decoding is involved.

#![cfg(unix)]

use loudscan::config::Settings;
use loudscan::error::LoudscanError;
use loudscan::pipeline;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

// The scheduler mutates AV_LOG_FORCE_NOCOLOR process-wide; pipeline tests
// serialize on this lock.
static ENV_LOCK: Mutex<()> = Mutex::new(());

fn lock_env() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Diagnostic report the stub emits, matching ffmpeg's astats/ebur128 output
const STUB_REPORT: &str = "\
[Parsed_astats_0 @ 0x1] Overall
[Parsed_astats_0 @ 0x1] Peak level dB: -3.14
[Parsed_astats_0 @ 0x1] RMS level dB: -18.20
[Parsed_astats_0 @ 0x1] Noise floor dB: -inf
[Parsed_ebur128_1 @ 0x1] Summary:
  Integrated loudness:
    I: -16.50 LUFS
  Loudness range:
    LRA: 5.30 LU
    LRA low: -20.10 LUFS
    LRA high: -14.80 LUFS
  True peak:
    Peak: -2.90 dBFS
";

/// Write a stub analyzer script into `dir`
///
/// Handles the `-version` probe, fails for inputs whose name contains
/// "bad", and otherwise prints the canned report to stderr like ffmpeg.
fn write_stub_analyzer(dir: &Path) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let report = STUB_REPORT.replace('\n', "\\n");
    let script = format!(
        "#!/bin/sh\n\
         if [ \"$1\" = \"-version\" ]; then echo \"stub analyzer 1.0\"; exit 0; fi\n\
         input=\"\"\n\
         prev=\"\"\n\
         for a in \"$@\"; do\n\
           if [ \"$prev\" = \"-i\" ]; then input=\"$a\"; fi\n\
           prev=\"$a\"\n\
         done\n\
         case \"$input\" in\n\
           *bad*) printf 'decode error\\n' >&2; exit 1 ;;\n\
         esac\n\
         printf '{report}' >&2\n"
    );

    let path = dir.join("stub-analyzer");
    fs::write(&path, script).expect("Failed to write stub analyzer");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
        .expect("Failed to mark stub executable");
    path
}

fn create_test_settings(stub: &Path, input: &Path) -> Settings {
    Settings {
        inputs: vec![input.to_path_buf()],
        analyzer_command: stub.to_string_lossy().into_owned(),
        show_progress: false,
        print_table: false,
        ..Settings::default()
    }
}

#[test]
fn pipeline_produces_contract_json() {
    let _env = lock_env();
    let input_dir = TempDir::new().expect("Failed to create input temp dir");
    let output_dir = TempDir::new().expect("Failed to create output temp dir");
    let stub = write_stub_analyzer(output_dir.path());

    for name in ["a.wav", "b.flac", "c.mp3"] {
        fs::write(input_dir.path().join(name), b"\0").expect("Failed to write input");
    }

    let json_path = output_dir.path().join("scan.json");
    let mut settings = create_test_settings(&stub, input_dir.path());
    settings.json_path = Some(json_path.clone());

    let result = pipeline::run(&settings).expect("Pipeline should succeed");
    assert_eq!(result.total_files, 3);
    assert_eq!(result.successful, 3);
    assert_eq!(result.failed, 0);

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_path).expect("Failed to read JSON"))
            .expect("Should be valid JSON");
    assert_eq!(json["version"], "1.0");
    let files = json["files"].as_array().expect("files should be an array");
    assert_eq!(files.len(), 3);

    // Every record matches the end-to-end expectation for the stub report
    for record in files {
        assert_eq!(record["Peak"], serde_json::json!(-3.1));
        assert_eq!(record["RMS"], serde_json::json!(-18.2));
        assert_eq!(record["NoiseFloor"], "-inf");
        assert_eq!(record["TruePeak"], serde_json::json!(-2.9));
        assert_eq!(record["IntegratedLoudness"], serde_json::json!(-16.5));
        assert_eq!(record["LoudnessRange"], serde_json::json!(5.3));
        assert_eq!(record["LRALow"], serde_json::json!(-20.1));
        assert_eq!(record["LRAHigh"], serde_json::json!(-14.8));
        assert!(record.get("Error").is_none());
    }
}

#[test]
fn per_file_failures_do_not_abort_the_batch() {
    let _env = lock_env();
    let input_dir = TempDir::new().expect("Failed to create input temp dir");
    let output_dir = TempDir::new().expect("Failed to create output temp dir");
    let stub = write_stub_analyzer(output_dir.path());

    for name in ["one.wav", "bad.wav", "two.wav", "three.wav"] {
        fs::write(input_dir.path().join(name), b"\0").expect("Failed to write input");
    }

    let json_path = output_dir.path().join("scan.json");
    let mut settings = create_test_settings(&stub, input_dir.path());
    settings.json_path = Some(json_path.clone());

    let result = pipeline::run(&settings).expect("Pipeline should succeed overall");
    assert_eq!(result.total_files, 4);
    assert_eq!(result.successful, 3);
    assert_eq!(result.failed, 1);

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_path).expect("Failed to read JSON"))
            .expect("Should be valid JSON");
    let files = json["files"].as_array().expect("files should be an array");
    assert_eq!(files.len(), 4);

    let failed: Vec<_> = files
        .iter()
        .filter(|r| r.get("Error").is_some())
        .collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0]["Name"], "bad.wav");
    // The failed record keeps the contract shape with null metric fields
    assert_eq!(failed[0]["Peak"], serde_json::Value::Null);
}

#[test]
fn serial_mode_reports_in_input_order() {
    let _env = lock_env();
    let input_dir = TempDir::new().expect("Failed to create input temp dir");
    let output_dir = TempDir::new().expect("Failed to create output temp dir");
    let stub = write_stub_analyzer(output_dir.path());

    // Explicit file inputs pin the order; directory scans do not.
    let mut inputs = Vec::new();
    for name in ["z.wav", "a.wav", "m.wav"] {
        let path = input_dir.path().join(name);
        fs::write(&path, b"\0").expect("Failed to write input");
        inputs.push(path);
    }

    let json_path = output_dir.path().join("scan.json");
    let mut settings = create_test_settings(&stub, input_dir.path());
    settings.inputs = inputs;
    settings.serial = true;
    settings.json_path = Some(json_path.clone());

    let result = pipeline::run(&settings).expect("Pipeline should succeed");
    assert_eq!(result.successful, 3);

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_path).expect("Failed to read JSON"))
            .expect("Should be valid JSON");
    let names: Vec<&str> = json["files"]
        .as_array()
        .expect("files should be an array")
        .iter()
        .map(|r| r["Name"].as_str().expect("Name should be set"))
        .collect();
    assert_eq!(names, vec!["z.wav", "a.wav", "m.wav"]);
}

#[test]
fn csv_export_writes_header_and_rows() {
    let _env = lock_env();
    let input_dir = TempDir::new().expect("Failed to create input temp dir");
    let output_dir = TempDir::new().expect("Failed to create output temp dir");
    let stub = write_stub_analyzer(output_dir.path());

    fs::write(input_dir.path().join("track.wav"), b"\0").expect("Failed to write input");

    let csv_path = output_dir.path().join("scan.csv");
    let mut settings = create_test_settings(&stub, input_dir.path());
    settings.csv_path = Some(csv_path.clone());

    pipeline::run(&settings).expect("Pipeline should succeed");

    let csv = fs::read_to_string(&csv_path).expect("Failed to read CSV");
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("Name,Peak,RMS,NoiseFloor"));
    assert!(lines[1].starts_with("track.wav,-3.1,-18.2,-inf"));
}

#[test]
fn missing_analyzer_is_fatal_before_any_file() {
    let _env = lock_env();
    let input_dir = TempDir::new().expect("Failed to create input temp dir");
    fs::write(input_dir.path().join("track.wav"), b"\0").expect("Failed to write input");

    let mut settings = create_test_settings(
        Path::new("/nonexistent/loudscan-analyzer"),
        input_dir.path(),
    );
    settings.print_table = false;

    let err = pipeline::run(&settings).expect_err("Pipeline should fail fast");
    assert!(matches!(err, LoudscanError::ToolNotFound { .. }));
}

#[test]
fn empty_input_directory_is_a_clean_noop() {
    let _env = lock_env();
    let input_dir = TempDir::new().expect("Failed to create input temp dir");
    let output_dir = TempDir::new().expect("Failed to create output temp dir");
    let stub = write_stub_analyzer(output_dir.path());

    let settings = create_test_settings(&stub, input_dir.path());
    let result = pipeline::run(&settings).expect("Pipeline should succeed on empty input");
    assert_eq!(result.total_files, 0);
    assert_eq!(result.successful, 0);
    assert_eq!(result.failed, 0);
}

#[test]
fn nonexistent_input_path_fails_discovery() {
    let _env = lock_env();
    let output_dir = TempDir::new().expect("Failed to create output temp dir");
    let stub = write_stub_analyzer(output_dir.path());

    let mut settings = create_test_settings(&stub, Path::new("/nonexistent/music"));
    settings.print_table = false;

    let err = pipeline::run(&settings).expect_err("Pipeline should fail for missing input");
    assert!(matches!(err, LoudscanError::FileNotFound(_)));
}
