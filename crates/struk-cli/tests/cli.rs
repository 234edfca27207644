use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// A `struk` command that never reads the user's real configuration.
fn struk(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("struk").unwrap();
    cmd.env("XDG_CONFIG_HOME", home.path())
        .env("HOME", home.path());
    cmd
}

#[test]
fn test_parse_prints_json_record() {
    let home = TempDir::new().unwrap();
    struk(&home)
        .arg("parse")
        .arg(fixture("warung.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"merchant\": \"WARUNG MAKAN SEDERHANA\""))
        .stdout(predicate::str::contains("\"total\": \"25000\""))
        .stdout(predicate::str::contains("\"category\": \"Food & Dining\""))
        .stdout(predicate::str::contains("\"id\": \"receipt_"));
}

#[test]
fn test_parse_text_format() {
    let home = TempDir::new().unwrap();
    struk(&home)
        .args(["parse", "-f", "text"])
        .arg(fixture("kedai.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Date: 2024-03-12"))
        .stdout(predicate::str::contains("KOPI SUSU x2  Rp 18.000"))
        .stdout(predicate::str::contains("Total: Rp 64.380"));
}

#[test]
fn test_parse_reads_stdin() {
    let home = TempDir::new().unwrap();
    struk(&home)
        .args(["parse", "-", "--confidence", "87", "--no-categorize"])
        .write_stdin("APOTEK SEHAT\nObat Batuk 35.000\nTotal: 35.500\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"confidence\": 0.87"))
        .stdout(predicate::str::contains("\"category\": \"Other\""));
}

#[test]
fn test_parse_shows_warnings() {
    let home = TempDir::new().unwrap();
    struk(&home)
        .args(["parse", "--show-warnings"])
        .arg(fixture("warung.txt"))
        .assert()
        .success()
        .stderr(predicate::str::contains("Could not extract date"));
}

#[test]
fn test_parse_writes_output_file() {
    let home = TempDir::new().unwrap();
    let out = home.path().join("receipt.csv");

    struk(&home)
        .args(["parse", "-f", "csv", "-o"])
        .arg(&out)
        .arg(fixture("indomaret.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Output written to"));

    let csv = fs::read_to_string(&out).unwrap();
    assert_eq!(csv.lines().count(), 4);
    assert!(csv.contains("2024-01-15,INDOMARET CABANG KEMANG,Groceries,45000,Susu Ultra 1L,1,15000"));
}

#[test]
fn test_parse_missing_file_fails() {
    let home = TempDir::new().unwrap();
    struk(&home)
        .args(["parse", "no-such-receipt.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn test_categorize_merchant() {
    let home = TempDir::new().unwrap();
    struk(&home)
        .args(["categorize", "--merchant", "Apotek Sehat"])
        .assert()
        .success()
        .stdout(predicate::str::diff("Healthcare\n"));

    struk(&home)
        .args(["categorize", "-m", "Bu Sri", "--item", "Beras 5kg"])
        .assert()
        .success()
        .stdout(predicate::str::diff("Groceries\n"));
}

#[test]
fn test_categorize_list() {
    let home = TempDir::new().unwrap();
    struk(&home)
        .args(["categorize", "--list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Food & Dining"))
        .stdout(predicate::str::contains("Entertainment"));
}

#[test]
fn test_batch_writes_outputs_and_summary() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("in");
    let output = home.path().join("out");
    fs::create_dir_all(&input).unwrap();
    for name in ["warung.txt", "indomaret.txt", "kedai.txt"] {
        fs::copy(fixture(name), input.join(name)).unwrap();
    }

    struk(&home)
        .arg("batch")
        .arg(format!("{}/*.txt", input.display()))
        .arg("-o")
        .arg(&output)
        .args(["--summary", "-j", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 successful"))
        .stdout(predicate::str::contains("Total spent: Rp 134.380"));

    assert!(output.join("warung.json").exists());
    assert!(output.join("kedai.json").exists());

    let summary = fs::read_to_string(output.join("summary.csv")).unwrap();
    assert_eq!(summary.lines().count(), 4);
    assert!(summary.contains("kedai.txt,success,KEDAI KOPI SENJA,2024-03-12,Groceries,64380,2,0"));
}

#[test]
fn test_batch_stops_on_error_unless_told_to_continue() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("in");
    fs::create_dir_all(&input).unwrap();
    fs::copy(fixture("warung.txt"), input.join("warung.txt")).unwrap();
    fs::write(input.join("blank.txt"), "\n  \n").unwrap();
    let pattern = format!("{}/*.txt", input.display());

    struk(&home)
        .args(["batch", &pattern])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No text in file"));

    struk(&home)
        .args(["batch", &pattern, "--continue-on-error"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 successful, 1 failed"));
}

#[test]
fn test_batch_without_matches_fails() {
    let home = TempDir::new().unwrap();
    let pattern = format!("{}/*.txt", home.path().display());

    struk(&home)
        .args(["batch", &pattern])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching files"));
}

#[test]
fn test_config_round_trip() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("struk.json");
    let config = config.to_str().unwrap();

    struk(&home)
        .args(["-c", config, "config", "init"])
        .assert()
        .success();

    struk(&home)
        .args(["-c", config, "config", "get", "display.currency"])
        .assert()
        .success()
        .stdout(predicate::str::diff("\"IDR\"\n"));

    struk(&home)
        .args(["-c", config, "config", "set", "parsing.auto_categorize", "false"])
        .assert()
        .success();

    struk(&home)
        .args(["-c", config, "parse"])
        .arg(fixture("warung.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"category\": \"Other\""));

    struk(&home)
        .args(["-c", config, "config", "set", "display.nope", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration key not found"));
}

#[test]
fn test_config_set_unset_optional_key() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("struk.json");
    let config = config.to_str().unwrap();

    struk(&home).args(["-c", config, "config", "init"]).assert().success();

    struk(&home)
        .args(["-c", config, "config", "get", "ocr.blacklist"])
        .assert()
        .success()
        .stdout(predicate::str::diff("null\n"));

    struk(&home)
        .args(["-c", config, "config", "set", "ocr.blacklist", "\"|\""])
        .assert()
        .success();

    struk(&home)
        .args(["-c", config, "config", "get", "ocr.blacklist"])
        .assert()
        .success()
        .stdout(predicate::str::diff("\"|\"\n"));
}

#[test]
fn test_config_init_refuses_to_overwrite() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("struk.json");
    let config = config.to_str().unwrap();

    struk(&home).args(["-c", config, "config", "init"]).assert().success();
    struk(&home)
        .args(["-c", config, "config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
    struk(&home)
        .args(["-c", config, "config", "init", "--force"])
        .assert()
        .success();
}
