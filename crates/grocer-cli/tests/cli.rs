use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const RECEIPT: &str = "FRESH MART\nOrganic Bananas\n$2.99\nWhole Milk\n$4.50\nSales Tax\n$0.60\nTOTAL\n$8.09\n";

/// A scratch directory with an empty config file, so tests never read the user's config.
fn workspace() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");
    fs::write(&config, "{}").unwrap();
    (dir, config)
}

fn grocer(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("grocer").unwrap();
    cmd.arg("--config").arg(config);
    cmd
}

#[test]
fn scan_prints_text_summary() {
    let (dir, config) = workspace();
    let input = dir.path().join("receipt.txt");
    fs::write(&input, RECEIPT).unwrap();

    grocer(&config)
        .args(["scan", "--format", "text", "--date", "2024-03-04"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Store: FRESH MART"))
        .stdout(predicate::str::contains("Date: 2024-03-04 (Monday)"))
        .stdout(predicate::str::contains("Organic Bananas"))
        .stdout(predicate::str::contains("Produce"))
        .stdout(predicate::str::contains("Dairy"))
        .stdout(predicate::str::contains("Items: 2  Total: $7.49"))
        .stdout(predicate::str::contains("TOTAL").not());
}

#[test]
fn scan_reads_stdin_as_json() {
    let (_dir, config) = workspace();

    grocer(&config)
        .args(["scan", "-", "--store", "Corner Shop", "--date", "2024-03-04"])
        .write_stdin(RECEIPT)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""store": "Corner Shop""#))
        .stdout(predicate::str::contains(r#""Day": "Monday""#))
        .stdout(predicate::str::contains(r#""Price": "4.50""#))
        .stdout(predicate::str::contains(r#""excluded": 2"#));
}

#[test]
fn scan_csv_has_fixed_columns() {
    let (dir, config) = workspace();
    let input = dir.path().join("receipt.txt");
    fs::write(&input, RECEIPT).unwrap();

    grocer(&config)
        .args(["scan", "--format", "csv", "--date", "2024-03-04"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Date,Day,Store,Item,Price,Category\n"))
        .stdout(predicate::str::contains(
            "2024-03-04,Monday,FRESH MART,Organic Bananas,2.99,Produce",
        ));
}

#[test]
fn scan_inline_layout() {
    let (_dir, config) = workspace();

    grocer(&config)
        .args(["scan", "-", "--strategy", "inline", "--format", "csv"])
        .args(["--date", "2024-03-05"])
        .write_stdin("Bread 3.49\nEggs $5.99\nTax 0.61\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-03-05,Tuesday,Unknown,Bread,3.49,Bakery"))
        .stdout(predicate::str::contains("Eggs,5.99,Dairy"))
        .stdout(predicate::str::contains("Tax").not());
}

#[test]
fn scan_accepts_carriage_return_line_breaks() {
    let (_dir, config) = workspace();

    grocer(&config)
        .args(["scan", "-", "--format", "csv", "--date", "2024-03-04"])
        .write_stdin(RECEIPT.replace('\n', "\r"))
        .assert()
        .success()
        .stdout(predicate::str::contains("FRESH MART,Whole Milk,4.50,Dairy"));
}

#[test]
fn scan_skips_prices_with_extra_digits() {
    let (_dir, config) = workspace();

    grocer(&config)
        .args(["scan", "-", "--format", "csv", "--store", "Butcher"])
        .write_stdin("Ground Beef\n$12.999\nLamb Chops\n$9.50\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Lamb Chops,9.50,Meat & Seafood"))
        .stdout(predicate::str::contains("Ground Beef").not());
}

#[test]
fn scan_without_items_is_not_an_error() {
    let (_dir, config) = workspace();

    grocer(&config)
        .args(["scan", "-"])
        .write_stdin("Thank you\nfor shopping\n")
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("No items detected in 2 lines"));
}

#[test]
fn scan_blank_input_fails() {
    let (_dir, config) = workspace();

    grocer(&config)
        .args(["scan", "-"])
        .write_stdin("   \n\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no text detected"));
}

#[test]
fn scan_missing_file_fails() {
    let (dir, config) = workspace();

    grocer(&config)
        .arg("scan")
        .arg(dir.path().join("nope.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn scan_appends_to_ledger_with_single_header() {
    let (dir, config) = workspace();
    let ledger = dir.path().join("ledger.csv");

    for _ in 0..2 {
        grocer(&config)
            .args(["scan", "-", "--date", "2024-03-04", "--append"])
            .arg(&ledger)
            .write_stdin(RECEIPT)
            .assert()
            .success();
    }

    let contents = fs::read_to_string(&ledger).unwrap();
    assert_eq!(contents.matches("Date,Day,Store,Item,Price,Category").count(), 1);
    assert_eq!(contents.lines().count(), 5);
}

#[test]
fn scan_append_without_path_needs_config() {
    let (_dir, config) = workspace();

    grocer(&config)
        .args(["scan", "-", "--append"])
        .write_stdin(RECEIPT)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No ledger path given"));
}

#[test]
fn categorize_prints_tab_separated_labels() {
    let (_dir, config) = workspace();

    grocer(&config)
        .args(["categorize", "Tortilla Chips", "Dish Soap", "Mystery"])
        .assert()
        .success()
        .stdout("Tortilla Chips\tBakery\nDish Soap\tHousehold\nMystery\tOther\n");
}

#[test]
fn categorize_uses_configured_taxonomy() {
    let (dir, _) = workspace();
    let config = dir.path().join("custom.json");
    fs::write(
        &config,
        r#"{"taxonomy": {"categories": [{"label": "Treats", "keywords": ["Chips"]}], "default_label": "Misc"}}"#,
    )
    .unwrap();

    grocer(&config)
        .args(["categorize", "--json", "Tortilla Chips", "Milk"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""category": "Treats""#))
        .stdout(predicate::str::contains(r#""category": "Misc""#));
}

#[test]
fn config_set_then_get() {
    let (_dir, config) = workspace();

    grocer(&config)
        .args(["config", "set", "parser.strategy", "whitespace"])
        .assert()
        .success();

    grocer(&config)
        .args(["config", "get", "parser.strategy"])
        .assert()
        .success()
        .stdout("\"whitespace\"\n");

    grocer(&config)
        .args(["scan", "-", "--format", "csv", "--store", "Deli"])
        .write_stdin("Sourdough 1,204.50\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Deli,Sourdough,1204.50,Other"));
}

#[test]
fn config_set_rejects_invalid_value() {
    let (_dir, config) = workspace();

    grocer(&config)
        .args(["config", "set", "parser.strategy", "sideways"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid value for parser.strategy"));
}

#[test]
fn config_get_unknown_key_fails() {
    let (_dir, config) = workspace();

    grocer(&config)
        .args(["config", "get", "parser.nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration key not found"));
}

#[test]
fn config_init_refuses_to_overwrite() {
    let (dir, config) = workspace();
    let target = dir.path().join("nested").join("grocer.json");

    grocer(&config)
        .args(["config", "init", "--output"])
        .arg(&target)
        .assert()
        .success();
    assert!(target.exists());

    grocer(&config)
        .args(["config", "init", "--output"])
        .arg(&target)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn batch_writes_outputs_and_summary() {
    let (dir, config) = workspace();
    let inbox = dir.path().join("inbox");
    let out = dir.path().join("out");
    fs::create_dir_all(&inbox).unwrap();
    fs::write(inbox.join("monday.txt"), RECEIPT).unwrap();
    fs::write(inbox.join("blurry.txt"), "smudge\n").unwrap();
    fs::write(inbox.join("notes.md"), RECEIPT).unwrap();

    let pattern = format!("{}/*", inbox.display());
    grocer(&config)
        .args(["batch", &pattern, "--summary", "--format", "csv"])
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 files"));

    assert!(out.join("monday.csv").exists());
    assert!(!out.join("blurry.csv").exists());

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    assert!(summary.starts_with("filename,status,store,items,total,excluded,processing_time_ms,error"));
    assert!(summary.contains("monday.txt,success,FRESH MART,2,7.49,2,"));
    assert!(summary.contains("blurry.txt,empty,,0,"));
}

#[test]
fn batch_stops_on_blank_file_unless_told_to_continue() {
    let (dir, config) = workspace();
    fs::write(dir.path().join("a.txt"), RECEIPT).unwrap();
    fs::write(dir.path().join("b.txt"), "\n\n").unwrap();
    let pattern = format!("{}/*.txt", dir.path().display());

    grocer(&config)
        .args(["batch", &pattern])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Processing failed"));

    grocer(&config)
        .args(["batch", &pattern, "--continue-on-error"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 failed"));
}
