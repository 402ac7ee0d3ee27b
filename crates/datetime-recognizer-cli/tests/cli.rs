use assert_cmd::Command;
use predicates::prelude::*;

const REFERENCE: &str = "2016-11-07T16:12:00";

fn dtr() -> Command {
    Command::cargo_bin("dtr").unwrap()
}

fn results(output: &[u8]) -> serde_json::Value {
    serde_json::from_slice(output).unwrap()
}

#[test]
fn test_recognize_argument() {
    let output = dtr()
        .args(["--reference", REFERENCE, "see you tomorrow at noon"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json = results(&output.stdout);
    let list = json.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["type"], "datetime");
    assert_eq!(list[0]["text"], "tomorrow at noon");
    assert_eq!(list[0]["start"], 8);
    assert_eq!(list[0]["resolution"]["form"], "single");
    assert_eq!(list[0]["resolution"]["values"]["timex"], "2016-11-08T12");
}

#[test]
fn test_recognize_stdin() {
    dtr()
        .args(["--reference", REFERENCE])
        .write_stdin("the meeting is on March 5, 2019")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"2019-03-05\""));
}

#[test]
fn test_lines_mode_prints_one_document_per_line() {
    let output = dtr()
        .args(["--reference", REFERENCE, "--lines", "--pretty"])
        .write_stdin("next Friday\nnothing here\n3 hours\n")
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1], "[]");
    let last: serde_json::Value = serde_json::from_str(lines[2]).unwrap();
    assert_eq!(last[0]["type"], "duration");
}

#[test]
fn test_detailed_output() {
    let output = dtr()
        .args(["--reference", REFERENCE, "--detailed", "next week"])
        .output()
        .unwrap();
    let json = results(&output.stdout);
    assert_eq!(json["timed_out"], false);
    assert!(json["dropped"].as_array().unwrap().is_empty());
    assert_eq!(json["results"][0]["type"], "dateperiod");
}

#[test]
fn test_skip_from_to_merge_flag() {
    let output = dtr()
        .args(["--reference", REFERENCE, "--skip-from-to-merge", "from Monday to Wednesday"])
        .output()
        .unwrap();
    let json = results(&output.stdout);
    assert_eq!(json.as_array().unwrap().len(), 2);
}

#[test]
fn test_british_culture_reads_day_first() {
    dtr()
        .args(["--reference", REFERENCE, "--culture", "en-gb", "due 05/03/2019"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2019-03-05"));
}

#[test]
fn test_unsupported_culture_fails() {
    dtr()
        .args(["--culture", "fr-fr", "demain"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported culture"));
}

#[test]
fn test_invalid_reference_fails() {
    dtr()
        .args(["--reference", "yesterday", "tomorrow"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid reference instant"));
}
