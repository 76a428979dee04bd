//! The `cryptovault` binary in headless mode.

use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cryptovault"))
        .args(args)
        .output()
        .expect("Failed to execute cryptovault")
}

fn run_json(args: &[&str]) -> serde_json::Value {
    let mut full = vec!["--headless", "--dump-json"];
    full.extend_from_slice(args);
    let output = run(&full);
    assert!(
        output.status.success(),
        "cryptovault failed with stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("Failed to parse JSON output")
}

#[test]
fn plain_text_frame() {
    let output = run(&["--headless", "--headless-size", "100x30"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines.len(), 30);
    assert!(lines[1].contains("CryptoVault"));
    assert!(lines[1].contains("Testimonials"));
    assert!(stdout.contains("Make your Crypto"));
}

#[test]
fn json_state_at_the_top() {
    let json = run_json(&[]);
    insta::assert_json_snapshot!(
        serde_json::json!({
            "width": json["width"],
            "height": json["height"],
            "breakpoint": json["breakpoint"],
            "scroll": json["scroll"],
            "active_section": json["active_section"],
            "scroll_top_visible": json["scroll_top_visible"],
            "testimonial": json["testimonial"],
        }),
        @r###"
    {
      "active_section": "home",
      "breakpoint": "medium",
      "height": 24,
      "scroll": 0,
      "scroll_top_visible": false,
      "testimonial": 0,
      "width": 80
    }
    "###
    );

    let sections = json["sections"].as_array().unwrap();
    let ids: Vec<_> = sections.iter().map(|s| s["id"].as_str().unwrap()).collect();
    assert_eq!(
        ids,
        ["home", "features", "demo", "security", "interactive", "testimonials", "download"]
    );
    // declared order is document order and sections never overlap
    for pair in sections.windows(2) {
        let end = pair[0]["offset_top"].as_u64().unwrap() + pair[0]["height"].as_u64().unwrap();
        assert!(pair[1]["offset_top"].as_u64().unwrap() >= end);
    }
    assert_eq!(json["lines"].as_array().unwrap().len(), 24);
}

#[test]
fn section_flag_settles_on_the_section() {
    let json = run_json(&["--headless-size", "120x40", "--section", "security"]);
    assert_eq!(json["breakpoint"], "wide");
    assert_eq!(json["active_section"], "security");
    assert_eq!(json["scroll_top_visible"], true);

    let security = json["sections"]
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["id"] == "security")
        .unwrap();
    let top = security["offset_top"].as_u64().unwrap();
    assert_eq!(json["scroll"].as_u64().unwrap(), top - 2);
}

#[test]
fn reference_units_track_in_pixels() {
    let json = run_json(&["--reference-units"]);
    assert_eq!(json["scroll"], 0);
    assert_eq!(json["active_section"], "home");

    // 600 px is 30 rows of 20 px
    let json = run_json(&["--reference-units", "--scroll", "30"]);
    assert_eq!(json["scroll_top_visible"], false);
    let json = run_json(&["--reference-units", "--scroll", "31"]);
    assert_eq!(json["scroll_top_visible"], true);
}

#[test]
fn scroll_flag() {
    let json = run_json(&["--scroll", "25"]);
    assert_eq!(json["scroll"], 25);
    assert_eq!(json["scroll_top_visible"], true);
}

#[test]
fn log_file_records_page_events() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("cryptovault.log");
    let output = run(&[
        "--headless",
        "--section",
        "demo",
        "--log-file",
        log.to_str().unwrap(),
    ]);
    assert!(output.status.success());

    let text = std::fs::read_to_string(&log).unwrap();
    assert!(text.contains("page_mounted"), "{text}");
    assert!(text.contains("section_changed"), "{text}");
    assert!(text.contains("headless frame 80x24"), "{text}");
    // nothing leaks into the frame
    assert!(!String::from_utf8_lossy(&output.stdout).contains("page_mounted"));
}

#[test]
fn help_and_errors() {
    let help = run(&["--help"]);
    assert!(help.status.success());
    assert!(String::from_utf8_lossy(&help.stdout).contains("--restart-rotation"));

    let bad = run(&["--section", "pricing"]);
    assert_eq!(bad.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&bad.stderr).contains("unknown section: pricing"));
}
