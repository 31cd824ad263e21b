//! Integration tests for document dispatch and analysis.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use pdt_cli::pipeline::{AnalyzeRequest, analyze_path};
use pdt_cli::types::InputKind;
use pdt_extract::{AcquisitionError, ExtractOptions};
use pdt_ingest::write_template;
use pdt_model::{AnalysisSource, Period, Strategy, TraceReason};

fn temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let stamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("pdt_cli_pipeline_{stamp}"));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn temp_file(name: &str, contents: &[u8]) -> PathBuf {
    let path = temp_dir().join(name);
    fs::write(&path, contents).expect("write file");
    path
}

fn cleanup(path: &Path) {
    let _ = fs::remove_file(path);
    if let Some(parent) = path.parent() {
        let _ = fs::remove_dir_all(parent);
    }
}

fn request(path: &Path) -> AnalyzeRequest {
    AnalyzeRequest {
        path: path.to_path_buf(),
        current_year: 2024,
        options: ExtractOptions::default(),
        ai_result: None,
    }
}

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 11, d).unwrap()
}

#[test]
fn plain_text_runs_the_engine() {
    let path = temp_file(
        "plan.txt",
        b"Lundi 04/11/2024\n12 INT CUISINE\nMardi 05/11/2024\n14 EXT PARC\n",
    );
    let analysis = analyze_path(&request(&path)).expect("analyze");

    assert_eq!(analysis.input, InputKind::Text);
    assert_eq!(analysis.document, "plan.txt");
    assert_eq!(analysis.result.source, AnalysisSource::Engine);
    insta::assert_snapshot!(analysis.headline(), @"2 shooting days, 2 sequences, 04/11/2024 - 05/11/2024");
    assert_eq!(analysis.schedule.day(date(4)).unwrap().sequences, ["12"]);
    assert_eq!(analysis.schedule.day(date(5)).unwrap().sequences, ["14"]);

    let first = &analysis.result.trace.events()[0];
    assert_eq!(first.strategy, Strategy::Oracle);
    assert_eq!(first.reason, TraceReason::OracleFailure);
    cleanup(&path);
}

#[test]
fn fragments_are_rebuilt_into_lines() {
    let json = r#"[
        {"page": 1, "x": 60, "y": 701, "text": "04/11/2024"},
        {"page": 1, "x": 10, "y": 700, "text": "Lundi"},
        {"page": 1, "x": 10, "y": 680, "text": "12 INT CUISINE"},
        {"page": 1, "x": 10, "y": 660, "text": "Mardi 05/11/2024"}
    ]"#;
    let path = temp_file("plan.json", json.as_bytes());
    let analysis = analyze_path(&request(&path)).expect("analyze");

    assert_eq!(analysis.input, InputKind::Fragments);
    assert_eq!(analysis.result.date_count, 2);
    assert_eq!(analysis.result.dates[0].raw, "04/11/2024");
    assert_eq!(analysis.result.dates[0].line, 0);
    assert_eq!(analysis.schedule.day(date(4)).unwrap().sequences, ["12"]);
    cleanup(&path);
}

#[test]
fn conforming_spreadsheet_is_a_matrix() {
    let mut contents = Vec::new();
    write_template(&mut contents, Some((date(4), date(17)))).expect("template");
    let path = temp_file("matrix.csv", &contents);
    let analysis = analyze_path(&request(&path)).expect("analyze");

    assert_eq!(analysis.input, InputKind::Matrix);
    assert_eq!(analysis.result.source, AnalysisSource::Matrix);
    assert_eq!(analysis.schedule.days.len(), 14);
    insta::assert_snapshot!(analysis.headline(), @"10 shooting days, 0 sequences, 04/11/2024 - 15/11/2024");
    cleanup(&path);
}

#[test]
fn free_form_spreadsheet_is_flattened() {
    let contents = "Jour,Date,Séquences\nJ1,Lundi 10/11/2024,12 INT\nJ2,Mardi 11/11/2024,14\n";
    let path = temp_file("libre.csv", contents.as_bytes());
    let analysis = analyze_path(&request(&path)).expect("analyze");

    assert_eq!(analysis.input, InputKind::Spreadsheet);
    assert_eq!(analysis.result.source, AnalysisSource::Engine);
    assert_eq!(analysis.result.date_count, 2);
    assert_eq!(
        analysis.result.period,
        Period::Range {
            start: date(10),
            end: date(11)
        }
    );
    assert_eq!(analysis.schedule.day(date(10)).unwrap().sequences, ["12"]);
    cleanup(&path);
}

#[test]
fn saved_ai_result_supersedes_the_engine() {
    let document = temp_file("plan.txt", b"Lundi 04/11/2024\n");
    let ai = temp_file(
        "ai.json",
        br#"{"dates": ["04/11/2024", "05/11/2024", "06/11/2024"], "sequencesCount": 7}"#,
    );
    let analysis = analyze_path(&AnalyzeRequest {
        ai_result: Some(ai.clone()),
        ..request(&document)
    })
    .expect("analyze");

    assert_eq!(analysis.result.source, AnalysisSource::Oracle);
    insta::assert_snapshot!(analysis.headline(), @"3 shooting days, 7 sequences, 04/11/2024 - 06/11/2024");
    assert_eq!(analysis.schedule.shoot_day_count(), 3);
    cleanup(&document);
    cleanup(&ai);
}

#[test]
fn missing_ai_result_falls_back() {
    let document = temp_file("plan.txt", b"Lundi 04/11/2024\nMardi 05/11/2024\n");
    let analysis = analyze_path(&AnalyzeRequest {
        ai_result: Some(document.with_file_name("absent.json")),
        ..request(&document)
    })
    .expect("analyze");

    assert_eq!(analysis.result.source, AnalysisSource::Engine);
    assert_eq!(analysis.result.date_count, 2);
    let first = &analysis.result.trace.events()[0];
    assert_eq!(first.reason, TraceReason::OracleFailure);
    assert!(first.value.starts_with("AI pre-pass unavailable"));
    cleanup(&document);
}

#[test]
fn missing_document_is_an_error() {
    let path = temp_dir().join("absent.txt");
    let err = analyze_path(&request(&path)).unwrap_err();
    assert!(matches!(err, AcquisitionError::Io(_)));
    cleanup(&path);
}
