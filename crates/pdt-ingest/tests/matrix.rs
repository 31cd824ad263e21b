use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use pdt_ingest::{
    CellTable, IngestError, MatrixCell, MatrixColumn, flatten_table, parse_matrix,
    read_cell_table, read_cell_table_path, write_template,
};
use pdt_model::{AnalysisSource, DayType, Period};

fn temp_file(name: &str, contents: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let stamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("pdt_ingest_matrix_{stamp}"));
    fs::create_dir_all(&dir).expect("create temp dir");
    let path = dir.join(name);
    fs::write(&path, contents).expect("write file");
    path
}

fn header_line() -> String {
    MatrixColumn::ALL
        .iter()
        .map(|column| column.header())
        .collect::<Vec<_>>()
        .join(",")
}

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 11, d).unwrap()
}

#[test]
fn conforming_sheet_round_trip() {
    let contents = format!(
        "{}\n\
         11/11/2024,Tournage,\"1, 2, 3\",Int. Cuisine,Paris 18,\"Jean, Marie\",10 passants,Besoin camion\n\
         12/11/2024,Prépa,,,,,,\n\
         13/11/2024,Off,,,,,,\n\
         14/11/2024,Tournage,4;5A NULL,Ext. Parc,Studio A,Marc,,\n\
         pas de date,Tournage,99,,,,,\n\
         15/11/2024,Jour de repos,,,,,,\n\
         18/11/2024,,6,,,,,\n",
        header_line()
    );
    let path = temp_file("matrix.csv", &contents);
    let table = read_cell_table_path(&path).expect("read csv");
    let import = parse_matrix(&table).expect("parse matrix");

    assert_eq!(import.days.len(), 6);
    assert_eq!(import.skipped_rows, 1);
    let types: Vec<DayType> = import.days.iter().map(|d| d.day_type).collect();
    assert_eq!(
        types,
        [
            DayType::Shoot,
            DayType::Prep,
            DayType::Off,
            DayType::Shoot,
            DayType::Off,
            DayType::Shoot
        ]
    );
    assert_eq!(import.shoot_days().count(), 3);

    let first = &import.days[0];
    assert_eq!(first.sequences, ["1", "2", "3"]);
    assert_eq!(first.cast, ["Jean", "Marie"]);
    assert_eq!(first.set, "Int. Cuisine");
    assert_eq!(first.location, "Paris 18");
    assert_eq!(first.extras, "10 passants");
    assert_eq!(first.notes, "Besoin camion");
    assert_eq!(import.days[3].sequences, ["4", "5A"]);

    let ids: Vec<&str> = import.sequences.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["1", "2", "3", "4", "5A", "6"]);
    assert_eq!(import.sequences[3].date, Some(date(14)));
    assert_eq!(import.sequences[3].description.as_deref(), Some("Ext. Parc"));
    assert_eq!(import.sequences[5].description, None);

    let analysis = import.to_analysis();
    assert_eq!(analysis.source, AnalysisSource::Matrix);
    assert_eq!(analysis.date_count, 3);
    assert_eq!(analysis.sequence_count, 6);
    assert_eq!(
        analysis.period,
        Period::Range {
            start: date(11),
            end: date(18)
        }
    );
    assert_eq!(analysis.start_day_offset, 0);

    let _ = fs::remove_file(&path);
    let _ = fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn template_is_a_valid_matrix() {
    let mut out = Vec::new();
    write_template(&mut out, Some((date(4), date(17)))).expect("write template");
    let table = read_cell_table(out.as_slice()).expect("read template");
    let import = parse_matrix(&table).expect("parse template");

    assert_eq!(import.days.len(), 14);
    assert_eq!(import.shoot_days().count(), 10);
    assert!(import.sequences.is_empty());

    let mut examples = Vec::new();
    write_template(&mut examples, None).expect("write examples");
    let import = parse_matrix(&read_cell_table(examples.as_slice()).unwrap()).unwrap();
    assert_eq!(import.days.len(), 3);
    assert_eq!(import.sequences.len(), 6);
    insta::assert_snapshot!(import.to_analysis().period.to_string(), @"11/11/2024 - 12/11/2024");
}

#[test]
fn serial_date_cells_are_supported() {
    let headers = MatrixColumn::ALL
        .iter()
        .map(|c| c.header().to_string())
        .collect();
    let mut row = vec![MatrixCell::Empty; 8];
    row[0] = MatrixCell::Number(45607.0);
    row[2] = "7, 8".into();
    let table = CellTable::new(headers, vec![row]);
    let import = parse_matrix(&table).expect("parse matrix");
    assert_eq!(import.days[0].date, date(11));
    assert_eq!(import.days[0].day_type, DayType::Shoot);
}

#[test]
fn serial_dates_in_exported_csv() {
    let contents = format!(
        "{}\n45607,Tournage,1,,,,,\n45608,Tournage,2,,,,,\n45609.0,Off,,,,,,\n",
        header_line()
    );
    let table = read_cell_table(contents.as_bytes()).expect("read csv");
    let import = parse_matrix(&table).expect("parse matrix");

    assert_eq!(import.skipped_rows, 0);
    let dates: Vec<NaiveDate> = import.days.iter().map(|d| d.date).collect();
    assert_eq!(dates, [date(11), date(12), date(13)]);
    assert_eq!(import.sequences[1].date, Some(date(12)));
}

#[test]
fn free_form_sheet_is_flattened() {
    let contents = "Jour,Date,Séquences\nJ1,Lundi 10/11/2024,12 INT\nJ2,Mardi 11/11/2024,14\n";
    let table = read_cell_table(contents.as_bytes()).expect("read csv");
    let err = parse_matrix(&table).expect_err("not a matrix");
    assert!(matches!(err, IngestError::NonConformingHeaders { .. }));

    let text = flatten_table(&table);
    assert!(text.contains("Date: Lundi 10/11/2024"));
    assert_eq!(text.lines().count(), 3);
}
