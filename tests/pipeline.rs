use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{ArrayRef, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use paper_explorer::data::aggregate::{STOPWORDS, TOP_JOURNALS};
use paper_explorer::data::model::UNKNOWN_JOURNAL;
use paper_explorer::{analyze_file, Error};
use tempfile::TempDir;

const HEADER: &str = "cord_uid,title,abstract,journal,publish_time,authors,url,source_x";

fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

fn csv(rows: &[&str]) -> String {
    let mut text = String::from(HEADER);
    for row in rows {
        text.push('\n');
        text.push_str(row);
    }
    text.push('\n');
    text
}

#[test]
fn cleaning_scenarios() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        &dir,
        "metadata.csv",
        &csv(&[
            "u1,COVID and the Immune Response,Short abstract text,  Nature  ,2021-03-15,A,http://a,PMC",
            "u2,Undated paper,Text,Nature,unknown date,A,http://b,PMC",
            "u3,No abstract,,,2020-06-01,A,http://c,WHO",
            "u4,Another missing journal,Two words,,2022,A,http://d,",
            "u5,,Untitled,BMJ,2021,A,http://e,PMC",
        ]),
    );

    let analysis = analyze_file(&path).unwrap();
    let records = &analysis.table.records;
    assert_eq!(records.len(), 3);

    assert_eq!(records[0].year, 2021);
    assert_eq!(records[0].journal, "Nature");
    assert_eq!(records[0].abstract_word_count, 3);

    assert_eq!(records[1].abstract_word_count, 0);
    assert_eq!(records[1].journal, UNKNOWN_JOURNAL);
    assert_eq!(records[2].journal, UNKNOWN_JOURNAL);
    assert_eq!(records[2].source_x, None);

    assert_eq!(analysis.table.dropped_missing_title, 1);
    assert_eq!(analysis.table.dropped_missing_year, 1);

    // Both "Unknown" journals are excluded from the ranking.
    assert_eq!(analysis.aggregates.top_journals, vec![("Nature".to_string(), 1)]);

    assert_eq!(
        analysis.aggregates.year_counts,
        vec![(2020, 1), (2021, 1), (2022, 1)]
    );
    assert_eq!(
        analysis.aggregates.source_counts,
        vec![("PMC".to_string(), 1), ("WHO".to_string(), 1)]
    );
    assert_eq!(analysis.aggregates.abstract_lengths, vec![3, 0, 2]);

    let words: Vec<&str> = analysis
        .aggregates
        .title_words
        .iter()
        .map(|(w, _)| w.as_str())
        .collect();
    for expected in ["covid", "immune", "response"] {
        assert!(words.contains(&expected), "missing {expected}");
    }
    for (word, _) in &analysis.aggregates.title_words {
        assert!(!STOPWORDS.contains(&word.as_str()));
        assert!((3..=15).contains(&word.len()));
    }
}

#[test]
fn top_journals_are_bounded_and_sorted() {
    let dir = tempfile::tempdir().unwrap();
    let mut rows = Vec::new();
    for j in 0..20 {
        for k in 0..=j {
            rows.push(format!("u{j}-{k},Title {j},Text,Journal {j},2021,A,http://x,PMC"));
        }
    }
    rows.push("z1,Unknown journal paper,Text,,2021,A,http://x,PMC".to_string());
    let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
    let path = write_file(&dir, "many.csv", &csv(&rows));

    let analysis = analyze_file(&path).unwrap();
    let top = &analysis.aggregates.top_journals;
    assert_eq!(top.len(), TOP_JOURNALS);
    assert!(top.windows(2).all(|w| w[0].1 >= w[1].1));
    assert!(top.iter().all(|(j, _)| j != UNKNOWN_JOURNAL));
    assert_eq!(top[0], ("Journal 19".to_string(), 20));
}

#[test]
fn missing_source_column_yields_empty_distribution() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        &dir,
        "nosource.csv",
        "title,abstract,journal,publish_time\nA paper,Text,Nature,2021\n",
    );
    let analysis = analyze_file(&path).unwrap();
    assert!(analysis.aggregates.source_counts.is_empty());
    assert!(!analysis.table.has_source);
}

#[test]
fn missing_required_column_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "bad.csv", "title,abstract,publish_time\nA,B,2021\n");
    match analyze_file(&path) {
        Err(Error::MissingColumn { column }) => assert_eq!(column, "journal"),
        other => panic!("expected MissingColumn, got {other:?}"),
    }
}

#[test]
fn missing_file_is_fatal() {
    let err = analyze_file(Path::new("/no/such/dir/metadata.csv")).unwrap_err();
    assert!(matches!(err, Error::MissingInput { .. }));
}

#[test]
fn unknown_extensions_are_read_as_csv() {
    let dir = tempfile::tempdir().unwrap();
    let contents = csv(&[
        "u1,Vaccine trial results,One two three,Nature,2021-03-15,A,http://a,PMC",
        "u2,Mask study,Four five,BMJ,2022,A,http://b,WHO",
    ]);
    for name in ["metadata.txt", "metadata"] {
        let path = write_file(&dir, name, &contents);
        let analysis = analyze_file(&path).unwrap();
        assert_eq!(analysis.table.len(), 2, "{name}");
        assert_eq!(analysis.aggregates.year_counts, vec![(2021, 1), (2022, 1)]);
    }
}

#[test]
fn directory_is_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dir.csv");
    std::fs::create_dir(&path).unwrap();
    assert!(matches!(
        analyze_file(&path),
        Err(Error::MissingInput { .. })
    ));
}

#[test]
fn json_input() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        &dir,
        "metadata.json",
        r#"[
            {"title": "Mask effectiveness", "abstract": "a b c", "journal": "BMJ", "publish_time": "2020-04-01", "source_x": "WHO"},
            {"title": "Old", "abstract": null, "journal": null, "publish_time": 1998, "source_x": null}
        ]"#,
    );
    let analysis = analyze_file(&path).unwrap();
    assert_eq!(analysis.table.len(), 1);
    assert_eq!(analysis.table.records[0].abstract_word_count, 3);
    assert_eq!(analysis.table.dropped_out_of_range, 1);
}

#[test]
fn parquet_input() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("metadata.parquet");

    let schema = Arc::new(Schema::new(vec![
        Field::new("title", DataType::Utf8, true),
        Field::new("abstract", DataType::Utf8, true),
        Field::new("journal", DataType::Utf8, true),
        Field::new("publish_time", DataType::Int64, true),
        Field::new("source_x", DataType::Utf8, true),
    ]));
    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(vec![Some("Vaccine rollout"), None])),
        Arc::new(StringArray::from(vec![Some("one two"), Some("x")])),
        Arc::new(StringArray::from(vec![None, Some("Nature")])),
        Arc::new(Int64Array::from(vec![Some(2021), Some(2022)])),
        Arc::new(StringArray::from(vec![Some("PMC"), Some("PMC")])),
    ];
    let batch = RecordBatch::try_new(schema.clone(), columns).unwrap();
    let file = std::fs::File::create(&path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    let analysis = analyze_file(&path).unwrap();
    assert_eq!(analysis.table.len(), 1);
    let record = &analysis.table.records[0];
    assert_eq!(record.title, "Vaccine rollout");
    assert_eq!(record.year, 2021);
    assert_eq!(record.journal, UNKNOWN_JOURNAL);
    assert_eq!(analysis.table.dropped_missing_title, 1);
}

#[test]
fn malformed_csv_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        &dir,
        "ragged.csv",
        "title,abstract,journal,publish_time\nA,B,C,2021,extra\n",
    );
    assert!(matches!(analyze_file(&path), Err(Error::Csv(_))));
}
