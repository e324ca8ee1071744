use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use flate2::Compression;
use flate2::write::GzEncoder;

use super::*;

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("kira_lesioncal_input_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_file(path: &Path, contents: &str) {
    let mut f = BufWriter::new(File::create(path).unwrap());
    f.write_all(contents.as_bytes()).unwrap();
}

fn write_gz(path: &Path, contents: &str) {
    let mut enc = GzEncoder::new(File::create(path).unwrap(), Compression::default());
    enc.write_all(contents.as_bytes()).unwrap();
    enc.finish().unwrap();
}

const HEADER: &str = "id\takiec\tbcc\tbkl\tdf\tmel\tnv\tvasc\n";

#[test]
fn test_tsv_scores() {
    let dir = make_temp_dir();
    let path = dir.join("scores.tsv");
    write_file(
        &path,
        &format!("{HEADER}img1\t2\t1\t0\t0\t3\t5\t0\n\nimg2\t-1.5\t0\t0\t0\t0\t0.25\t0\n"),
    );
    let records = load_scores(&path, None, &ClassCatalog::ham10000()).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, "img1");
    assert_eq!(records[0].scores, vec![2.0, 1.0, 0.0, 0.0, 3.0, 5.0, 0.0]);
    assert_eq!(records[1].scores[0], -1.5);
}

#[test]
fn test_gz_tsv_scores() {
    let dir = make_temp_dir();
    let path = dir.join("scores.tsv.gz");
    write_gz(&path, &format!("{HEADER}a\t1\t1\t1\t1\t1\t1\t1\n"));
    let records = load_scores(&path, None, &ClassCatalog::ham10000()).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].scores, vec![1.0; 7]);
}

#[test]
fn test_tsv_header_must_follow_catalog() {
    let catalog = ClassCatalog::ham10000();
    let dir = make_temp_dir();

    let swapped = dir.join("swapped.tsv");
    write_file(&swapped, "id\tbcc\takiec\tbkl\tdf\tmel\tnv\tvasc\nx\t0\t0\t0\t0\t0\t0\t0\n");
    assert!(matches!(
        load_scores(&swapped, None, &catalog),
        Err(InputError::InvalidInput(_))
    ));

    let short = dir.join("short.tsv");
    write_file(&short, "id\takiec\tbcc\tbkl\tdf\tmel\tnv\nx\t0\t0\t0\t0\t0\t0\n");
    assert!(matches!(
        load_scores(&short, None, &catalog),
        Err(InputError::Calibration(CalibrationError::ShapeMismatch { .. }))
    ));
}

#[test]
fn test_tsv_row_errors() {
    let catalog = ClassCatalog::ham10000();
    let dir = make_temp_dir();

    let short_row = dir.join("short_row.tsv");
    write_file(&short_row, &format!("{HEADER}x\t0\t0\t0\t0\t0\t0\n"));
    assert!(matches!(
        load_scores(&short_row, None, &catalog),
        Err(InputError::Calibration(CalibrationError::ShapeMismatch {
            expected: 7,
            actual: 6,
            ..
        }))
    ));

    let bad_number = dir.join("bad_number.tsv");
    write_file(&bad_number, &format!("{HEADER}x\t0\t0\tabc\t0\t0\t0\t0\n"));
    assert!(matches!(
        load_scores(&bad_number, None, &catalog),
        Err(InputError::Parse(_))
    ));
}

#[test]
fn test_json_scores() {
    let dir = make_temp_dir();
    let path = dir.join("scores.json");
    write_file(
        &path,
        r#"[{"id": "a", "scores": [0.1, 0.1, 0.1, 0.1, 0.1, 0.4, 0.1]},
            {"id": "b", "scores": [0, 0, 0, 0, 9, 0, 0]}]"#,
    );
    let records = load_scores(&path, None, &ClassCatalog::ham10000()).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].id, "b");
    assert_eq!(records[1].scores[4], 9.0);
}

#[test]
fn test_json_shape_mismatch() {
    let dir = make_temp_dir();
    let path = dir.join("scores.json");
    write_file(&path, r#"[{"id": "a", "scores": [0.1, 0.9]}]"#);
    assert!(matches!(
        load_scores(&path, None, &ClassCatalog::ham10000()),
        Err(InputError::Calibration(CalibrationError::ShapeMismatch { .. }))
    ));
}

#[test]
fn test_detect_format() {
    assert_eq!(detect_format(Path::new("a.tsv")).unwrap(), InputFormat::Tsv);
    assert_eq!(detect_format(Path::new("a.TSV.gz")).unwrap(), InputFormat::Tsv);
    assert_eq!(detect_format(Path::new("dir/a.json")).unwrap(), InputFormat::Json);
    assert!(detect_format(Path::new("a.csv")).is_err());
}

#[test]
fn test_explicit_format_overrides_extension() {
    let dir = make_temp_dir();
    let path = dir.join("scores.dat");
    write_file(&path, r#"[{"id": "a", "scores": [1, 1, 1, 1, 1, 1, 1]}]"#);
    let records = load_scores(&path, Some(InputFormat::Json), &ClassCatalog::ham10000()).unwrap();
    assert_eq!(records.len(), 1);
}
