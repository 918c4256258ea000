//! Integration tests for loading and saving the data file

use gradebook::core::persistence::{decode, encode, load_store, save_store, LoadStatus};
use gradebook::core::{StoreError, StudentStore};
use std::fs;
use tempfile::TempDir;

fn sample_store() -> StudentStore {
    let mut store = StudentStore::new();
    store.add("S1", "Ada Lovelace", [90, 85, 80]).unwrap();
    store.add("S2", "Alan Turing", [70, 65, 61]).unwrap();
    store.add("S3", "Gone", [10, 20, 30]).unwrap();
    store.delete("S3").unwrap();
    store
}

#[test]
fn test_save_then_load_restores_records() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("students.txt");
    let store = sample_store();

    save_store(&path, &store).unwrap();
    let (loaded, status) = load_store(&path, 200).unwrap();

    assert_eq!(status, LoadStatus::Loaded(3));
    assert_eq!(loaded.len(), 3);
    for (before, after) in store.records().iter().zip(loaded.records()) {
        assert_eq!(before.id, after.id);
        assert_eq!(before.name, after.name);
        assert_eq!(before.marks, after.marks);
        assert_eq!(before.grade, after.grade);
        assert_eq!(before.active, after.active);
        assert!((before.average - after.average).abs() < 0.005);
    }
}

#[test]
fn test_codec_round_trip_is_exact_at_two_decimals() {
    let mut store = StudentStore::new();
    store.add("S1", "", [80, 80, 80]).unwrap();
    store.add("S2", "Top", [100, 100, 100]).unwrap();
    store.add("S3", "Zero", [0, 0, 0]).unwrap();
    store.delete("S2").unwrap();

    let decoded = decode(encode(store.records()), 200);
    assert_eq!(decoded, store.records());
}

#[test]
fn test_non_utf8_bytes_survive_load_and_save() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("students.txt");
    let original = b"S1|Jos\xe9|90,80,70|80.00|B|1\nS2|Ana|50,50,50|50.00|D|1\n".to_vec();
    fs::write(&path, &original).unwrap();

    let (store, status) = load_store(&path, 200).unwrap();
    assert_eq!(status, LoadStatus::Loaded(2));
    assert_eq!(store.records()[0].name, "Jos\u{fffd}");

    save_store(&path, &store).unwrap();
    assert_eq!(fs::read(&path).unwrap(), original);
}

#[test]
fn test_renamed_record_drops_original_bytes() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("students.txt");
    fs::write(&path, b"S1|Jos\xe9|90,80,70|80.00|B|1\n").unwrap();

    let (mut store, _) = load_store(&path, 200).unwrap();
    store.update("S1", Some("Jose"), None).unwrap();
    save_store(&path, &store).unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "S1|Jose|90,80,70|80.00|B|1\n"
    );
}

#[test]
fn test_saved_file_format() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("students.txt");

    save_store(&path, &sample_store()).unwrap();
    let content = fs::read_to_string(&path).unwrap();

    assert_eq!(
        content,
        "S1|Ada Lovelace|90,85,80|85.00|A|1\n\
         S2|Alan Turing|70,65,61|65.33|C|1\n\
         S3|Gone|10,20,30|20.00|F|0\n"
    );
}

#[test]
fn test_save_replaces_previous_contents() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("students.txt");
    fs::write(&path, "OLD|Old|1,1,1|1.00|F|1\nOLD2|Old|1,1,1|1.00|F|1\n").unwrap();

    let mut store = StudentStore::new();
    store.add("NEW", "New", [100, 100, 100]).unwrap();
    save_store(&path, &store).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content, "NEW|New|100,100,100|100.00|A|1\n");
}

#[test]
fn test_missing_file_is_not_an_error() {
    let dir = TempDir::new().unwrap();
    let (store, status) = load_store(dir.path().join("absent.txt"), 200).unwrap();

    assert_eq!(status, LoadStatus::FileAbsent);
    assert!(store.is_empty());
    assert_eq!(store.capacity(), 200);
}

#[test]
fn test_load_tolerates_malformed_lines() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("students.txt");
    fs::write(
        &path,
        "S1|Ada|90,80,70|80.00|B|1\r\n\
         \n\
         too|few|fields\n\
         |NoId|1,2,3|2.00|F|1\n\
         S2||5,,7|4.00|F|1\n\
         S3|Short|42|14.00|F|x\n",
    )
    .unwrap();

    let (store, status) = load_store(&path, 200).unwrap();
    assert_eq!(status, LoadStatus::Loaded(3));

    let ids: Vec<&str> = store.records().iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["S1", "S2", "S3"]);

    let s1 = &store.records()[0];
    assert_eq!(s1.name, "Ada");
    assert!(s1.active);

    let s2 = &store.records()[1];
    assert_eq!(s2.name, "");
    assert_eq!(s2.marks, [5, 7, 0]);

    let s3 = &store.records()[2];
    assert_eq!(s3.marks, [42, 0, 0]);
    assert!(!s3.active);
}

#[test]
fn test_load_keeps_stored_average_and_grade() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("students.txt");
    fs::write(&path, "S1|Ada|100,100,100|12.50|C|1\n").unwrap();

    let (store, _) = load_store(&path, 200).unwrap();
    let student = &store.records()[0];
    assert!((student.average - 12.5).abs() < f32::EPSILON);
    assert_eq!(student.grade, 'C');
}

#[test]
fn test_load_stops_at_capacity() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("students.txt");
    let lines: String = (0..5).map(|i| format!("S{i}|N|1,1,1|1.00|F|1\n")).collect();
    fs::write(&path, lines).unwrap();

    let (store, status) = load_store(&path, 3).unwrap();
    assert_eq!(status, LoadStatus::Loaded(3));
    assert!(store.is_full());
}

#[test]
fn test_unwritable_path_reports_io_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing_dir").join("students.txt");
    let store = sample_store();
    let before = store.clone();

    let err = save_store(&path, &store).unwrap_err();
    assert!(matches!(err, StoreError::Io { .. }));
    assert!(err.to_string().contains("missing_dir"));
    assert_eq!(store, before);
}

#[test]
fn test_unreadable_path_reports_io_error() {
    let dir = TempDir::new().unwrap();
    // A directory exists at the path but cannot be read as a file
    let err = load_store(dir.path(), 200).unwrap_err();
    assert!(matches!(err, StoreError::Io { .. }));
}
