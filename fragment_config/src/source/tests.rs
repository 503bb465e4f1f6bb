//! Unit tests for the directory and memory sources.

use camino::Utf8Path;
use rstest::{fixture, rstest};
use tempfile::TempDir;

use super::{DirectorySource, FragmentSource, MemorySource};
use crate::FragmentError;

#[fixture]
fn fragment_dir() -> TempDir {
    let temp = tempfile::tempdir().expect("tempdir");
    std::fs::write(temp.path().join("auth.json"), r#"{"Auth": {}}"#).expect("write auth");
    std::fs::write(temp.path().join("README.md"), "notes").expect("write readme");
    std::fs::create_dir(temp.path().join("nested.json")).expect("create nested dir");
    temp
}

fn open(temp: &TempDir) -> DirectorySource {
    let root = Utf8Path::from_path(temp.path()).expect("utf-8 temp path");
    DirectorySource::open(root).expect("open fragment dir")
}

#[rstest]
fn directory_reads_existing_files(fragment_dir: TempDir) {
    let source = open(&fragment_dir);
    let bytes = source.read("auth.json").expect("read auth");
    assert_eq!(bytes.as_deref(), Some(br#"{"Auth": {}}"#.as_slice()));
}

#[rstest]
fn directory_reports_missing_files_as_absent(fragment_dir: TempDir) {
    let source = open(&fragment_dir);
    assert_eq!(source.read("http.json").expect("read http"), None);
}

#[rstest]
fn directory_lists_regular_files_sorted(fragment_dir: TempDir) {
    let source = open(&fragment_dir);
    assert_eq!(
        source.list().expect("list"),
        vec!["README.md".to_owned(), "auth.json".to_owned()]
    );
}

#[rstest]
fn directory_locations_include_root(fragment_dir: TempDir) {
    let source = open(&fragment_dir);
    let expected = source.root().join("auth.json");
    assert_eq!(source.locate("auth.json"), expected.as_str());
}

#[rstest]
fn directory_entry_that_cannot_be_read_is_a_file_failure(fragment_dir: TempDir) {
    let source = open(&fragment_dir);
    let err = source.read("nested.json").expect_err("directory is not readable");
    let expected = source.locate("nested.json");
    assert!(
        matches!(&*err, FragmentError::Unreadable { location, .. } if *location == expected),
        "unexpected error: {err:?}"
    );
}

#[test]
fn missing_directory_is_unavailable() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = Utf8Path::from_path(temp.path()).expect("utf-8").join("missing");
    let err = DirectorySource::open(root).expect_err("missing dir");
    assert!(matches!(&*err, FragmentError::StorageUnavailable { .. }));
}

#[test]
fn memory_source_uses_label_in_locations() {
    let source = MemorySource::new()
        .labelled("embedded")
        .with_file("auth.json", "{}");
    assert_eq!(source.locate("auth.json"), "embedded/auth.json");
    assert_eq!(MemorySource::new().location(), "memory");
    assert_eq!(source.list().expect("list"), vec!["auth.json".to_owned()]);
}

#[test]
fn memory_label_trailing_slash_is_not_doubled() {
    let source = MemorySource::new().labelled("embedded/");
    assert_eq!(source.locate("auth.json"), "embedded/auth.json");
}
