//! Schema inference over in-memory directories.


use std::sync::Arc;

use tabsample_core::datasource::Delimiter;
use tabsample_io::MemoryStorage;
use tabsample_sampler::{CsvSampler, SampleError, Sampler};
use test_data_gen::{csv_sampler, memory_store, StaleListingStorage, UnlistableStorage};

fn scenario_store() -> MemoryStorage {
    memory_store(&[
        ("data/a.csv", "id,name\n1,alice\n2,bob\n"),
        ("data/b.txt", "not,a,csv\n"),
        ("data/c.csv", "id,name\n3,carol\n"),
    ])
}

#[test]
fn test_schema_from_first_eligible_header() {
    let store = scenario_store();
    let sampler = csv_sampler(&store, "data/", true);

    let schema = sampler.sample_schema().expect("schema");
    assert_eq!(schema.names(), vec!["id", "name"]);

    // Only the first eligible file is fetched, and only its leading bytes.
    let downloads = store.downloads();
    assert_eq!(downloads.len(), 1);
    assert_eq!(downloads[0].path, "data/a.csv");
    assert_eq!(downloads[0].range, Some(0..100_000));
}

#[test]
fn test_ineligible_objects_are_skipped() {
    let store = memory_store(&[
        ("data/0-readme.txt", "hello\n"),
        ("data/1-upper.CSV", "x,y,z\n"),
        ("data/2-events.csv", "ts,uid\n"),
    ]);
    let sampler = csv_sampler(&store, "data/", true);

    let schema = sampler.sample_schema().expect("schema");
    assert_eq!(schema.names(), vec!["ts", "uid"]);
    assert_eq!(store.downloads().len(), 1);
}

#[test]
fn test_no_eligible_files_yields_empty_schema() {
    let store = memory_store(&[("data/notes.txt", "a,b\n"), ("data/img.png", "\u{89}PNG")]);
    let sampler = csv_sampler(&store, "data/", true);

    let schema = sampler.sample_schema().expect("empty directories are not an error");
    assert!(schema.is_empty());
    assert!(store.downloads().is_empty());

    let empty = csv_sampler(&MemoryStorage::new(), "nothing/", true);
    assert!(empty.sample_schema().expect("schema").is_empty());
}

#[test]
fn test_headerless_files_get_placeholder_names() {
    let store = memory_store(&[("data/a.csv", "1,alice,x\n2,bob,y\n")]);
    let sampler = csv_sampler(&store, "data/", false);

    let schema = sampler.sample_schema().expect("schema");
    assert_eq!(schema.names(), vec!["col_0", "col_1", "col_2"]);
}

#[test]
fn test_field_count_matches_header_cells() {
    let store = memory_store(&[
        ("data/a.csv", "a,b\n1,2\n"),
        ("data/b.csv", "a,b,c,d\n1,2,3,4\n"),
    ]);
    let sampler = csv_sampler(&store, "data/", true);

    // Files after the first eligible one are never consulted.
    assert_eq!(sampler.sample_schema().expect("schema").len(), 2);
}

#[test]
fn test_repeated_inference_is_identical() {
    let store = scenario_store();
    let sampler = csv_sampler(&store, "data/", true);

    let first = sampler.sample_schema().expect("first");
    let second = sampler.sample_schema().expect("second");
    assert_eq!(first, second);
    assert_eq!(
        first.fingerprint().expect("hash"),
        second.fingerprint().expect("hash")
    );
}

#[test]
fn test_tab_delimited_files() {
    let store = memory_store(&[("data/a.tsv", "id\tname\tscore\n1\talice\t9\n")]);
    let sampler = CsvSampler::new(Arc::new(store), "data/", Delimiter::TAB, true);

    let schema = sampler.sample_schema().expect("schema");
    assert_eq!(schema.names(), vec!["id", "name", "score"]);
}

#[test]
fn test_header_probe_is_a_hard_byte_cap() {
    let store = memory_store(&[("data/a.csv", "id,name\n1,alice\n")]);
    let sampler = csv_sampler(&store, "data/", true).with_header_probe_bytes(4);

    // A header longer than the probe is cut short.
    let schema = sampler.sample_schema().expect("schema");
    assert_eq!(schema.names(), vec!["id", "n"]);
}

#[test]
fn test_empty_first_file_is_a_parse_failure() {
    let store = memory_store(&[("data/a.csv", ""), ("data/b.csv", "id\n1\n")]);
    let sampler = csv_sampler(&store, "data/", true);

    let err = sampler.sample_schema().unwrap_err();
    assert!(matches!(err, SampleError::MissingHeader { ref path } if path == "data/a.csv"));
}

#[test]
fn test_listing_failure_names_directory() {
    let sampler = CsvSampler::new(
        Arc::new(UnlistableStorage),
        "s3://bucket/raw",
        Delimiter::COMMA,
        true,
    );

    let err = sampler.sample_schema().unwrap_err();
    assert!(matches!(err, SampleError::List { .. }));
    assert!(err.to_string().contains("s3://bucket/raw"));
}

#[test]
fn test_download_failure_names_path() {
    let storage = StaleListingStorage {
        listed: vec!["data/gone.csv".into()],
        inner: MemoryStorage::new(),
    };
    let sampler = CsvSampler::new(Arc::new(storage), "data/", Delimiter::COMMA, true);

    let err = sampler.sample_schema().unwrap_err();
    assert!(matches!(err, SampleError::Download { .. }));
    assert!(err.to_string().contains("data/gone.csv"));
}
