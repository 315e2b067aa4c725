use std::io::Write;
use std::path::PathBuf;

use scan_relocate::manifest::{self, ManifestError, ResolutionStrategy};
use tempfile::NamedTempFile;

fn manifest_file(contents: &str) -> (NamedTempFile, PathBuf) {
    let mut file = NamedTempFile::new().expect("create manifest fixture");
    file.write_all(contents.as_bytes()).expect("write manifest fixture");
    let path = file.path().to_owned();
    (file, path)
}

#[test]
fn missing_required_columns_fail_before_any_record_is_built() {
    let (_file, path) = manifest_file("old_path,location\na,b\n");

    let error = match manifest::load(&path) {
        Ok(_) => panic!("manifest without new_path must fail"),
        Err(error) => error,
    };

    match &error {
        ManifestError::MissingColumns { observed } => {
            assert_eq!(observed, &["old_path".to_string(), "location".to_string()]);
        }
        other => panic!("expected MissingColumns, got {other:?}"),
    }

    let message = error.to_string();
    assert!(message.contains("'old_path'"));
    assert!(message.contains("'new_path'"));
    assert!(message.contains("location"));
}

#[test]
fn pk_column_selects_identifier_resolution() {
    let (_file, path) = manifest_file(
        "pk,old_path,new_path\n99,\\\\H\\a\\Scan1.scn,\\\\H\\b\\Scan1.scn\n",
    );

    let manifest = manifest::load(&path).expect("manifest loads");
    assert_eq!(manifest.strategy, ResolutionStrategy::ByIdentifier);
    assert_eq!(manifest.records[0].pk, Some(99));
}

#[test]
fn absent_pk_column_selects_path_resolution() {
    let (_file, path) = manifest_file("old_path,new_path\na,b\n");

    let manifest = manifest::load(&path).expect("manifest loads");
    assert_eq!(manifest.strategy, ResolutionStrategy::ByCurrentPath);
    assert_eq!(manifest.records[0].pk, None);
}

#[test]
fn strategy_is_decided_even_for_zero_rows() {
    let (_file, with_pk) = manifest_file("pk,old_path,new_path\n");
    let manifest = manifest::load(&with_pk).expect("empty manifest loads");
    assert_eq!(manifest.strategy, ResolutionStrategy::ByIdentifier);
    assert!(manifest.records.is_empty());

    let (_file, without_pk) = manifest_file("old_path,new_path\n");
    let manifest = manifest::load(&without_pk).expect("empty manifest loads");
    assert_eq!(manifest.strategy, ResolutionStrategy::ByCurrentPath);
    assert!(manifest.records.is_empty());
}

#[test]
fn non_integer_pk_fails_with_row_context() {
    let (_file, path) = manifest_file("pk,old_path,new_path\n7,a,b\nx7,c,d\n");

    let error = match manifest::load(&path) {
        Ok(_) => panic!("non-integer pk must fail"),
        Err(error) => error,
    };

    match error {
        ManifestError::InvalidIdentifier { row, value } => {
            assert_eq!(row, 3);
            assert_eq!(value, "x7");
        }
        other => panic!("expected InvalidIdentifier, got {other:?}"),
    }
}

#[test]
fn duplicate_destinations_abort_with_count_and_values() {
    let (_file, path) = manifest_file(
        "old_path,new_path\n\
         \\\\H\\a\\1.scn,\\\\H\\b\\Scan1.scn\n\
         \\\\H\\a\\2.scn,\\\\H\\b\\Scan1.scn\n\
         \\\\H\\a\\3.scn,\\\\H\\b\\Scan1.scn\n\
         \\\\H\\a\\4.scn,\\\\H\\b\\other.scn\n",
    );

    let error = match manifest::load(&path) {
        Ok(_) => panic!("duplicate destinations must fail"),
        Err(error) => error,
    };

    match &error {
        ManifestError::DuplicateNewPaths { values } => {
            assert_eq!(
                values,
                &[r"\\H\b\Scan1.scn".to_string(), r"\\H\b\Scan1.scn".to_string()]
            );
        }
        other => panic!("expected DuplicateNewPaths, got {other:?}"),
    }

    let message = error.to_string();
    assert!(message.contains("2 duplicate path(s)"));
    assert!(message.contains(r"\\H\b\Scan1.scn"));
}

#[test]
fn literal_backslash_paths_survive_loading_unchanged() {
    let (_file, path) = manifest_file(
        "old_path,new_path\n  \\\\1.2.3.4\\lab\\scans\\Scan001.scn  ,\\\\1.2.3.4\\lab\\moved\\Scan001.scn\n",
    );

    let manifest = manifest::load(&path).expect("manifest loads");
    let record = &manifest.records[0];
    assert_eq!(record.old_path, r"\\1.2.3.4\lab\scans\Scan001.scn");
    assert_eq!(record.new_path, r"\\1.2.3.4\lab\moved\Scan001.scn");
}

#[test]
fn quoted_fields_with_commas_load_intact() {
    let (_file, path) = manifest_file(
        "old_path,new_path\n\"\\\\H\\lab, north\\1.scn\",\\\\H\\b\\1.scn\n",
    );

    let manifest = manifest::load(&path).expect("manifest loads");
    assert_eq!(manifest.records[0].old_path, r"\\H\lab, north\1.scn");
}

#[test]
fn unreadable_manifest_reports_an_io_error() {
    let error = match manifest::load(std::path::Path::new("/nonexistent/renames.csv")) {
        Ok(_) => panic!("missing manifest must fail"),
        Err(error) => error,
    };
    assert!(matches!(error, ManifestError::Io { .. }));
}
