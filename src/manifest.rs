use std::collections::HashSet;
use std::fs::File;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub const COLUMN_OLD_PATH: &str = "old_path";
pub const COLUMN_NEW_PATH: &str = "new_path";
pub const COLUMN_PK: &str = "pk";

/// Run-wide choice of how manifest records are resolved to catalog images,
/// decided once from the manifest's column set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionStrategy {
    ByIdentifier,
    ByCurrentPath,
}

/// One validated manifest row. Paths are trimmed of surrounding whitespace;
/// interior characters (including backslash separators) are preserved
/// byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciliationRecord {
    pub pk: Option<i64>,
    pub old_path: String,
    pub new_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    pub records: Vec<ReconciliationRecord>,
    pub strategy: ResolutionStrategy,
}

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to open manifest at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read manifest at {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error(
        "manifest must contain '{COLUMN_OLD_PATH}' and '{COLUMN_NEW_PATH}' columns; this run saw: {observed:?}"
    )]
    MissingColumns { observed: Vec<String> },

    #[error("manifest row {row}: '{COLUMN_PK}' value '{value}' is not an integer")]
    InvalidIdentifier { row: usize, value: String },

    #[error(
        "found {} duplicate path(s) in the '{COLUMN_NEW_PATH}' column: {:?}; remove or correct every duplicate before running",
        .values.len(),
        .values
    )]
    DuplicateNewPaths { values: Vec<String> },
}

/// Load and validate the rename manifest.
///
/// The whole file is validated before any record is handed to the driver:
/// duplicate-destination detection needs the complete set. Prints the
/// strategy notice once the column set is known.
pub fn load(path: &Path) -> Result<Manifest, ManifestError> {
    let file = File::open(path).map_err(|source| ManifestError::Io {
        path: path.to_owned(),
        source,
    })?;
    let mut reader = csv::Reader::from_reader(file);

    let headers = reader
        .headers()
        .map_err(|source| ManifestError::Csv {
            path: path.to_owned(),
            source,
        })?
        .clone();
    let column = |name: &str| headers.iter().position(|header| header.trim() == name);

    let (old_index, new_index) = match (column(COLUMN_OLD_PATH), column(COLUMN_NEW_PATH)) {
        (Some(old_index), Some(new_index)) => (old_index, new_index),
        _ => {
            return Err(ManifestError::MissingColumns {
                observed: headers.iter().map(str::to_string).collect(),
            });
        }
    };

    let pk_index = column(COLUMN_PK);
    let strategy = match pk_index {
        Some(_) => {
            println!("'{COLUMN_PK}' column found in manifest, resolving images by pk");
            ResolutionStrategy::ByIdentifier
        }
        None => {
            println!("No '{COLUMN_PK}' column found in manifest, resolving images by current path");
            ResolutionStrategy::ByCurrentPath
        }
    };

    let mut records = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let row = row.map_err(|source| ManifestError::Csv {
            path: path.to_owned(),
            source,
        })?;
        // Header occupies row 1 of the file.
        let row_number = index + 2;

        let pk = match pk_index {
            Some(pk_index) => {
                let raw = row.get(pk_index).unwrap_or("").trim();
                let pk = raw
                    .parse::<i64>()
                    .map_err(|_| ManifestError::InvalidIdentifier {
                        row: row_number,
                        value: raw.to_string(),
                    })?;
                Some(pk)
            }
            None => None,
        };

        records.push(ReconciliationRecord {
            pk,
            old_path: row.get(old_index).unwrap_or("").trim().to_string(),
            new_path: row.get(new_index).unwrap_or("").trim().to_string(),
        });
    }

    let duplicates = duplicate_new_paths(&records);
    if !duplicates.is_empty() {
        return Err(ManifestError::DuplicateNewPaths { values: duplicates });
    }

    Ok(Manifest { records, strategy })
}

/// Every repeated occurrence of a destination path, in manifest order. A
/// path appearing three times contributes two entries.
fn duplicate_new_paths(records: &[ReconciliationRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    for record in records {
        if !seen.insert(record.new_path.as_str()) {
            duplicates.push(record.new_path.clone());
        }
    }
    duplicates
}

#[cfg(test)]
mod tests {
    use super::{duplicate_new_paths, ReconciliationRecord};

    fn record(new_path: &str) -> ReconciliationRecord {
        ReconciliationRecord {
            pk: None,
            old_path: format!("old-{new_path}"),
            new_path: new_path.to_string(),
        }
    }

    #[test]
    fn unique_destinations_produce_no_duplicates() {
        let records = [record(r"\\h\a.scn"), record(r"\\h\b.scn")];
        assert!(duplicate_new_paths(&records).is_empty());
    }

    #[test]
    fn every_repeat_occurrence_is_reported() {
        let records = [
            record(r"\\h\a.scn"),
            record(r"\\h\a.scn"),
            record(r"\\h\b.scn"),
            record(r"\\h\a.scn"),
            record(r"\\h\b.scn"),
        ];
        assert_eq!(
            duplicate_new_paths(&records),
            vec![r"\\h\a.scn".to_string(), r"\\h\a.scn".to_string(), r"\\h\b.scn".to_string()]
        );
    }
}
