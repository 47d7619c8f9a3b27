use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use super::model::{Dataset, Defect};
use super::parser::parse_record;
use crate::error::LoadError;

/// Result of one load: the good rows and every line that was rejected.
#[derive(Debug, Clone)]
pub struct LoadedLog {
    pub dataset: Dataset,
    pub defects: Vec<Defect>,
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a JSON Lines telemetry log.
///
/// Blank lines are skipped. A line that does not decode is recorded as a
/// [`Defect`] and the load carries on; only a missing file, a read failure,
/// or a file with no decodable line at all is an error.
pub fn load_log(path: &Path) -> Result<LoadedLog, LoadError> {
    let file = File::open(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let loaded = load_from_reader(BufReader::new(file)).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if loaded.dataset.is_empty() {
        return Err(LoadError::EmptyDataset {
            defects: loaded.defects.len(),
        });
    }

    log::info!(
        "Loaded {} records from {} ({} lines skipped)",
        loaded.dataset.len(),
        path.display(),
        loaded.defects.len()
    );
    Ok(loaded)
}

/// Drive the record parser over every line of `reader`.
///
/// Lines are split on `\n` as raw bytes so that a single line with invalid
/// UTF-8 becomes a defect instead of failing the read.
pub fn load_from_reader<R: BufRead>(reader: R) -> io::Result<LoadedLog> {
    let mut records = Vec::new();
    let mut defects = Vec::new();

    for (idx, chunk) in reader.split(b'\n').enumerate() {
        let line_number = idx + 1;
        let bytes = chunk?;

        let text = match std::str::from_utf8(&bytes) {
            Ok(text) => text,
            Err(e) => {
                log::warn!("Skipping line {line_number}: invalid UTF-8 - {e}");
                defects.push(Defect {
                    line_number,
                    message: format!("invalid UTF-8: {e}"),
                });
                continue;
            }
        };

        let line = text.trim();
        if line.is_empty() {
            continue;
        }

        match parse_record(line_number, line) {
            Ok(record) => records.push(record),
            Err(e) => {
                log::warn!("Skipping line {line_number}: JSON error - {}", e.message);
                defects.push(Defect {
                    line_number: e.line_number,
                    message: e.message,
                });
            }
        }
    }

    Ok(LoadedLog {
        dataset: Dataset::from_records(records),
        defects,
    })
}
