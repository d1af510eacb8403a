//! CSV output of transformed records.

use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::errors::EtlError;
use crate::records::StadiumRecord;

/// Builds the timestamped output filename.
///
/// The time portion uses underscores instead of colons so the name is safe
/// on every filesystem; microsecond granularity keeps successive runs from
/// colliding.
#[must_use]
pub fn output_filename(now: &DateTime<Local>) -> String {
    format!(
        "stadium_cleaned {}_{}.csv",
        now.format("%Y-%m-%d"),
        now.format("%H_%M_%S%.6f")
    )
}

/// Writes the records as a CSV file under `output_dir`.
///
/// A header row is written first; columns follow the record field order and
/// no index column is emitted. The directory must already exist. Returns the
/// path of the written file.
pub fn write_records(
    records: &[StadiumRecord],
    output_dir: &Path,
) -> Result<PathBuf, EtlError> {
    let path = output_dir.join(output_filename(&Local::now()));

    let mut writer = csv::Writer::from_path(&path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    info!(path = %path.display(), rows = records.len(), "wrote stadium records");
    Ok(path)
}
