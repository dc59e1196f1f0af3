use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::Local;

use crate::{
    domain::profile::{ProfileRecord, EXPORT_COLUMNS},
    error::ExportError,
};

pub fn default_export_filename() -> String {
    format!(
        "linkedin_profiles_{}.csv",
        Local::now().format("%Y%m%d_%H%M%S")
    )
}

/// Writes `profiles` as CSV under `directory` and returns the absolute path.
/// Nothing is written for an empty batch.
pub fn export_to_csv(
    profiles: &[ProfileRecord],
    directory: &Path,
    filename: Option<&str>,
) -> Result<Option<PathBuf>, ExportError> {
    if profiles.is_empty() {
        return Ok(None);
    }

    fs::create_dir_all(directory)?;
    let filename = filename
        .map(str::to_string)
        .unwrap_or_else(default_export_filename);
    let filepath = directory.join(filename);

    let mut writer = csv::Writer::from_path(&filepath)?;
    writer.write_record(EXPORT_COLUMNS)?;
    for profile in profiles {
        writer.write_record(EXPORT_COLUMNS.iter().map(|column| profile.cell(column)))?;
    }
    writer.flush()?;

    let filepath = fs::canonicalize(&filepath)?;
    log::info!(
        "Exported {} profiles to {}",
        profiles.len(),
        filepath.display()
    );
    Ok(Some(filepath))
}
