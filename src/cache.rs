//! CSV persistence of the course catalog

use crate::error::Result;
use crate::model::CourseRecord;
use std::path::Path;

pub fn load(path: &Path) -> Result<Vec<CourseRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    for record in reader.deserialize() {
        records.push(record?);
    }
    Ok(records)
}

/// Writes `records` in order, creating missing parent directories.
pub fn store(path: &Path, records: &[CourseRecord]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}
