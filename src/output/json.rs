//! JSON results file

use crate::output::report::{BatchReport, OutputResult};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes the report as pretty-printed JSON
///
/// Missing parent directories are created.
///
/// # Arguments
///
/// * `report` - The batch report
/// * `output_path` - Path of the results file
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the results file
/// * `Err(OutputError)` - Failed to create or write the file
pub fn write_json_report(report: &BatchReport, output_path: &Path) -> OutputResult<()> {
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(File::create(output_path)?);
    serde_json::to_writer_pretty(&mut writer, report)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    tracing::info!("Saved results to {}", output_path.display());
    Ok(())
}
