//! Estimation emission
//!
//! Writes one `timestamp_ms; roll; pitch` line per estimate, no header, in
//! the order given. Angles use the shortest `Display` form that round-trips
//! exactly, so re-reading a file reproduces the written values.

use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use log::debug;

use crate::estimate::OrientationEstimate;
use crate::ingest::{check_field_count, delimited_reader, parse_field};
use crate::{AttitudeError, Result};

const ESTIMATE_FIELDS: [&str; 3] = ["timestamp_ms", "roll", "pitch"];

/// Write estimates to any writer.
pub fn write_estimates_to<W: Write>(
    writer: &mut W,
    estimates: &[OrientationEstimate],
) -> std::io::Result<()> {
    for e in estimates {
        writeln!(
            writer,
            "{}; {}; {}",
            e.timestamp_ms(),
            e.roll_rad(),
            e.pitch_rad()
        )?;
    }
    writer.flush()
}

/// Write estimates to `path`, creating parent directories as needed.
pub fn write_estimates(path: &Path, estimates: &[OrientationEstimate]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| AttitudeError::io(parent, e))?;
    }

    let file = File::create(path).map_err(|e| AttitudeError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    write_estimates_to(&mut writer, estimates).map_err(|e| AttitudeError::io(path, e))?;

    debug!("wrote {} estimates to {}", estimates.len(), path.display());
    Ok(())
}

/// Parse estimates previously written by [`write_estimates_to`].
pub fn parse_estimates<R: Read>(reader: R) -> Result<Vec<OrientationEstimate>> {
    let mut rdr = delimited_reader(reader);
    let mut estimates = Vec::new();

    for record in rdr.records() {
        let record = record?;
        check_field_count(&record, ESTIMATE_FIELDS.len())?;

        estimates.push(OrientationEstimate::new(
            parse_field(&record, 0, ESTIMATE_FIELDS[0])?,
            parse_field(&record, 1, ESTIMATE_FIELDS[1])?,
            parse_field(&record, 2, ESTIMATE_FIELDS[2])?,
        ));
    }

    Ok(estimates)
}

pub fn read_estimates(path: &Path) -> Result<Vec<OrientationEstimate>> {
    let file = File::open(path).map_err(|e| AttitudeError::io(path, e))?;
    parse_estimates(file)
}
