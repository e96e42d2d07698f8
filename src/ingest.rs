//! Reading ingestion
//!
//! Parses `timestamp_ms;accel_x;accel_y;accel_z` lines (no header) into
//! [`SensorSample`]s in file order. Whitespace around fields is ignored and
//! blank lines are skipped. The first malformed field aborts the read.

use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use std::str::FromStr;

use csv::{ReaderBuilder, StringRecord, Trim};
use log::debug;

use crate::sample::SensorSample;
use crate::{AttitudeError, Result};

const SAMPLE_FIELDS: [&str; 4] = ["timestamp_ms", "accel_x", "accel_y", "accel_z"];

/// `;`-delimited, headerless reader shared by the input and output formats.
pub(crate) fn delimited_reader<R: Read>(reader: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader)
}

pub(crate) fn record_line(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}

pub(crate) fn check_field_count(record: &StringRecord, expected: usize) -> Result<()> {
    if record.len() != expected {
        return Err(AttitudeError::FieldCount {
            line: record_line(record),
            expected,
            got: record.len(),
        });
    }
    Ok(())
}

pub(crate) fn parse_field<T: FromStr>(
    record: &StringRecord,
    index: usize,
    field: &'static str,
) -> Result<T> {
    let raw = record.get(index).unwrap_or_default();
    raw.parse::<T>().map_err(|_| AttitudeError::Parse {
        line: record_line(record),
        field,
        value: raw.to_string(),
    })
}

/// Parse samples from any reader.
pub fn parse_samples<R: Read>(reader: R) -> Result<Vec<SensorSample>> {
    let mut rdr = delimited_reader(reader);
    let mut samples = Vec::new();

    for record in rdr.records() {
        let record = record?;
        check_field_count(&record, SAMPLE_FIELDS.len())?;

        samples.push(SensorSample::new(
            parse_field(&record, 0, SAMPLE_FIELDS[0])?,
            parse_field(&record, 1, SAMPLE_FIELDS[1])?,
            parse_field(&record, 2, SAMPLE_FIELDS[2])?,
            parse_field(&record, 3, SAMPLE_FIELDS[3])?,
        ));
    }

    Ok(samples)
}

/// Read all samples from `path`.
///
/// A missing or unreadable file is an [`AttitudeError::Io`]; it is never
/// treated as an empty log.
pub fn read_samples(path: &Path) -> Result<Vec<SensorSample>> {
    let file = File::open(path).map_err(|e| AttitudeError::io(path, e))?;
    let samples = parse_samples(file)?;
    debug!("read {} samples from {}", samples.len(), path.display());
    Ok(samples)
}

/// Write samples in the input format, e.g. for synthetic logs.
pub fn write_samples_to<W: Write>(writer: &mut W, samples: &[SensorSample]) -> std::io::Result<()> {
    for s in samples {
        writeln!(
            writer,
            "{};{};{};{}",
            s.timestamp_ms(),
            s.accel_x(),
            s.accel_y(),
            s.accel_z()
        )?;
    }
    writer.flush()
}

pub fn write_samples(path: &Path, samples: &[SensorSample]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| AttitudeError::io(parent, e))?;
    }
    let file = File::create(path).map_err(|e| AttitudeError::io(path, e))?;
    write_samples_to(&mut BufWriter::new(file), samples).map_err(|e| AttitudeError::io(path, e))
}
