//! Histogram files: a JSON object mapping group names to records.

use std::ffi::OsString;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use ndhist::{BinningScheme, Histogram};
use ndhist_core::{Error, Result};
use serde_json::{Map, Value};

use crate::record::HistogramRecord;

fn read_groups(path: &Path) -> Result<Map<String, Value>> {
    let reader = BufReader::new(File::open(path)?);
    let value: Value = serde_json::from_reader(reader)?;
    match value {
        Value::Object(groups) => Ok(groups),
        other => Err(Error::Validation(format!(
            "{}: expected a JSON object of histogram groups, found {}",
            path.display(),
            json_kind(&other)
        ))),
    }
}

/// Replace the file at `path` with `groups`. The new contents go to a sibling
/// temp file first and are renamed over `path`, so a failed write leaves the
/// previous groups untouched.
fn write_groups(path: &Path, groups: &Map<String, Value>) -> Result<()> {
    let tmp = temp_sibling(path);
    let write = || -> Result<()> {
        let mut writer = BufWriter::new(File::create(&tmp)?);
        serde_json::to_writer_pretty(&mut writer, groups)?;
        writer.write_all(b"\n")?;
        writer.into_inner().map_err(|e| e.into_error())?.sync_all()?;
        Ok(())
    };
    if let Err(e) = write() {
        std::fs::remove_file(&tmp).ok();
        return Err(e);
    }
    std::fs::rename(&tmp, path)?;
    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or_default());
    name.push(".tmp");
    path.with_file_name(name)
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Store `record` under `name` in the file at `path`.
///
/// An existing file is opened for appending: other groups are kept. Replacing
/// an existing group requires `overwrite`. The file is rewritten through a
/// temp file and a rename, so an I/O error never loses the groups already in it.
pub fn save_record(
    record: &HistogramRecord,
    path: impl AsRef<Path>,
    name: &str,
    overwrite: bool,
) -> Result<()> {
    let path = path.as_ref();
    record.validate()?;

    let mut groups = if path.exists() { read_groups(path)? } else { Map::new() };
    if groups.contains_key(name) && !overwrite {
        return Err(Error::Validation(format!(
            "group '{}' already exists in {} (pass overwrite to replace it)",
            name,
            path.display()
        )));
    }
    groups.insert(name.to_string(), serde_json::to_value(record)?);

    write_groups(path, &groups)?;

    log::debug!("saved histogram '{}' ({} bins) to {}", name, record.bincontent.len(), path.display());
    Ok(())
}

/// Snapshot `hist` and store it under `name`. See [`save_record`].
pub fn save<B: BinningScheme, const N: usize>(
    hist: &Histogram<B, N>,
    path: impl AsRef<Path>,
    name: &str,
    overwrite: bool,
) -> Result<()> {
    save_record(&HistogramRecord::from_histogram(hist), path, name, overwrite)
}

/// Load the record stored under `name`.
pub fn load(path: impl AsRef<Path>, name: &str) -> Result<HistogramRecord> {
    let path = path.as_ref();
    let mut groups = read_groups(path)?;
    let value = groups.remove(name).ok_or_else(|| {
        Error::Validation(format!("no histogram group '{}' in {}", name, path.display()))
    })?;
    let record: HistogramRecord = serde_json::from_value(value)?;
    record.validate()?;
    Ok(record)
}

/// Names of all groups in the file, sorted.
pub fn list(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let mut names: Vec<String> = read_groups(path.as_ref())?.keys().cloned().collect();
    names.sort();
    Ok(names)
}
