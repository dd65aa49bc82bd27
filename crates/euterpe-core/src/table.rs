//! Snapshot files passed between stages.
//!
//! Flat stages use quoted CSV, list-valued stages use JSON Lines. Writes land in
//! a sibling `.tmp` file that is renamed over the target once complete.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::PipelineError;

pub fn read_csv<T: DeserializeOwned>(path: &Path, required: &[&str]) -> Result<Vec<T>, PipelineError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| PipelineError::csv(path, e))?;

    let headers = reader.headers().map_err(|e| PipelineError::csv(path, e))?.clone();
    if headers.is_empty() {
        tracing::debug!("{} has no header, treating as empty", path.display());
        return Ok(Vec::new());
    }

    let missing: Vec<String> = required
        .iter()
        .filter(|col| !headers.iter().any(|h| h == **col))
        .map(|col| col.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(PipelineError::MissingColumns {
            path: path.to_path_buf(),
            columns: missing,
        });
    }

    reader
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(|e| PipelineError::csv(path, e))
}

pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), PipelineError> {
    let tmp = prepare_tmp(path)?;

    {
        let mut writer = csv::WriterBuilder::new()
            .quote_style(csv::QuoteStyle::Always)
            .from_path(&tmp)
            .map_err(|e| PipelineError::csv(path, e))?;
        for row in rows {
            writer.serialize(row).map_err(|e| PipelineError::csv(path, e))?;
        }
        writer.flush().map_err(|e| PipelineError::io(path, e))?;
    }

    commit_tmp(&tmp, path)
}

pub fn read_jsonl<T: DeserializeOwned>(path: &Path, required: &[&str]) -> Result<Vec<T>, PipelineError> {
    let file = File::open(path).map_err(|e| PipelineError::io(path, e))?;
    let mut rows = Vec::new();

    for (idx, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| PipelineError::io(path, e))?;
        if line.trim().is_empty() {
            continue;
        }

        let json_err = |source| PipelineError::Json {
            path: path.to_path_buf(),
            line: idx + 1,
            source,
        };
        let value: serde_json::Value = serde_json::from_str(&line).map_err(json_err)?;

        if rows.is_empty() {
            let missing: Vec<String> = required
                .iter()
                .filter(|col| value.get(**col).is_none())
                .map(|col| col.to_string())
                .collect();
            if !missing.is_empty() {
                return Err(PipelineError::MissingColumns {
                    path: path.to_path_buf(),
                    columns: missing,
                });
            }
        }

        rows.push(serde_json::from_value(value).map_err(json_err)?);
    }

    Ok(rows)
}

pub fn write_jsonl<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), PipelineError> {
    let tmp = prepare_tmp(path)?;

    {
        let file = File::create(&tmp).map_err(|e| PipelineError::io(&tmp, e))?;
        let mut writer = BufWriter::new(file);
        for (idx, row) in rows.iter().enumerate() {
            serde_json::to_writer(&mut writer, row).map_err(|source| PipelineError::Json {
                path: path.to_path_buf(),
                line: idx + 1,
                source,
            })?;
            writer.write_all(b"\n").map_err(|e| PipelineError::io(&tmp, e))?;
        }
        writer.flush().map_err(|e| PipelineError::io(&tmp, e))?;
    }

    commit_tmp(&tmp, path)
}

fn prepare_tmp(path: &Path) -> Result<PathBuf, PipelineError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| PipelineError::io(parent, e))?;
    }

    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    Ok(path.with_file_name(name))
}

fn commit_tmp(tmp: &Path, path: &Path) -> Result<(), PipelineError> {
    fs::rename(tmp, path).map_err(|e| PipelineError::io(path, e))
}
