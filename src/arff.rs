//! Sparse ARFF serialization of a [`Dataset`].

use crate::dataset::Dataset;
use crate::schema::AttributeKind;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const RELATION: &str = "Instances";

#[derive(Debug, Error)]
pub enum ArffError {
    #[error("cannot write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Write(#[from] io::Error),
    #[error("class '{0}' is not a level of the schema")]
    UnknownClassLevel(String),
}

pub fn write_dataset<W: Write>(dataset: &Dataset, relation: &str, mut out: W) -> Result<(), ArffError> {
    writeln!(out, "@relation {}", quote(relation))?;
    writeln!(out)?;
    for attr in dataset.schema.attributes() {
        let kind = match &attr.kind {
            AttributeKind::Numeric => "numeric".to_string(),
            AttributeKind::Identifier => "string".to_string(),
            AttributeKind::Categorical(levels) => {
                let levels: Vec<String> = levels.iter().map(|l| quote(l)).collect();
                format!("{{{}}}", levels.join(","))
            }
        };
        writeln!(out, "@attribute {} {}", quote(&attr.name), kind)?;
    }
    writeln!(out)?;
    writeln!(out, "@data")?;

    let mut cells: Vec<String> = Vec::new();
    for v in &dataset.vectors {
        cells.clear();
        for (pos, attr) in dataset.schema.attributes().iter().enumerate() {
            match &attr.kind {
                AttributeKind::Numeric => {
                    let x = v.values()[pos];
                    if x != 0.0 {
                        cells.push(format!("{pos} {}", format_number(x)));
                    }
                }
                AttributeKind::Identifier => {
                    cells.push(format!("{pos} {}", quote_always(v.identifier().unwrap_or(""))));
                }
                AttributeKind::Categorical(levels) => {
                    let name = v.label().name();
                    if !levels.iter().any(|l| l == name) {
                        return Err(ArffError::UnknownClassLevel(name.to_string()));
                    }
                    cells.push(format!("{pos} {}", quote(name)));
                }
            }
        }
        writeln!(out, "{{{}}}", cells.join(","))?;
    }
    out.flush()?;
    Ok(())
}

/// Writes next to `path` and renames into place, so a failed run leaves no file behind.
pub fn save(dataset: &Dataset, path: &Path) -> Result<(), ArffError> {
    let io_err = |source| ArffError::Io { path: path.to_path_buf(), source };
    let tmp = tmp_path(path);
    let result = File::create(&tmp)
        .map_err(io_err)
        .and_then(|f| write_dataset(dataset, RELATION, BufWriter::new(f)))
        .and_then(|_| fs::rename(&tmp, path).map_err(io_err));
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

pub fn format_number(x: f64) -> String {
    if x.fract() == 0.0 && x.abs() < 1e15 {
        format!("{}", x as i64)
    } else {
        format!("{x}")
    }
}

fn needs_quotes(s: &str) -> bool {
    s.is_empty()
        || s == "?"
        || s.chars().any(|c| matches!(c, ' ' | '\t' | ',' | '{' | '}' | '\'' | '"' | '%' | '\\' | '\n' | '\r'))
}

fn quote(s: &str) -> String {
    if needs_quotes(s) { quote_always(s) } else { s.to_string() }
}

fn quote_always(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}
