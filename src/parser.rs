use crate::outlet::Outlet;
use chrono::NaiveDateTime;
use thiserror::Error;

/// Number of tab-separated columns in a headline log line:
/// time-changed, outlet, epochs, raw title, lemmatized title.
pub const COLUMN_COUNT: usize = 5;

/// Timestamp layout written by the scraper, e.g. `Wed02-25-2015_12-15PM`.
pub const LOG_TIMESTAMP_FORMAT: &str = "%a%m-%d-%Y_%I-%M%p";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("expected 5 tab-separated columns, found {columns}")]
    Malformed { columns: usize },
    #[error("unknown outlet '{0}'")]
    UnknownOutlet(String),
    #[error("unparsable timestamp '{0}'")]
    BadTimestamp(String),
    #[error("invalid epoch count '{0}'")]
    BadEpochCount(String),
}

impl RecordError {
    /// Unparsable dates are tallied apart from every other shape problem.
    pub fn is_bad_date(&self) -> bool {
        matches!(self, RecordError::BadTimestamp(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub line_number: usize,
    pub timestamp: NaiveDateTime,
    /// Timestamp column exactly as written; used for record identifiers.
    pub timestamp_raw: String,
    pub outlet: Outlet,
    pub epoch_count: u32,
    pub raw_title: String,
    pub lemma_title: String,
}

impl Record {
    /// `timestamp:OUTLET`, the traceability key of a record.
    pub fn identifier(&self) -> String {
        format!("{}:{}", self.timestamp_raw, self.outlet)
    }
}

pub fn parse_record(line: &str, line_number: usize) -> Result<Record, RecordError> {
    let line = line.trim_end_matches(['\n', '\r']);
    let columns: Vec<&str> = line.split('\t').collect();
    if columns.len() != COLUMN_COUNT {
        return Err(RecordError::Malformed { columns: columns.len() });
    }

    let outlet: Outlet = columns[1]
        .parse()
        .map_err(|_| RecordError::UnknownOutlet(columns[1].to_string()))?;
    let timestamp = parse_timestamp(columns[0])
        .ok_or_else(|| RecordError::BadTimestamp(columns[0].to_string()))?;
    let epoch_count = match columns[2].trim().parse::<u32>() {
        Ok(n) if n >= 1 => n,
        _ => return Err(RecordError::BadEpochCount(columns[2].to_string())),
    };

    Ok(Record {
        line_number,
        timestamp,
        timestamp_raw: columns[0].to_string(),
        outlet,
        epoch_count,
        raw_title: columns[3].to_string(),
        lemma_title: columns[4].to_string(),
    })
}

/// Parses the scraper's timestamp layout, falling back to common ISO-like forms.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    let fmts = [
        LOG_TIMESTAMP_FORMAT,
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
    ];
    for f in fmts.iter() {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, f) {
            return Some(ndt);
        }
    }
    None
}

/// Splits a title on whitespace runs, preserving order.
pub fn tokenize(title: &str) -> Vec<&str> {
    title.split_whitespace().collect()
}
