use crate::lexicon::{PunctuationClass, TOP_LEMMAS, TOP_LEMMA_COUNT};
use crate::outlet::{self, Outlet};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const INPUT_KEY: &str = "features-input";
pub const OUTPUT_KEY: &str = "features-output";
pub const OUTLETS_KEY: &str = "features-outlets";
pub const WRITE_PAIRED_KEY: &str = "features-write-paired-files";
pub const OPTIMIZE_FEATURES_KEY: &str = "optimize-features";
pub const FEATURES_HAVE_IDS_KEY: &str = "features-have-ids";
pub const START_DATE_KEY: &str = "features-start-date";
pub const END_DATE_KEY: &str = "features-end-date";
pub const WORD_FREQ_FILE_KEY: &str = "features-word-freq-file";
pub const LEMMA_FREQ_FILE_KEY: &str = "features-lemma-freq-file";
pub const PUNCTUATION_KEY: &str = "features-punctuation";
pub const TOP_LEMMAS_FILE_KEY: &str = "features-top-lemmas-file";

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("missing required key '{0}'")]
    MissingKey(&'static str),
    #[error("'{key}': '{value}' is not a YYYY-MM-DD date")]
    BadDate { key: &'static str, value: String },
    #[error("'{key}': {source}")]
    BadOutlet {
        key: &'static str,
        #[source]
        source: outlet::UnknownOutlet,
    },
    #[error("'{key}': {reason}")]
    BadValue { key: &'static str, reason: String },
}

/// Settings for one feature-extraction run.
#[derive(Debug, Clone, Serialize)]
pub struct RunConfig {
    pub input: PathBuf,
    pub output_base: String,
    pub outlets: Vec<Outlet>,
    pub optimize_features: bool,
    pub include_identifier: bool,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub write_pairs: bool,
    pub word_freq_file: PathBuf,
    pub lemma_freq_file: PathBuf,
    pub punctuation: PunctuationClass,
    pub top_lemmas_file: Option<PathBuf>,
}

impl RunConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        Self::from_map(&read_kv_file(path)?)
    }

    pub fn from_map(kv: &BTreeMap<String, String>) -> Result<Self, ConfigError> {
        let get = |key: &str| kv.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());
        let required = |key: &'static str| get(key).map(str::to_string).ok_or(ConfigError::MissingKey(key));
        let flag = |key: &str| get(key).map(|v| v.eq_ignore_ascii_case("true")).unwrap_or(false);
        let date = |key: &'static str| -> Result<Option<NaiveDate>, ConfigError> {
            match get(key) {
                None => Ok(None),
                Some(v) => NaiveDate::parse_from_str(v, DATE_FORMAT)
                    .map(Some)
                    .map_err(|_| ConfigError::BadDate { key, value: v.to_string() }),
            }
        };

        let outlets = outlet::parse_outlet_list(get(OUTLETS_KEY).unwrap_or("ALL"))
            .map_err(|source| ConfigError::BadOutlet { key: OUTLETS_KEY, source })?;
        if outlets.is_empty() {
            return Err(ConfigError::BadValue { key: OUTLETS_KEY, reason: "no outlets selected".into() });
        }
        let punctuation = match get(PUNCTUATION_KEY) {
            None => PunctuationClass::default(),
            Some(v) => v.parse().map_err(|reason| ConfigError::BadValue { key: PUNCTUATION_KEY, reason })?,
        };

        let cfg = Self {
            input: PathBuf::from(required(INPUT_KEY)?),
            output_base: required(OUTPUT_KEY)?,
            outlets,
            optimize_features: flag(OPTIMIZE_FEATURES_KEY),
            include_identifier: flag(FEATURES_HAVE_IDS_KEY),
            start_date: date(START_DATE_KEY)?,
            end_date: date(END_DATE_KEY)?,
            write_pairs: flag(WRITE_PAIRED_KEY),
            word_freq_file: PathBuf::from(required(WORD_FREQ_FILE_KEY)?),
            lemma_freq_file: PathBuf::from(required(LEMMA_FREQ_FILE_KEY)?),
            punctuation,
            top_lemmas_file: get(TOP_LEMMAS_FILE_KEY).map(PathBuf::from),
        };
        if let (Some(s), Some(e)) = (cfg.start_date, cfg.end_date) {
            if s > e {
                return Err(ConfigError::BadValue { key: START_DATE_KEY, reason: format!("{s} is after {e}") });
            }
        }
        Ok(cfg)
    }

    /// The configured top-lemma list, or the built-in one.
    pub fn top_lemmas(&self) -> Result<Vec<String>, ConfigError> {
        let Some(path) = &self.top_lemmas_file else {
            return Ok(TOP_LEMMAS.iter().map(|s| s.to_string()).collect());
        };
        let io_err = |source| ConfigError::Io { path: path.clone(), source };
        let f = File::open(path).map_err(io_err)?;
        let mut lemmas = Vec::with_capacity(TOP_LEMMA_COUNT);
        for line in BufReader::new(f).lines() {
            let line = line.map_err(io_err)?;
            let lemma = line.trim();
            if !lemma.is_empty() {
                lemmas.push(lemma.to_string());
            }
        }
        if lemmas.len() != TOP_LEMMA_COUNT {
            return Err(ConfigError::BadValue {
                key: TOP_LEMMAS_FILE_KEY,
                reason: format!("expected {TOP_LEMMA_COUNT} lemmas, found {}", lemmas.len()),
            });
        }
        Ok(lemmas)
    }
}

/// Reads a flat `key:value` file; blank lines and `#` comments are skipped.
pub fn read_kv_file(path: &Path) -> Result<BTreeMap<String, String>, ConfigError> {
    let io_err = |source| ConfigError::Io { path: path.to_path_buf(), source };
    let f = File::open(path).map_err(io_err)?;
    parse_kv(BufReader::new(f)).map_err(io_err)
}

pub fn parse_kv<R: BufRead>(reader: R) -> io::Result<BTreeMap<String, String>> {
    let mut out = BTreeMap::new();
    for line in reader.lines() {
        let line = line?;
        let t = line.trim();
        if t.is_empty() || t.starts_with('#') { continue; }
        if let Some((k, v)) = t.split_once(':') {
            out.insert(k.trim().to_string(), v.trim().to_string());
        }
    }
    Ok(out)
}
