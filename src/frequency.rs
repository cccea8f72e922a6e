use crate::outlet::Outlet;
use crate::parser;
use ahash::AHashMap;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum FrequencyError {
    #[error("cannot read frequency table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Count threshold and floor applied when smoothing a corpus frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Smoothing {
    pub min_count: u64,
    pub floor: u64,
}

impl Smoothing {
    pub const WORDS: Smoothing = Smoothing { min_count: 5, floor: 3 };
    pub const LEMMAS: Smoothing = Smoothing { min_count: 10, floor: 5 };
}

/// Immutable token -> corpus count mapping.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    counts: AHashMap<String, u64>,
}

impl FrequencyTable {
    /// Loads a two-column `token\tcount` file. Lines of any other shape are skipped.
    pub fn load(path: &Path) -> Result<Self, FrequencyError> {
        let io_err = |source| FrequencyError::Io { path: path.to_path_buf(), source };
        let f = File::open(path).map_err(io_err)?;
        Self::from_reader(BufReader::new(f)).map_err(io_err)
    }

    pub fn from_reader<R: BufRead>(reader: R) -> io::Result<Self> {
        let mut counts = AHashMap::new();
        let mut skipped = 0usize;
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim_end_matches('\r');
            if line.is_empty() { continue; }
            let mut cols = line.split('\t');
            match (cols.next(), cols.next(), cols.next()) {
                (Some(tok), Some(cnt), None) => match cnt.trim().parse::<u64>() {
                    Ok(c) => { counts.insert(tok.to_string(), c); }
                    Err(_) => {
                        warn!(line = idx + 1, "skipping frequency entry with non-numeric count");
                        skipped += 1;
                    }
                },
                _ => { skipped += 1; }
            }
        }
        if skipped > 0 {
            warn!(skipped, "frequency table contained malformed lines");
        }
        Ok(Self { counts })
    }

    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, u64)>,
        S: Into<String>,
    {
        Self { counts: pairs.into_iter().map(|(k, v)| (k.into(), v)).collect() }
    }

    pub fn get(&self, token: &str) -> Option<u64> {
        self.counts.get(token).copied()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Natural log of the token's count, floored for rare or unseen tokens.
    pub fn log_frequency(&self, token: &str, smoothing: Smoothing) -> f64 {
        let c = match self.get(token) {
            Some(c) if c >= smoothing.min_count => c,
            _ => smoothing.floor,
        };
        (c as f64).ln()
    }
}

/// Word and lemma tables, loaded together once per run.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTables {
    pub words: FrequencyTable,
    pub lemmas: FrequencyTable,
}

impl FrequencyTables {
    pub fn load(word_path: &Path, lemma_path: &Path) -> Result<Self, FrequencyError> {
        Ok(Self { words: FrequencyTable::load(word_path)?, lemmas: FrequencyTable::load(lemma_path)? })
    }
}

/// Occurrence counts gathered from a headline log.
#[derive(Debug, Clone, Default)]
pub struct FrequencyCounts {
    pub words: HashMap<String, u64>,
    pub lemmas: HashMap<String, u64>,
    pub words_by_outlet: BTreeMap<Outlet, HashMap<String, u64>>,
    pub lemmas_by_outlet: BTreeMap<Outlet, HashMap<String, u64>>,
    pub headlines: usize,
    pub malformed: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct OutletTotals {
    pub outlet: Outlet,
    pub words: u64,
    pub lemmas: u64,
}

impl FrequencyCounts {
    /// Total token occurrences per outlet, in outlet order.
    pub fn outlet_totals(&self) -> Vec<OutletTotals> {
        Outlet::ALL
            .iter()
            .filter_map(|o| {
                let w = self.words_by_outlet.get(o)?;
                let l = self.lemmas_by_outlet.get(o);
                Some(OutletTotals {
                    outlet: *o,
                    words: w.values().sum(),
                    lemmas: l.map(|m| m.values().sum()).unwrap_or(0),
                })
            })
            .collect()
    }
}

/// Counts surface words and lemmas over a headline log.
pub fn count_frequencies<R: BufRead>(reader: R) -> io::Result<FrequencyCounts> {
    let mut out = FrequencyCounts::default();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let rec = match parser::parse_record(&line, idx + 1) {
            Ok(r) => r,
            Err(_) => { out.malformed += 1; continue; }
        };
        out.headlines += 1;
        let by_w = out.words_by_outlet.entry(rec.outlet).or_default();
        for w in parser::tokenize(&rec.raw_title) {
            *by_w.entry(w.to_string()).or_insert(0) += 1;
            *out.words.entry(w.to_string()).or_insert(0) += 1;
        }
        let by_l = out.lemmas_by_outlet.entry(rec.outlet).or_default();
        for l in parser::tokenize(&rec.lemma_title) {
            *by_l.entry(l.to_string()).or_insert(0) += 1;
            *out.lemmas.entry(l.to_string()).or_insert(0) += 1;
        }
    }
    Ok(out)
}

/// Writes entries with `count >= threshold` as `token\tcount`, most frequent first.
pub fn write_table<W: Write>(counts: &HashMap<String, u64>, threshold: u64, mut out: W) -> io::Result<usize> {
    let mut entries: Vec<(&String, &u64)> = counts.iter().filter(|(_, c)| **c >= threshold).collect();
    entries.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    for (tok, c) in &entries {
        writeln!(out, "{tok}\t{c}")?;
    }
    out.flush()?;
    Ok(entries.len())
}
