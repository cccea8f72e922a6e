use crate::arff::ArffError;
use crate::config::ConfigError;
use crate::filter::{BoundaryState, Decision, RecordFilter};
use crate::frequency::{FrequencyError, FrequencyTables};
use crate::lexicon::PunctuationClass;
use crate::outlet::Outlet;
use crate::parser;
use crate::schema::{Feature, FeatureSchema};
use crate::vectorizer::{RecordVectorizer, Vectorized};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("cannot open input {path}: {source}")]
    MissingInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("run cancelled")]
    Cancelled,
    #[error(transparent)]
    Frequency(#[from] FrequencyError),
    #[error(transparent)]
    Serialize(#[from] ArffError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// One headline's values, positionally aligned with its schema.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    values: Vec<f64>,
    identifier: Option<String>,
    label: Outlet,
}

impl FeatureVector {
    /// All-zero vector labelled `label`.
    pub fn new(schema: &FeatureSchema, label: Outlet) -> Self {
        Self { values: vec![0.0; schema.len()], identifier: None, label }
    }

    pub fn set_at(&mut self, pos: usize, value: f64) {
        self.values[pos] = value;
    }

    pub fn add_at(&mut self, pos: usize, delta: f64) {
        self.values[pos] += delta;
    }

    pub fn set_identifier(&mut self, id: String) {
        self.identifier = Some(id);
    }

    /// Numeric value of `feature`, if the schema carries it.
    pub fn get(&self, schema: &FeatureSchema, feature: Feature) -> Option<f64> {
        schema.position(feature).map(|p| self.values[p])
    }

    /// Dense numeric slots; identifier and class slots hold 0.0.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    pub fn label(&self) -> Outlet {
        self.label
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunCounters {
    pub accepted: usize,
    pub malformed: usize,
    pub bad_dates: usize,
    pub alignment_failures: usize,
    /// Records outside the outlet selection or date window.
    pub filtered: usize,
    /// Post-window records kept as the boundary carry-over.
    pub carried_over: usize,
}

impl RunCounters {
    pub fn summary_line(&self) -> String {
        format!(
            "wrote {} vectors with {} malformed lines, {} bad dates and {} alignment failures ({} filtered)",
            self.accepted, self.malformed, self.bad_dates, self.alignment_failures, self.filtered
        )
    }
}

#[derive(Debug, Clone)]
pub struct Dataset {
    pub schema: FeatureSchema,
    pub vectors: Vec<FeatureVector>,
    pub counters: RunCounters,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

/// Streams a headline log through filtering and vectorization.
pub struct DatasetBuilder<'a> {
    schema: FeatureSchema,
    tables: &'a FrequencyTables,
    top_lemmas: &'a [String],
    punct: PunctuationClass,
    filter: RecordFilter,
    running: Option<Arc<AtomicBool>>,
}

impl<'a> DatasetBuilder<'a> {
    pub fn new(
        schema: FeatureSchema,
        tables: &'a FrequencyTables,
        top_lemmas: &'a [String],
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Self {
        let filter = RecordFilter::new(schema.outlets(), start, end);
        Self { schema, tables, top_lemmas, punct: PunctuationClass::default(), filter, running: None }
    }

    pub fn with_punctuation(mut self, punct: PunctuationClass) -> Self {
        self.punct = punct;
        self
    }

    /// Checked between records; clearing it aborts the build with [`PipelineError::Cancelled`].
    pub fn with_cancel_flag(mut self, running: Arc<AtomicBool>) -> Self {
        self.running = Some(running);
        self
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn build_from_path(&self, path: &Path) -> Result<Dataset, PipelineError> {
        let f = File::open(path)
            .map_err(|source| PipelineError::MissingInput { path: path.to_path_buf(), source })?;
        self.build_from_reader(BufReader::new(f))
    }

    pub fn build_from_reader<R: BufRead>(&self, reader: R) -> Result<Dataset, PipelineError> {
        let vectorizer = RecordVectorizer::new(&self.schema, self.tables, self.top_lemmas, self.punct);
        let mut boundary = BoundaryState::new();
        let mut counters = RunCounters::default();
        let mut vectors = Vec::new();

        for (idx, line) in reader.lines().enumerate() {
            if let Some(flag) = &self.running {
                if !flag.load(Ordering::SeqCst) {
                    return Err(PipelineError::Cancelled);
                }
            }
            let line = line?;
            let line_number = idx + 1;
            let record = match parser::parse_record(&line, line_number) {
                Ok(r) => r,
                Err(e) if e.is_bad_date() => {
                    warn!(line = line_number, error = %e, "bad date");
                    counters.bad_dates += 1;
                    continue;
                }
                Err(e) => {
                    debug!(line = line_number, error = %e, "malformed line");
                    counters.malformed += 1;
                    continue;
                }
            };

            match self.filter.decide(&record, &mut boundary) {
                Decision::Accept => {}
                Decision::AcceptCarryOver => counters.carried_over += 1,
                _ => {
                    counters.filtered += 1;
                    continue;
                }
            }

            let out = vectorizer.vectorize(&record);
            if let Some(failure) = out.failure() {
                debug!(
                    line = line_number,
                    raw = %record.raw_title,
                    lemmas = %record.lemma_title,
                    surface_index = failure.surface_index,
                    "failed alignment"
                );
                counters.alignment_failures += 1;
            }
            vectors.push(out.into_vector());
            counters.accepted += 1;
        }

        info!(outlets = ?self.schema.outlets(), "{}", counters.summary_line());
        Ok(Dataset { schema: self.schema.clone(), vectors, counters })
    }
}

/// Convenience for callers that only need the vectorized records of a single line.
pub fn vectorize_line(
    line: &str,
    schema: &FeatureSchema,
    tables: &FrequencyTables,
    top_lemmas: &[String],
    punct: PunctuationClass,
) -> Result<Vectorized, parser::RecordError> {
    let record = parser::parse_record(line, 1)?;
    Ok(RecordVectorizer::new(schema, tables, top_lemmas, punct).vectorize(&record))
}
