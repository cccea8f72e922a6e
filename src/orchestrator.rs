use crate::arff;
use crate::config::RunConfig;
use crate::dataset::{Dataset, DatasetBuilder, PipelineError, RunCounters};
use crate::frequency::FrequencyTables;
use crate::outlet::Outlet;
use crate::schema::{FeatureSchema, SchemaOptions};
use chrono::NaiveDate;
use itertools::Itertools;
use serde::Serialize;
use std::fs::File;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub output: PathBuf,
    pub outlets: Vec<Outlet>,
    pub counters: RunCounters,
}

/// `<base>[-no-ids]-<code>..._<start>-<end>.arff`; an unbounded side reads `open`.
pub fn output_path(
    base: &str,
    include_identifier: bool,
    outlets: &[Outlet],
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> PathBuf {
    let mut s = String::from(base);
    if !include_identifier {
        s.push_str("-no-ids");
    }
    for o in outlets {
        s.push('-');
        s.push_str(o.code());
    }
    let fmt = |d: Option<NaiveDate>| d.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_else(|| "open".into());
    s.push('_');
    s.push_str(&fmt(start));
    s.push('-');
    s.push_str(&fmt(end));
    s.push_str(".arff");
    PathBuf::from(s)
}

/// Builds the full-outlet dataset and, in pairwise mode, one dataset per outlet pair.
pub struct RunOrchestrator {
    config: RunConfig,
    tables: FrequencyTables,
    top_lemmas: Vec<String>,
    template: FeatureSchema,
    running: Option<Arc<AtomicBool>>,
}

impl RunOrchestrator {
    /// Acquires every run resource up front; any failure here aborts before output is written.
    pub fn new(config: RunConfig) -> Result<Self, PipelineError> {
        File::open(&config.input)
            .map_err(|source| PipelineError::MissingInput { path: config.input.clone(), source })?;
        let tables = FrequencyTables::load(&config.word_freq_file, &config.lemma_freq_file)?;
        let top_lemmas = config.top_lemmas()?;
        info!(words = tables.words.len(), lemmas = tables.lemmas.len(), "frequency tables loaded");
        Ok(Self::with_tables(config, tables, top_lemmas))
    }

    pub fn with_tables(config: RunConfig, tables: FrequencyTables, top_lemmas: Vec<String>) -> Self {
        let template = FeatureSchema::build(&SchemaOptions {
            optimize_features: config.optimize_features,
            include_identifier: config.include_identifier,
            outlets: config.outlets.clone(),
        });
        Self { config, tables, top_lemmas, template, running: None }
    }

    pub fn with_cancel_flag(mut self, running: Arc<AtomicBool>) -> Self {
        self.running = Some(running);
        self
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Outlet sets to build, full selection first, then every unordered pair.
    pub fn plans(&self) -> Vec<Vec<Outlet>> {
        let mut plans = vec![self.config.outlets.clone()];
        if self.config.write_pairs {
            plans.extend(
                self.config
                    .outlets
                    .iter()
                    .copied()
                    .tuple_combinations()
                    .map(|(a, b)| vec![a, b]),
            );
        }
        plans
    }

    pub fn build(&self, outlets: &[Outlet]) -> Result<Dataset, PipelineError> {
        let schema = self.template.with_outlets(outlets);
        let mut builder = DatasetBuilder::new(
            schema,
            &self.tables,
            &self.top_lemmas,
            self.config.start_date,
            self.config.end_date,
        )
        .with_punctuation(self.config.punctuation);
        if let Some(flag) = &self.running {
            builder = builder.with_cancel_flag(flag.clone());
        }
        builder.build_from_path(&self.config.input)
    }

    pub fn output_path_for(&self, outlets: &[Outlet]) -> PathBuf {
        output_path(
            &self.config.output_base,
            self.config.include_identifier,
            outlets,
            self.config.start_date,
            self.config.end_date,
        )
    }

    /// Builds and saves every planned dataset, one at a time.
    pub fn run(&self) -> Result<Vec<RunReport>, PipelineError> {
        let mut reports = Vec::new();
        for outlets in self.plans() {
            let output = self.output_path_for(&outlets);
            info!(input = %self.config.input.display(), output = %output.display(), ?outlets, "extracting features");
            let dataset = self.build(&outlets)?;
            arff::save(&dataset, &output)?;
            reports.push(RunReport { output, outlets, counters: dataset.counters });
        }
        Ok(reports)
    }
}
