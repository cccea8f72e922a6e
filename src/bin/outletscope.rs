use anyhow::Context;
use clap::{Parser, Subcommand};
use outletscope::config::{self, RunConfig};
use outletscope::frequency;
use outletscope::orchestrator::RunOrchestrator;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "outletscope", version, about = "Headline feature extraction for outlet prediction")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Turn a lemmatized headline log into ARFF datasets
    Extract {
        /// Flat `key:value` configuration file
        #[arg(long = "config")]
        config: Option<PathBuf>,
        #[arg(long = "input")] input: Option<String>,
        /// Output path prefix
        #[arg(long = "output")] output: Option<String>,
        /// Comma-separated outlet names or codes, or ALL
        #[arg(long = "outlets")] outlets: Option<String>,
        /// Trim the schema to the reduced attribute set
        #[arg(long = "optimize", default_value_t = false)] optimize: bool,
        /// Include the timestamp:outlet identifier attribute
        #[arg(long = "ids", default_value_t = false)] ids: bool,
        /// Window start (YYYY-MM-DD)
        #[arg(long = "start")] start: Option<String>,
        /// Window end (YYYY-MM-DD), inclusive
        #[arg(long = "end")] end: Option<String>,
        /// Also write one dataset per outlet pair
        #[arg(long = "pairs", default_value_t = false)] pairs: bool,
        #[arg(long = "word-freq")] word_freq: Option<String>,
        #[arg(long = "lemma-freq")] lemma_freq: Option<String>,
        /// Punctuation class: ascii | ascii-dashes
        #[arg(long = "punctuation")] punctuation: Option<String>,
        /// File with the 50 top lemmas, one per line
        #[arg(long = "top-lemmas")] top_lemmas: Option<String>,
    },
    /// Count word and lemma occurrences in a headline log
    CountFreqs {
        input: PathBuf,
        output_base: String,
        #[arg(long = "threshold", default_value_t = 5)] threshold: u64,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Command::Extract {
            config: config_path, input, output, outlets, optimize, ids, start, end, pairs,
            word_freq, lemma_freq, punctuation, top_lemmas,
        } => {
            let mut kv: BTreeMap<String, String> = match &config_path {
                Some(p) => config::read_kv_file(p).with_context(|| format!("reading config {}", p.display()))?,
                None => BTreeMap::new(),
            };
            let mut set = |key: &str, v: Option<String>| {
                if let Some(v) = v { kv.insert(key.to_string(), v); }
            };
            set(config::INPUT_KEY, input);
            set(config::OUTPUT_KEY, output);
            set(config::OUTLETS_KEY, outlets);
            set(config::START_DATE_KEY, start);
            set(config::END_DATE_KEY, end);
            set(config::WORD_FREQ_FILE_KEY, word_freq);
            set(config::LEMMA_FREQ_FILE_KEY, lemma_freq);
            set(config::PUNCTUATION_KEY, punctuation);
            set(config::TOP_LEMMAS_FILE_KEY, top_lemmas);
            if optimize { set(config::OPTIMIZE_FEATURES_KEY, Some("true".into())); }
            if ids { set(config::FEATURES_HAVE_IDS_KEY, Some("true".into())); }
            if pairs { set(config::WRITE_PAIRED_KEY, Some("true".into())); }

            let cfg = RunConfig::from_map(&kv).context("invalid configuration")?;
            run_extract(cfg)
        }
        Command::CountFreqs { input, output_base, threshold } => run_count(input, output_base, threshold),
    }
}

fn run_extract(cfg: RunConfig) -> anyhow::Result<()> {
    let running = Arc::new(AtomicBool::new(true));
    {
        let r = running.clone();
        let _ = ctrlc::set_handler(move || { r.store(false, Ordering::SeqCst); });
    }
    let orchestrator = RunOrchestrator::new(cfg)
        .context("acquiring run inputs")?
        .with_cancel_flag(running);
    let reports = orchestrator.run().context("feature extraction failed")?;
    for r in &reports {
        info!(output = %r.output.display(), "{}", r.counters.summary_line());
    }
    println!("{}", serde_json::to_string_pretty(&reports)?);
    Ok(())
}

fn run_count(input: PathBuf, output_base: String, threshold: u64) -> anyhow::Result<()> {
    let f = File::open(&input).with_context(|| format!("opening {}", input.display()))?;
    let counts = frequency::count_frequencies(BufReader::new(f))?;
    info!(headlines = counts.headlines, malformed = counts.malformed, "finished analysis");

    let base = format!("{output_base}-{threshold}");
    let words_path = PathBuf::from(format!("{base}-words.txt"));
    let lemmas_path = PathBuf::from(format!("{base}-lemmata.txt"));
    let words_written = frequency::write_table(&counts.words, threshold, BufWriter::new(File::create(&words_path)?))?;
    let lemmas_written = frequency::write_table(&counts.lemmas, threshold, BufWriter::new(File::create(&lemmas_path)?))?;

    let out = serde_json::json!({
        "headlines": counts.headlines,
        "malformed": counts.malformed,
        "words": { "path": words_path, "entries": words_written },
        "lemmata": { "path": lemmas_path, "entries": lemmas_written },
        "by_outlet": counts.outlet_totals(),
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
