//! Per-record feature computation: length and punctuation statistics,
//! smoothed corpus frequencies, affix letters and top-lemma indicators.

use crate::dataset::FeatureVector;
use crate::frequency::{FrequencyTables, Smoothing};
use crate::lexicon::{self, PunctuationClass, AFFIX_ALPHABET};
use crate::parser::{self, Record};
use crate::schema::{Feature, FeatureSchema};
use crate::stats::{self, OrderStats};

/// Surface word whose lemma slot fell outside the lemma list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignmentFailure {
    pub surface_index: usize,
    pub lemma_index: usize,
    pub lemma_count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Vectorized {
    Complete(FeatureVector),
    /// Affix counts stop at the misaligned word; everything else is complete.
    Partial { vector: FeatureVector, failure: AlignmentFailure },
}

impl Vectorized {
    pub fn vector(&self) -> &FeatureVector {
        match self {
            Vectorized::Complete(v) => v,
            Vectorized::Partial { vector, .. } => vector,
        }
    }

    pub fn into_vector(self) -> FeatureVector {
        match self {
            Vectorized::Complete(v) => v,
            Vectorized::Partial { vector, .. } => vector,
        }
    }

    pub fn failure(&self) -> Option<&AlignmentFailure> {
        match self {
            Vectorized::Complete(_) => None,
            Vectorized::Partial { failure, .. } => Some(failure),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffixCounts {
    /// Indexed by 0-based alphabet position.
    pub per_letter: [u32; AFFIX_ALPHABET.len()],
    pub total: u32,
    pub failure: Option<AlignmentFailure>,
}

/// Counts alphabet letters of each surface word that are missing from its lemma.
///
/// Punctuation-only and blank surface tokens have no lemma; each one seen so far
/// shifts the pairing so surface word `j` meets lemma `j - shift`. When that index
/// runs past the lemma list the scan stops and the counts gathered so far are kept.
pub fn count_affix_letters(raw_words: &[&str], lem_words: &[&str], punct: PunctuationClass) -> AffixCounts {
    let mut out = AffixCounts { per_letter: [0; AFFIX_ALPHABET.len()], total: 0, failure: None };
    let mut shift = 0usize;
    for (j, raw) in raw_words.iter().enumerate() {
        if raw.trim().is_empty() || punct.is_punct_token(raw) {
            shift += 1;
            continue;
        }
        let lemma_index = j - shift;
        let Some(lem) = lem_words.get(lemma_index) else {
            out.failure = Some(AlignmentFailure { surface_index: j, lemma_index, lemma_count: lem_words.len() });
            break;
        };
        for c in raw.chars() {
            if lem.contains(c) {
                continue;
            }
            if let Some(pos) = lexicon::alphabet_position(c) {
                out.per_letter[pos - 1] += 1;
                out.total += 1;
            }
        }
    }
    out
}

/// Character length of a word, not counting its punctuation.
pub fn word_length(word: &str, punct: PunctuationClass) -> usize {
    word.chars().count() - punct.count_punct(word)
}

pub struct RecordVectorizer<'a> {
    schema: &'a FeatureSchema,
    tables: &'a FrequencyTables,
    top_lemmas: &'a [String],
    punct: PunctuationClass,
}

impl<'a> RecordVectorizer<'a> {
    pub fn new(
        schema: &'a FeatureSchema,
        tables: &'a FrequencyTables,
        top_lemmas: &'a [String],
        punct: PunctuationClass,
    ) -> Self {
        Self { schema, tables, top_lemmas, punct }
    }

    pub fn vectorize(&self, record: &Record) -> Vectorized {
        let mut v = FeatureVector::new(self.schema, record.outlet);
        if self.schema.contains(Feature::Identifier) {
            v.set_identifier(record.identifier());
        }

        let raw_words = parser::tokenize(&record.raw_title);
        let lem_words = parser::tokenize(&record.lemma_title);
        let num_chars = record.raw_title.chars().count() as f64;
        let num_words = raw_words.len() as f64;

        self.set(&mut v, Feature::NumChars, num_chars);
        self.set(&mut v, Feature::NumWords, num_words);
        self.set(&mut v, Feature::NumPunctuation, self.punct.count_punct(&record.raw_title) as f64);
        self.set(&mut v, Feature::EpochCount, record.epoch_count as f64);

        // lengths
        let lengths: Vec<f64> = raw_words.iter().map(|w| word_length(w, self.punct) as f64).collect();
        let len_stats = OrderStats::or_zero(&lengths);
        self.set(&mut v, Feature::AvgWordLength, stats::mean(&lengths));
        self.set(&mut v, Feature::MinWordLength, len_stats.min);
        self.set(&mut v, Feature::MedianWordLength, len_stats.median);
        self.set(&mut v, Feature::MaxWordLength, len_stats.max);

        // word frequencies
        let word_freqs: Vec<f64> = raw_words
            .iter()
            .map(|w| self.tables.words.log_frequency(w, Smoothing::WORDS))
            .collect();
        let wf = OrderStats::or_zero(&word_freqs);
        self.set(&mut v, Feature::AvgWordFreq, stats::mean(&word_freqs));
        self.set(&mut v, Feature::MinWordFreq, wf.min);
        self.set(&mut v, Feature::MedianWordFreq, wf.median);
        self.set(&mut v, Feature::MaxWordFreq, wf.max);

        // lemma frequencies and top-lemma indicators
        let lemma_freqs: Vec<f64> = lem_words
            .iter()
            .map(|l| self.tables.lemmas.log_frequency(l, Smoothing::LEMMAS))
            .collect();
        let lf = OrderStats::or_zero(&lemma_freqs);
        self.set(&mut v, Feature::AvgLemmaFreq, stats::mean(&lemma_freqs));
        self.set(&mut v, Feature::MinLemmaFreq, lf.min);
        self.set(&mut v, Feature::MedianLemmaFreq, lf.median);
        self.set(&mut v, Feature::MaxLemmaFreq, lf.max);
        for lem in &lem_words {
            for (idx, top) in self.top_lemmas.iter().enumerate() {
                if top == lem {
                    self.add(&mut v, Feature::TopLemma(idx), 1.0);
                }
            }
        }

        // affix letters
        let affixes = count_affix_letters(&raw_words, &lem_words, self.punct);
        for (i, n) in affixes.per_letter.iter().enumerate() {
            if *n > 0 {
                self.add(&mut v, Feature::AffixLetter(i + 1), *n as f64);
            }
        }
        let total = affixes.total as f64;
        self.set(&mut v, Feature::TotalAffixLetters, total);
        self.set(&mut v, Feature::AffixLettersPerWord, stats::ratio(total, num_words));
        self.set(&mut v, Feature::AffixLettersPerChar, stats::ratio(total, num_chars));

        match affixes.failure {
            None => Vectorized::Complete(v),
            Some(failure) => Vectorized::Partial { vector: v, failure },
        }
    }

    fn set(&self, v: &mut FeatureVector, feature: Feature, value: f64) {
        if let Some(pos) = self.schema.position(feature) {
            v.set_at(pos, value);
        }
    }

    fn add(&self, v: &mut FeatureVector, feature: Feature, delta: f64) {
        if let Some(pos) = self.schema.position(feature) {
            v.add_at(pos, delta);
        }
    }
}
