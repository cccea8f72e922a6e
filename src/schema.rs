use crate::lexicon::{AFFIX_ALPHABET, OPTIMIZED_AFFIX_POSITIONS, TOP_LEMMA_COUNT};
use crate::outlet::Outlet;
use std::collections::HashMap;

/// Every attribute a headline vector can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Identifier,
    NumChars,
    NumWords,
    AvgWordLength,
    MinWordLength,
    MedianWordLength,
    MaxWordLength,
    NumPunctuation,
    AvgLemmaFreq,
    AvgWordFreq,
    MaxLemmaFreq,
    MaxWordFreq,
    MinLemmaFreq,
    MinWordFreq,
    MedianLemmaFreq,
    MedianWordFreq,
    EpochCount,
    /// 1-based alphabet position.
    AffixLetter(usize),
    /// 0-based index into the top-lemma list.
    TopLemma(usize),
    TotalAffixLetters,
    AffixLettersPerWord,
    AffixLettersPerChar,
    Class,
}

impl Feature {
    pub fn name(self) -> String {
        match self {
            Feature::Identifier => "ID".into(),
            Feature::NumChars => "num-of-chars".into(),
            Feature::NumWords => "num-of-words".into(),
            Feature::AvgWordLength => "avg-word-length".into(),
            Feature::MinWordLength => "min-word-length".into(),
            Feature::MedianWordLength => "med-word-length".into(),
            Feature::MaxWordLength => "max-word-length".into(),
            Feature::NumPunctuation => "num-of-puncts".into(),
            Feature::AvgLemmaFreq => "avg-isbl-lemma-freq".into(),
            Feature::AvgWordFreq => "avg-wlst-word-freq".into(),
            Feature::MaxLemmaFreq => "max-isbl-lemma-freq".into(),
            Feature::MaxWordFreq => "max-wlst-word-freq".into(),
            Feature::MinLemmaFreq => "min-isbl-lemma-freq".into(),
            Feature::MinWordFreq => "min-wlst-word-freq".into(),
            Feature::MedianLemmaFreq => "med-isbl-lemma-freq".into(),
            Feature::MedianWordFreq => "med-wlst-word-freq".into(),
            Feature::EpochCount => "epochs".into(),
            Feature::AffixLetter(pos) => format!("affix-{pos}"),
            Feature::TopLemma(idx) => format!("freq-jan-lemma-{idx}"),
            Feature::TotalAffixLetters => "total-affix-letters".into(),
            Feature::AffixLettersPerWord => "affix-letters-per-word".into(),
            Feature::AffixLettersPerChar => "affix-letters-per-char".into(),
            Feature::Class => "class".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeKind {
    Numeric,
    Categorical(Vec<String>),
    Identifier,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub feature: Feature,
    pub name: String,
    pub kind: AttributeKind,
}

#[derive(Debug, Clone)]
pub struct SchemaOptions {
    pub optimize_features: bool,
    pub include_identifier: bool,
    pub outlets: Vec<Outlet>,
}

/// Ordered attribute layout shared by every vector of a dataset.
#[derive(Debug, Clone)]
pub struct FeatureSchema {
    attributes: Vec<Attribute>,
    positions: HashMap<Feature, usize>,
    outlets: Vec<Outlet>,
    optimized: bool,
}

impl FeatureSchema {
    pub fn build(opts: &SchemaOptions) -> Self {
        let full = !opts.optimize_features;
        let mut features: Vec<Feature> = Vec::with_capacity(110);
        if opts.include_identifier {
            features.push(Feature::Identifier);
        }
        features.extend([
            Feature::NumChars,
            Feature::NumWords,
            Feature::AvgWordLength,
            Feature::MinWordLength,
            Feature::MedianWordLength,
            Feature::MaxWordLength,
            Feature::NumPunctuation,
            Feature::AvgLemmaFreq,
            Feature::AvgWordFreq,
            Feature::MaxLemmaFreq,
            Feature::MaxWordFreq,
        ]);
        if full {
            features.extend([Feature::MinLemmaFreq, Feature::MinWordFreq]);
        }
        features.extend([Feature::MedianLemmaFreq, Feature::MedianWordFreq]);
        if full {
            features.push(Feature::EpochCount);
        }
        for pos in 1..=AFFIX_ALPHABET.len() {
            if full || OPTIMIZED_AFFIX_POSITIONS.contains(&pos) {
                features.push(Feature::AffixLetter(pos));
            }
        }
        if full {
            features.extend((0..TOP_LEMMA_COUNT).map(Feature::TopLemma));
            features.extend([
                Feature::TotalAffixLetters,
                Feature::AffixLettersPerWord,
                Feature::AffixLettersPerChar,
            ]);
        }
        features.push(Feature::Class);

        let levels: Vec<String> = opts.outlets.iter().map(|o| o.name().to_string()).collect();
        let attributes: Vec<Attribute> = features
            .into_iter()
            .map(|feature| {
                let kind = match feature {
                    Feature::Identifier => AttributeKind::Identifier,
                    Feature::Class => AttributeKind::Categorical(levels.clone()),
                    _ => AttributeKind::Numeric,
                };
                Attribute { feature, name: feature.name(), kind }
            })
            .collect();
        let positions = attributes.iter().enumerate().map(|(i, a)| (a.feature, i)).collect();

        Self { attributes, positions, outlets: opts.outlets.clone(), optimized: opts.optimize_features }
    }

    /// Same layout with class levels restricted to `outlets`.
    pub fn with_outlets(&self, outlets: &[Outlet]) -> Self {
        let levels: Vec<String> = outlets.iter().map(|o| o.name().to_string()).collect();
        let mut attributes = self.attributes.clone();
        if let Some(class) = attributes.last_mut() {
            class.kind = AttributeKind::Categorical(levels);
        }
        Self {
            attributes,
            positions: self.positions.clone(),
            outlets: outlets.to_vec(),
            optimized: self.optimized,
        }
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn position(&self, feature: Feature) -> Option<usize> {
        self.positions.get(&feature).copied()
    }

    pub fn contains(&self, feature: Feature) -> bool {
        self.positions.contains_key(&feature)
    }

    pub fn outlets(&self) -> &[Outlet] {
        &self.outlets
    }

    pub fn is_optimized(&self) -> bool {
        self.optimized
    }

    /// Index of `outlet` among the class levels.
    pub fn class_index(&self, outlet: Outlet) -> Option<usize> {
        self.outlets.iter().position(|o| *o == outlet)
    }

    /// Features present here but absent from `other`, in this schema's order.
    pub fn missing_from(&self, other: &FeatureSchema) -> Vec<Feature> {
        self.attributes
            .iter()
            .map(|a| a.feature)
            .filter(|f| !other.contains(*f))
            .collect()
    }
}
