pub mod outlet;
pub mod lexicon;
pub mod parser;
pub mod frequency;
pub mod filter;
pub mod schema;
pub mod stats;
pub mod vectorizer;
pub mod dataset;
pub mod arff;
pub mod config;
pub mod orchestrator;
