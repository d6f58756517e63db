//! Analyzer implementations that combine tokenizers and filters.

mod analyzer;
mod ngram;
mod pipeline;

pub use analyzer::Analyzer;
pub use ngram::NgramAnalyzer;
pub use pipeline::PipelineAnalyzer;
