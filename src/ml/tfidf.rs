//! TF-IDF vectorizer for message feature extraction.
//!
//! Fitting learns a capped vocabulary of word n-grams and an inverse
//! document frequency per term:
//!
//! ```text
//! idf(t) = ln((1 + N) / (1 + df(t))) + 1
//! ```
//!
//! Terms are ranked by total corpus frequency (ties keep first-seen order),
//! the top `max_features` are kept, and the survivors are indexed in
//! lexicographic order. Transforming a document multiplies raw term counts
//! by idf and scales the result to unit Euclidean length.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use log::{debug, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::{Analyzer, NgramAnalyzer};
use crate::config::VectorizerConfig;
use crate::error::{Result, SpamLensError};
use crate::ml::sparse::SparseVector;

/// The fitted, serializable part of a vectorizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorizerState {
    /// Term to dense index.
    pub vocabulary: BTreeMap<String, usize>,

    /// Inverse document frequency per index.
    pub idf: Vec<f64>,

    /// Number of training documents.
    pub n_documents: usize,

    /// Settings used during fit; the analyzer is rebuilt from these.
    pub config: VectorizerConfig,
}

impl VectorizerState {
    /// Number of terms in the vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Check the internal consistency of a state, e.g. after loading it.
    pub fn validate(&self) -> Result<()> {
        self.config.ngram_range.validate()?;
        if self.idf.len() != self.vocabulary.len() {
            return Err(SpamLensError::model(format!(
                "Vocabulary has {} terms but {} idf weights",
                self.vocabulary.len(),
                self.idf.len()
            )));
        }
        if self.idf.iter().any(|w| !w.is_finite() || *w <= 0.0) {
            return Err(SpamLensError::model(
                "Idf weights must be finite and positive",
            ));
        }
        let mut seen = vec![false; self.idf.len()];
        for (term, &index) in &self.vocabulary {
            if index >= seen.len() || seen[index] {
                return Err(SpamLensError::model(format!(
                    "Term '{term}' has invalid index {index}"
                )));
            }
            seen[index] = true;
        }
        Ok(())
    }

    fn analyzer(&self) -> Result<NgramAnalyzer> {
        let range = self.config.ngram_range;
        NgramAnalyzer::new(range.min, range.max, self.config.stop_words.filter())
    }
}

/// Per-term statistics gathered during fit.
struct TermStats {
    first_seen: usize,
    document_frequency: usize,
    term_frequency: usize,
}

/// TF-IDF vectorizer for message feature extraction.
///
/// A fitted vectorizer is read-only and can be shared between threads.
pub struct TfIdfVectorizer {
    state: VectorizerState,
    /// Analyzer for tokenization.
    analyzer: Arc<dyn Analyzer>,
}

impl std::fmt::Debug for TfIdfVectorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TfIdfVectorizer")
            .field("vocabulary_size", &self.state.vocabulary.len())
            .field("n_documents", &self.state.n_documents)
            .field("analyzer", &self.analyzer.name())
            .finish()
    }
}

impl TfIdfVectorizer {
    /// Fit the vectorizer on cleaned training documents.
    pub fn fit<S: AsRef<str>>(documents: &[S], config: &VectorizerConfig) -> Result<Self> {
        config.validate()?;
        if documents.is_empty() {
            return Err(SpamLensError::configuration(
                "Cannot fit a vectorizer on an empty corpus",
            ));
        }

        let range = config.ngram_range;
        let analyzer: Arc<dyn Analyzer> = Arc::new(NgramAnalyzer::new(
            range.min,
            range.max,
            config.stop_words.filter(),
        )?);

        let mut stats: HashMap<String, TermStats> = HashMap::new();
        for doc in documents {
            let mut doc_counts: Vec<(String, usize)> = Vec::new();
            let mut doc_index: HashMap<String, usize> = HashMap::new();
            for token in analyzer.analyze(doc.as_ref())? {
                match doc_index.get(&token.text) {
                    Some(&pos) => doc_counts[pos].1 += 1,
                    None => {
                        doc_index.insert(token.text.clone(), doc_counts.len());
                        doc_counts.push((token.text, 1));
                    }
                }
            }

            for (term, count) in doc_counts {
                let next_id = stats.len();
                let entry = stats.entry(term).or_insert(TermStats {
                    first_seen: next_id,
                    document_frequency: 0,
                    term_frequency: 0,
                });
                entry.document_frequency += 1;
                entry.term_frequency += count;
            }
        }

        let total_terms = stats.len();
        let mut candidates: Vec<(String, TermStats)> = stats
            .into_iter()
            .filter(|(_, s)| s.document_frequency >= config.min_df)
            .collect();
        candidates.sort_by(|(_, a), (_, b)| {
            b.term_frequency
                .cmp(&a.term_frequency)
                .then(a.first_seen.cmp(&b.first_seen))
        });
        candidates.truncate(config.max_features);

        if candidates.is_empty() {
            return Err(SpamLensError::configuration(
                "No terms left after fitting; the vocabulary would be empty",
            ));
        }

        candidates.sort_by(|(a, _), (b, _)| a.cmp(b));

        let n_documents = documents.len();
        let mut vocabulary = BTreeMap::new();
        let mut idf = Vec::with_capacity(candidates.len());
        for (index, (term, term_stats)) in candidates.into_iter().enumerate() {
            // IDF = ln((N + 1) / (df + 1)) + 1
            idf.push(
                ((n_documents as f64 + 1.0) / (term_stats.document_frequency as f64 + 1.0)).ln()
                    + 1.0,
            );
            vocabulary.insert(term, index);
        }

        debug!(
            "Fitted vectorizer: {} documents, {} distinct terms, {} kept",
            n_documents,
            total_terms,
            vocabulary.len()
        );

        Ok(TfIdfVectorizer {
            state: VectorizerState {
                vocabulary,
                idf,
                n_documents,
                config: config.clone(),
            },
            analyzer,
        })
    }

    /// Rebuild a vectorizer from a fitted state.
    pub fn from_state(state: VectorizerState) -> Result<Self> {
        state.validate()?;
        let analyzer = Arc::new(state.analyzer()?);
        Ok(TfIdfVectorizer { state, analyzer })
    }

    /// Transform a cleaned document into an L2-normalized TF-IDF vector.
    ///
    /// Unknown terms are ignored; a document without known terms maps to
    /// the all-zero vector.
    pub fn transform(&self, document: &str) -> SparseVector {
        vectorize(self.analyzer.as_ref(), &self.state, document)
    }

    /// Transform many documents in parallel, preserving order.
    pub fn transform_batch<S: AsRef<str> + Sync>(&self, documents: &[S]) -> Vec<SparseVector> {
        documents
            .par_iter()
            .map(|doc| self.transform(doc.as_ref()))
            .collect()
    }

    /// Get the fitted state.
    pub fn state(&self) -> &VectorizerState {
        &self.state
    }

    /// Consume the vectorizer, returning its fitted state.
    pub fn into_state(self) -> VectorizerState {
        self.state
    }

    /// Get the index of a term.
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.state.vocabulary.get(term).copied()
    }

    /// Get the terms ordered by index.
    pub fn feature_names(&self) -> Vec<&str> {
        let mut names = vec![""; self.state.vocabulary.len()];
        for (term, &index) in &self.state.vocabulary {
            names[index] = term;
        }
        names
    }

    /// Get the idf weights ordered by index.
    pub fn idf(&self) -> &[f64] {
        &self.state.idf
    }

    /// Get the size of the vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.state.vocabulary.len()
    }

    /// Get the number of training documents.
    pub fn n_documents(&self) -> usize {
        self.state.n_documents
    }
}

/// Transform with an already fitted state, rebuilding its analyzer.
pub(crate) fn transform_with_state(state: &VectorizerState, document: &str) -> SparseVector {
    match state.analyzer() {
        Ok(analyzer) => vectorize(&analyzer, state, document),
        Err(e) => {
            warn!("Cannot build analyzer for vectorizer state: {e}");
            SparseVector::zeros(state.vocabulary.len())
        }
    }
}

fn vectorize(analyzer: &dyn Analyzer, state: &VectorizerState, document: &str) -> SparseVector {
    let dim = state.vocabulary.len();
    let tokens = match analyzer.analyze(document) {
        Ok(tokens) => tokens,
        Err(e) => {
            warn!("Failed to analyze document: {e}");
            return SparseVector::zeros(dim);
        }
    };

    // BTreeMap keeps entries, and the norm sum, in ascending index order.
    let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
    for token in tokens {
        if let Some(&index) = state.vocabulary.get(&token.text) {
            *counts.entry(index).or_insert(0.0) += 1.0;
        }
    }

    let weighted: Vec<(usize, f64)> = counts
        .into_iter()
        .filter_map(|(index, count)| state.idf.get(index).map(|idf| (index, count * idf)))
        .collect();

    let norm = weighted.iter().map(|&(_, w)| w * w).sum::<f64>().sqrt();
    if norm == 0.0 {
        return SparseVector::zeros(dim);
    }

    SparseVector::from_entries(
        dim,
        weighted.into_iter().map(|(i, w)| (i, w / norm)).collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{NgramRange, StopWords};

    fn corpus() -> Vec<&'static str> {
        vec![
            "win money now",
            "call you later",
            "free money win",
            "are you free later",
        ]
    }

    #[test]
    fn test_fit_vocabulary() {
        let vectorizer = TfIdfVectorizer::fit(&corpus(), &VectorizerConfig::default()).unwrap();
        assert_eq!(
            vectorizer.feature_names(),
            vec!["free", "free later", "free money", "later", "money", "money win", "win", "win money"]
        );
        assert_eq!(vectorizer.n_documents(), 4);
        assert_eq!(vectorizer.term_index("you"), None);

        // "money" occurs in two of four documents.
        let idf = vectorizer.idf()[vectorizer.term_index("money").unwrap()];
        assert!((idf - ((5.0f64 / 3.0).ln() + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_top_terms_by_frequency_then_first_seen() {
        let config = VectorizerConfig::new(2, NgramRange::new(1, 1)).with_stop_words(StopWords::None);
        let vectorizer = TfIdfVectorizer::fit(&["bb aa", "aa cc", "dd"], &config).unwrap();
        assert_eq!(vectorizer.feature_names(), vec!["aa", "bb"]);
    }

    #[test]
    fn test_min_df() {
        let config = VectorizerConfig::new(100, NgramRange::new(1, 1)).with_min_df(2);
        let vectorizer = TfIdfVectorizer::fit(&corpus(), &config).unwrap();
        assert_eq!(vectorizer.feature_names(), vec!["free", "later", "money", "win"]);
    }

    #[test]
    fn test_transform_norm_is_zero_or_one() {
        let vectorizer = TfIdfVectorizer::fit(&corpus(), &VectorizerConfig::default()).unwrap();
        for text in ["win free money", "later later later", "nothing known here", ""] {
            let norm = vectorizer.transform(text).norm();
            assert!(norm == 0.0 || (norm - 1.0).abs() < 1e-9, "norm {norm} for {text:?}");
        }
    }

    #[test]
    fn test_unseen_terms_give_zero_vector() {
        let vectorizer = TfIdfVectorizer::fit(&corpus(), &VectorizerConfig::default()).unwrap();
        let v = vectorizer.transform("zebra quokka");
        assert!(v.is_zero());
        assert_eq!(v.dim(), vectorizer.vocabulary_size());
    }

    #[test]
    fn test_transform_is_deterministic() {
        let vectorizer = TfIdfVectorizer::fit(&corpus(), &VectorizerConfig::default()).unwrap();
        let texts = corpus();
        let batch = vectorizer.transform_batch(&texts);
        for (text, v) in texts.iter().zip(&batch) {
            assert_eq!(&vectorizer.transform(text), v);
        }
        let v = vectorizer.transform("win free money");
        let indices: Vec<usize> = v.iter().map(|(i, _)| i).collect();
        let mut sorted = indices.clone();
        sorted.sort();
        assert_eq!(indices, sorted);
    }

    #[test]
    fn test_state_round_trip() {
        let vectorizer = TfIdfVectorizer::fit(&corpus(), &VectorizerConfig::default()).unwrap();
        let expected = vectorizer.transform("free money");
        let state = vectorizer.into_state();
        assert_eq!(transform_with_state(&state, "free money"), expected);
        let rebuilt = TfIdfVectorizer::from_state(state).unwrap();
        assert_eq!(rebuilt.transform("free money"), expected);
    }

    #[test]
    fn test_invalid_state_is_rejected() {
        let vectorizer = TfIdfVectorizer::fit(&corpus(), &VectorizerConfig::default()).unwrap();
        let mut state = vectorizer.into_state();
        state.idf.pop();
        assert!(matches!(
            TfIdfVectorizer::from_state(state),
            Err(SpamLensError::Model(_))
        ));
    }

    #[test]
    fn test_degenerate_idf_weights_are_rejected() {
        let state = TfIdfVectorizer::fit(&corpus(), &VectorizerConfig::default())
            .unwrap()
            .into_state();
        for weight in [f64::NAN, f64::INFINITY, 0.0, -1.0] {
            let mut broken = state.clone();
            broken.idf[0] = weight;
            assert!(matches!(broken.validate(), Err(SpamLensError::Model(_))));
            assert!(TfIdfVectorizer::from_state(broken).is_err());
        }
    }

    #[test]
    fn test_fit_errors() {
        let empty: Vec<String> = Vec::new();
        let config = VectorizerConfig::default();
        assert!(TfIdfVectorizer::fit(&empty, &config).unwrap_err().is_configuration());
        assert!(
            TfIdfVectorizer::fit(&corpus(), &config.clone().with_max_features(0))
                .unwrap_err()
                .is_configuration()
        );
        let bad_range = VectorizerConfig::new(10, NgramRange::new(2, 1));
        assert!(TfIdfVectorizer::fit(&corpus(), &bad_range).unwrap_err().is_configuration());
        assert!(
            TfIdfVectorizer::fit(&["the you", "and"], &config)
                .unwrap_err()
                .is_configuration()
        );
    }
}
