//! Multinomial Naive Bayes over TF-IDF features.
//!
//! For each class `c` and term `t` the fitted model holds
//!
//! ```text
//! log P(c)   = ln(count(c) / total)
//! log P(t|c) = ln((F[c][t] + alpha) / (sum_t F[c][t] + alpha * V))
//! ```
//!
//! where `F[c][t]` is the summed feature weight of term `t` over the
//! training documents of class `c`. Scores are turned into probabilities
//! with log-sum-exp, and equal scores resolve to ham.

use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::NaiveBayesConfig;
use crate::corpus::Label;
use crate::error::{Result, SpamLensError};
use crate::ml::classifier::{ClassProbabilities, Classifier, Prediction};
use crate::ml::sparse::SparseVector;

/// Fitted parameters of a multinomial Naive Bayes model.
///
/// Arrays are indexed by [`Label::as_index`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NaiveBayesState {
    /// Smoothing parameter used during fit.
    pub alpha: f64,

    /// Number of training documents per class.
    pub class_count: [usize; 2],

    /// Log prior per class.
    pub class_log_prior: [f64; 2],

    /// Smoothed log-likelihood per class and term.
    pub feature_log_prob: [Vec<f64>; 2],
}

impl NaiveBayesState {
    /// Number of features (vocabulary size).
    pub fn n_features(&self) -> usize {
        self.feature_log_prob[0].len()
    }

    /// Check the internal consistency of a state, e.g. after loading it.
    pub fn validate(&self) -> Result<()> {
        if self.feature_log_prob[0].len() != self.feature_log_prob[1].len() {
            return Err(SpamLensError::model(format!(
                "Class likelihood tables differ in length: {} vs {}",
                self.feature_log_prob[0].len(),
                self.feature_log_prob[1].len()
            )));
        }
        if self.class_log_prior.iter().any(|p| !p.is_finite()) {
            return Err(SpamLensError::model("Class log priors must be finite"));
        }
        if self
            .feature_log_prob
            .iter()
            .flatten()
            .any(|lp| !lp.is_finite())
        {
            return Err(SpamLensError::model(
                "Class log-likelihoods must be finite",
            ));
        }
        Ok(())
    }
}

/// Multinomial Naive Bayes classifier.
#[derive(Debug, Clone)]
pub struct MultinomialNaiveBayes {
    state: NaiveBayesState,
}

impl MultinomialNaiveBayes {
    /// Fit the classifier on feature vectors and their labels.
    pub fn fit(
        vectors: &[SparseVector],
        labels: &[Label],
        config: &NaiveBayesConfig,
    ) -> Result<Self> {
        config.validate()?;
        if vectors.is_empty() {
            return Err(SpamLensError::configuration(
                "Cannot fit a classifier without training vectors",
            ));
        }
        if vectors.len() != labels.len() {
            return Err(SpamLensError::configuration(format!(
                "Got {} vectors but {} labels",
                vectors.len(),
                labels.len()
            )));
        }

        let n_features = vectors[0].dim();
        if n_features == 0 {
            return Err(SpamLensError::configuration(
                "Feature vectors have zero dimension",
            ));
        }
        if let Some(v) = vectors.iter().find(|v| v.dim() != n_features) {
            return Err(SpamLensError::configuration(format!(
                "Feature vectors differ in dimension: {} vs {}",
                n_features,
                v.dim()
            )));
        }

        let mut class_count = [0usize; 2];
        let mut feature_count = [vec![0.0f64; n_features], vec![0.0f64; n_features]];
        for (vector, label) in vectors.iter().zip(labels) {
            let c = label.as_index();
            class_count[c] += 1;
            for (index, weight) in vector.iter() {
                if let Some(slot) = feature_count[c].get_mut(index) {
                    *slot += weight;
                }
            }
        }

        if class_count.contains(&0) {
            return Err(SpamLensError::configuration(format!(
                "Training labels must contain both classes (ham: {}, spam: {})",
                class_count[0], class_count[1]
            )));
        }

        let total = vectors.len() as f64;
        let alpha = config.alpha;
        let class_log_prior = class_count.map(|count| (count as f64 / total).ln());
        let feature_log_prob = feature_count.map(|counts| {
            let denominator = counts.iter().sum::<f64>() + alpha * n_features as f64;
            counts
                .iter()
                .map(|&count| ((count + alpha) / denominator).ln())
                .collect::<Vec<f64>>()
        });

        debug!(
            "Fitted naive bayes: {} ham, {} spam, {} features, alpha {}",
            class_count[0], class_count[1], n_features, alpha
        );

        Ok(MultinomialNaiveBayes {
            state: NaiveBayesState {
                alpha,
                class_count,
                class_log_prior,
                feature_log_prob,
            },
        })
    }

    /// Rebuild a classifier from a fitted state.
    pub fn from_state(state: NaiveBayesState) -> Result<Self> {
        state.validate()?;
        Ok(MultinomialNaiveBayes { state })
    }

    /// Unnormalized log score per class.
    pub fn joint_log_likelihood(&self, vector: &SparseVector) -> [f64; 2] {
        joint_log_likelihood(&self.state, vector)
    }

    /// Predict many vectors in parallel, preserving order.
    pub fn predict_batch(&self, vectors: &[SparseVector]) -> Vec<Prediction> {
        vectors.par_iter().map(|v| self.predict(v)).collect()
    }

    /// Get the fitted state.
    pub fn state(&self) -> &NaiveBayesState {
        &self.state
    }

    /// Consume the classifier, returning its fitted state.
    pub fn into_state(self) -> NaiveBayesState {
        self.state
    }

    /// Number of features (vocabulary size).
    pub fn n_features(&self) -> usize {
        self.state.n_features()
    }
}

impl Classifier for MultinomialNaiveBayes {
    fn predict(&self, vector: &SparseVector) -> Prediction {
        predict_with_state(&self.state, vector)
    }

    fn name(&self) -> &str {
        "multinomial_naive_bayes"
    }
}

fn joint_log_likelihood(state: &NaiveBayesState, vector: &SparseVector) -> [f64; 2] {
    [0, 1].map(|c| {
        // Indices outside the vocabulary contribute nothing.
        let evidence: f64 = vector.dot_dense(&state.feature_log_prob[c]);
        state.class_log_prior[c] + evidence
    })
}

/// Score a vector against a fitted state.
pub(crate) fn predict_with_state(state: &NaiveBayesState, vector: &SparseVector) -> Prediction {
    let [mut ham_score, mut spam_score] = joint_log_likelihood(state, vector);

    // Evidence that overflowed to -inf (or NaN) cannot rank the classes.
    if ham_score.is_nan() || spam_score.is_nan() || !ham_score.max(spam_score).is_finite() {
        [ham_score, spam_score] = state.class_log_prior;
    }

    // log-sum-exp with the max subtracted
    let max = ham_score.max(spam_score);
    let ham = (ham_score - max).exp();
    let spam = (spam_score - max).exp();
    let sum = ham + spam;

    let label = if spam_score > ham_score {
        Label::Spam
    } else {
        Label::Ham
    };

    Prediction {
        label,
        probabilities: ClassProbabilities {
            ham: ham / sum,
            spam: spam / sum,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> NaiveBayesConfig {
        NaiveBayesConfig::default()
    }

    fn two_vocabularies() -> (Vec<SparseVector>, Vec<Label>) {
        let vectors = vec![
            SparseVector::from_dense(&[0.8, 0.6, 0.0, 0.0, 0.0, 0.0]),
            SparseVector::from_dense(&[0.0, 0.6, 0.8, 0.0, 0.0, 0.0]),
            SparseVector::from_dense(&[1.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
            SparseVector::from_dense(&[0.0, 0.0, 0.0, 0.6, 0.8, 0.0]),
            SparseVector::from_dense(&[0.0, 0.0, 0.0, 0.0, 0.6, 0.8]),
        ];
        let labels = vec![Label::Ham, Label::Ham, Label::Ham, Label::Spam, Label::Spam];
        (vectors, labels)
    }

    #[test]
    fn test_fit_priors_and_likelihoods() {
        let (vectors, labels) = two_vocabularies();
        let model = MultinomialNaiveBayes::fit(&vectors, &labels, &config()).unwrap();
        let state = model.state();

        assert_eq!(state.class_count, [3, 2]);
        assert!((state.class_log_prior[0] - (0.6f64).ln()).abs() < 1e-12);
        assert!((state.class_log_prior[1] - (0.4f64).ln()).abs() < 1e-12);

        for c in 0..2 {
            let total: f64 = state.feature_log_prob[c].iter().map(|lp| lp.exp()).sum();
            assert!((total - 1.0).abs() < 1e-9);
        }
        // ham term 0 total weight 1.8; ham total weight 3.8; V = 6
        let expected = ((1.8 + 1.0) / (3.8 + 6.0f64)).ln();
        assert!((state.feature_log_prob[0][0] - expected).abs() < 1e-12);
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let (vectors, labels) = two_vocabularies();
        let model = MultinomialNaiveBayes::fit(&vectors, &labels, &config()).unwrap();
        let mut inputs = vectors.clone();
        inputs.push(SparseVector::zeros(6));
        inputs.push(SparseVector::from_dense(&[50.0, 0.0, 0.0, 0.0, 0.0, 80.0]));
        for v in &inputs {
            let p = model.predict(v).probabilities;
            assert!((p.ham + p.spam - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_zero_vector_returns_priors() {
        let (vectors, labels) = two_vocabularies();
        let model = MultinomialNaiveBayes::fit(&vectors, &labels, &config()).unwrap();
        let prediction = model.predict(&SparseVector::zeros(6));
        assert_eq!(prediction.label, Label::Ham);
        assert!((prediction.probabilities.ham - 0.6).abs() < 1e-12);
        assert!((prediction.probabilities.spam - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_tie_predicts_ham() {
        let vectors = vec![
            SparseVector::from_dense(&[1.0, 0.0]),
            SparseVector::from_dense(&[0.0, 1.0]),
        ];
        let labels = vec![Label::Ham, Label::Spam];
        let model = MultinomialNaiveBayes::fit(&vectors, &labels, &config()).unwrap();

        let prediction = model.predict(&SparseVector::from_dense(&[1.0, 1.0]));
        assert_eq!(prediction.label, Label::Ham);
        assert_eq!(prediction.probabilities.ham, 0.5);

        let prediction = model.predict(&SparseVector::zeros(2));
        assert_eq!(prediction.label, Label::Ham);
    }

    #[test]
    fn test_class_centroids_round_trip() {
        let (vectors, labels) = two_vocabularies();
        let model = MultinomialNaiveBayes::fit(&vectors, &labels, &config()).unwrap();

        for label in [Label::Ham, Label::Spam] {
            let members: Vec<&SparseVector> = vectors
                .iter()
                .zip(&labels)
                .filter(|(_, l)| **l == label)
                .map(|(v, _)| v)
                .collect();
            let mut centroid = vec![0.0; 6];
            for v in &members {
                for (i, w) in v.iter() {
                    centroid[i] += w / members.len() as f64;
                }
            }
            let prediction = model.predict(&SparseVector::from_dense(&centroid));
            assert_eq!(prediction.label, label);
        }
    }

    #[test]
    fn test_out_of_range_indices_are_ignored() {
        let (vectors, labels) = two_vocabularies();
        let model = MultinomialNaiveBayes::fit(&vectors, &labels, &config()).unwrap();
        let with_extra = SparseVector::from_entries(6, vec![(0, 1.0), (42, 3.0)]);
        let without = SparseVector::from_entries(6, vec![(0, 1.0)]);
        assert_eq!(model.predict(&with_extra), model.predict(&without));
    }

    #[test]
    fn test_fit_errors() {
        let (vectors, labels) = two_vocabularies();
        let err = |r: Result<MultinomialNaiveBayes>| r.unwrap_err().is_configuration();

        assert!(err(MultinomialNaiveBayes::fit(&[], &[], &config())));
        assert!(err(MultinomialNaiveBayes::fit(&vectors, &labels[..4], &config())));
        assert!(err(MultinomialNaiveBayes::fit(
            &vectors,
            &labels,
            &NaiveBayesConfig { alpha: 0.0 }
        )));
        assert!(err(MultinomialNaiveBayes::fit(
            &vectors[..3],
            &labels[..3],
            &config()
        )));
        assert!(err(MultinomialNaiveBayes::fit(
            &[SparseVector::zeros(0), SparseVector::zeros(0)],
            &[Label::Ham, Label::Spam],
            &config()
        )));
        assert!(err(MultinomialNaiveBayes::fit(
            &[SparseVector::zeros(2), SparseVector::zeros(3)],
            &[Label::Ham, Label::Spam],
            &config()
        )));
    }

    #[test]
    fn test_overflowing_evidence_falls_back_to_priors() {
        let (vectors, labels) = two_vocabularies();
        let model = MultinomialNaiveBayes::fit(&vectors, &labels, &config()).unwrap();

        let huge = SparseVector::from_dense(&[0.0, 0.0, 0.0, 0.0, 0.0, f64::MAX]);
        let [ham_score, spam_score] = model.joint_log_likelihood(&huge);
        assert_eq!(ham_score, f64::NEG_INFINITY);
        assert_eq!(spam_score, f64::NEG_INFINITY);

        let prediction = model.predict(&huge);
        assert_eq!(prediction.label, Label::Ham);
        assert!((prediction.probabilities.ham - 0.6).abs() < 1e-12);
        assert!((prediction.probabilities.spam - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_non_finite_likelihoods_are_rejected() {
        let (vectors, labels) = two_vocabularies();
        let state = MultinomialNaiveBayes::fit(&vectors, &labels, &config())
            .unwrap()
            .into_state();

        let mut broken = state.clone();
        broken.feature_log_prob[0][2] = f64::NEG_INFINITY;
        assert!(broken.validate().is_err());
        assert!(MultinomialNaiveBayes::from_state(broken).is_err());

        let mut broken = state;
        broken.feature_log_prob[1].iter_mut().for_each(|lp| *lp = f64::NAN);
        assert!(MultinomialNaiveBayes::from_state(broken).is_err());
    }

    #[test]
    fn test_state_round_trip() {
        let (vectors, labels) = two_vocabularies();
        let model = MultinomialNaiveBayes::fit(&vectors, &labels, &config()).unwrap();
        let expected = model.predict_batch(&vectors);
        let rebuilt = MultinomialNaiveBayes::from_state(model.into_state()).unwrap();
        assert_eq!(rebuilt.predict_batch(&vectors), expected);
        assert_eq!(rebuilt.name(), "multinomial_naive_bayes");
    }
}
