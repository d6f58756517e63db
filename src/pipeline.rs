//! End-to-end training and evaluation.
//!
//! ```text
//! messages → prepare → stratified split → fit vectorizer (train only)
//!          → transform train/test → fit classifier → evaluate on test
//! ```

use log::info;
use serde::{Deserialize, Serialize};

use crate::config::TrainingConfig;
use crate::corpus::{self, ClassCounts, Label, Message};
use crate::detector::SpamDetector;
use crate::error::{Result, SpamLensError};
use crate::ml::{Classifier, Evaluation, MultinomialNaiveBayes, SpamModel, TfIdfVectorizer, evaluate};

/// Summary of a training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    /// Class counts of the cleaned corpus.
    pub corpus: ClassCounts,

    /// Messages dropped because they normalized to nothing.
    pub dropped: usize,

    /// Size of the training partition.
    pub train_size: usize,

    /// Size of the test partition.
    pub test_size: usize,

    /// Vocabulary size of the fitted vectorizer.
    pub n_features: usize,

    /// Scores on the test partition.
    pub evaluation: Evaluation,
}

/// Summary of scoring a model on a labeled corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Class counts of the cleaned corpus.
    pub corpus: ClassCounts,

    /// Messages dropped because they normalized to nothing.
    pub dropped: usize,

    /// Scores over every cleaned message.
    pub evaluation: Evaluation,
}

/// Train a model on raw labeled messages.
pub fn train(messages: &[Message], config: &TrainingConfig) -> Result<(SpamModel, TrainingReport)> {
    config.validate()?;

    let prepared = corpus::prepare(messages);
    if prepared.is_empty() {
        return Err(SpamLensError::configuration(
            "No usable messages left after cleaning",
        ));
    }

    let split = corpus::train_test_split(
        &prepared.messages,
        config.split.test_size,
        config.split.seed,
    )?;
    info!(
        "Split corpus: {} train, {} test",
        split.train.len(),
        split.test.len()
    );

    let train_texts: Vec<&str> = split.train.iter().map(|m| m.text.as_str()).collect();
    let train_labels: Vec<Label> = split.train.iter().map(|m| m.label).collect();
    let test_texts: Vec<&str> = split.test.iter().map(|m| m.text.as_str()).collect();
    let test_labels: Vec<Label> = split.test.iter().map(|m| m.label).collect();

    let vectorizer = TfIdfVectorizer::fit(&train_texts, &config.vectorizer)?;
    let train_vectors = vectorizer.transform_batch(&train_texts);
    let test_vectors = vectorizer.transform_batch(&test_texts);
    info!("Vectorized texts into {} features", vectorizer.vocabulary_size());

    let classifier = MultinomialNaiveBayes::fit(&train_vectors, &train_labels, &config.classifier)?;

    let predicted: Vec<Label> = classifier
        .predict_batch(&test_vectors)
        .into_iter()
        .map(|p| p.label)
        .collect();
    let evaluation = evaluate(&predicted, &test_labels)?;
    info!("Test accuracy: {:.2}%", evaluation.accuracy * 100.0);

    let report = TrainingReport {
        corpus: prepared.class_counts(),
        dropped: prepared.dropped,
        train_size: split.train.len(),
        test_size: split.test.len(),
        n_features: vectorizer.vocabulary_size(),
        evaluation,
    };

    let model = SpamModel::new(vectorizer.into_state(), classifier.into_state());
    Ok((model, report))
}

/// Score a loaded detector on raw labeled messages.
pub fn evaluate_messages(detector: &SpamDetector, messages: &[Message]) -> Result<EvaluationReport> {
    let prepared = corpus::prepare(messages);
    if prepared.is_empty() {
        return Err(SpamLensError::configuration(
            "No usable messages left after cleaning",
        ));
    }

    let texts: Vec<&str> = prepared.messages.iter().map(|m| m.text.as_str()).collect();
    let truth: Vec<Label> = prepared.messages.iter().map(|m| m.label).collect();
    let vectors = detector.vectorizer().transform_batch(&texts);
    let predicted: Vec<Label> = vectors
        .iter()
        .map(|v| detector.classifier().predict(v).label)
        .collect();

    let evaluation = evaluate(&predicted, &truth)?;
    info!(
        "Evaluated {} messages: accuracy {:.2}%",
        truth.len(),
        evaluation.accuracy * 100.0
    );

    Ok(EvaluationReport {
        corpus: prepared.class_counts(),
        dropped: prepared.dropped,
        evaluation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages() -> Vec<Message> {
        let spam = [
            "WINNER!! You have won a free prize, call now",
            "Free entry to win cash, txt WIN to 80086",
            "Claim your free money prize today",
            "URGENT! Win a free holiday, reply WIN",
            "Congratulations you won cash, claim now",
        ];
        let ham = [
            "Are you coming to dinner later?",
            "Ok see you at home",
            "I will be late, sorry",
            "Can we meet tomorrow for lunch",
            "Thanks for the lunch today",
            "Going home now, see you soon",
            "Did you get my email about dinner",
            "Sorry I missed your call, talk later",
        ];
        let mut messages = Vec::new();
        for _ in 0..2 {
            messages.extend(spam.iter().map(|t| Message::new(*t, Label::Spam)));
            messages.extend(ham.iter().map(|t| Message::new(*t, Label::Ham)));
        }
        messages.push(Message::new("!!! 123456", Label::Ham));
        messages
    }

    #[test]
    fn test_train_report() {
        let (model, report) = train(&messages(), &TrainingConfig::default()).unwrap();

        assert_eq!(report.dropped, 1);
        assert_eq!(report.corpus, ClassCounts { ham: 16, spam: 10 });
        // round(16 * 0.2) + round(10 * 0.2)
        assert_eq!(report.test_size, 3 + 2);
        assert_eq!(report.train_size, 21);
        assert_eq!(report.n_features, model.vectorizer.vocabulary_size());
        assert_eq!(report.evaluation.confusion_matrix.total(), 5);
        assert!(model.validate().is_ok());
    }

    #[test]
    fn test_train_is_deterministic() {
        let config = TrainingConfig::default();
        let (a, _) = train(&messages(), &config).unwrap();
        let (b, _) = train(&messages(), &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_evaluate_messages() {
        let (model, _) = train(&messages(), &TrainingConfig::default()).unwrap();
        let detector = SpamDetector::new(model).unwrap();
        let report = evaluate_messages(&detector, &messages()).unwrap();
        assert_eq!(report.evaluation.confusion_matrix.total(), 26);
        assert!(report.evaluation.accuracy > 0.8);
    }

    #[test]
    fn test_train_errors() {
        let config = TrainingConfig::default();
        let unusable = vec![Message::new("123", Label::Ham)];
        assert!(train(&unusable, &config).unwrap_err().is_configuration());

        let bad = config.with_test_size(0.0);
        assert!(train(&messages(), &bad).unwrap_err().is_configuration());
    }
}
