//! Versioned model file.
//!
//! A [`SpamModel`] bundles the fitted vectorizer and classifier states with
//! a format version. The file is the bincode encoding of the struct; only
//! logical fields are stored (vocabulary, idf, priors, likelihoods and the
//! analyzer settings), never the analyzer itself.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SpamLensError};
use crate::ml::naive_bayes::NaiveBayesState;
use crate::ml::tfidf::VectorizerState;

/// Current model file format version.
pub const FORMAT_VERSION: u32 = 1;

/// A fitted spam model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpamModel {
    pub format_version: u32,
    pub vectorizer: VectorizerState,
    pub classifier: NaiveBayesState,
}

impl SpamModel {
    /// Bundle fitted states at the current format version.
    pub fn new(vectorizer: VectorizerState, classifier: NaiveBayesState) -> Self {
        SpamModel {
            format_version: FORMAT_VERSION,
            vectorizer,
            classifier,
        }
    }

    /// Check version and shape consistency.
    pub fn validate(&self) -> Result<()> {
        if self.format_version != FORMAT_VERSION {
            return Err(SpamLensError::model(format!(
                "Unsupported model format version {} (expected {})",
                self.format_version, FORMAT_VERSION
            )));
        }
        self.vectorizer.validate()?;
        self.classifier.validate()?;
        if self.vectorizer.vocabulary_size() != self.classifier.n_features() {
            return Err(SpamLensError::model(format!(
                "Vectorizer has {} terms but classifier has {} features",
                self.vectorizer.vocabulary_size(),
                self.classifier.n_features()
            )));
        }
        Ok(())
    }

    /// Encode the model to bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode and validate a model from bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let model: SpamModel = bincode::deserialize(bytes)?;
        model.validate()?;
        Ok(model)
    }

    /// Save the model, creating parent directories as needed.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let mut writer = BufWriter::new(File::create(path)?);
        bincode::serialize_into(&mut writer, self)?;
        writer.flush()?;

        info!("Saved model to {}", path.display());
        Ok(())
    }

    /// Load and validate a model.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        let model: SpamModel = bincode::deserialize_from(reader)?;
        model.validate()?;

        info!(
            "Loaded model from {} ({} features)",
            path.display(),
            model.vectorizer.vocabulary_size()
        );
        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{NaiveBayesConfig, VectorizerConfig};
    use crate::corpus::Label;
    use crate::ml::naive_bayes::MultinomialNaiveBayes;
    use crate::ml::tfidf::TfIdfVectorizer;

    fn model() -> SpamModel {
        let docs = ["win money now", "call you later", "free money win", "are you free later"];
        let labels = [Label::Spam, Label::Ham, Label::Spam, Label::Ham];
        let vectorizer = TfIdfVectorizer::fit(&docs, &VectorizerConfig::default()).unwrap();
        let vectors = vectorizer.transform_batch(&docs);
        let classifier =
            MultinomialNaiveBayes::fit(&vectors, &labels, &NaiveBayesConfig::default()).unwrap();
        SpamModel::new(vectorizer.into_state(), classifier.into_state())
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("model.bin");
        let model = model();
        model.save(&path).unwrap();
        assert_eq!(SpamModel::load(&path).unwrap(), model);
    }

    #[test]
    fn test_version_mismatch() {
        let mut model = model();
        model.format_version = 99;
        let bytes = model.to_bytes().unwrap();
        assert!(matches!(
            SpamModel::from_bytes(&bytes),
            Err(SpamLensError::Model(_))
        ));
    }

    #[test]
    fn test_shape_mismatch() {
        let mut model = model();
        model.classifier.feature_log_prob[0].pop();
        model.classifier.feature_log_prob[1].pop();
        assert!(matches!(model.validate(), Err(SpamLensError::Model(_))));
    }

    #[test]
    fn test_non_finite_parameters_fail_to_load() {
        let mut model = model();
        model.classifier.feature_log_prob[0]
            .iter_mut()
            .for_each(|lp| *lp = f64::NEG_INFINITY);
        let bytes = model.to_bytes().unwrap();
        assert!(matches!(
            SpamModel::from_bytes(&bytes),
            Err(SpamLensError::Model(_))
        ));

        let mut model = self::model();
        model.vectorizer.idf[0] = f64::NAN;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.bin");
        std::fs::write(&path, model.to_bytes().unwrap()).unwrap();
        assert!(SpamModel::load(&path).is_err());
    }

    #[test]
    fn test_garbage_bytes() {
        assert!(matches!(
            SpamModel::from_bytes(b"not a model"),
            Err(SpamLensError::Serialization(_))
        ));
    }
}
