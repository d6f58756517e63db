//! Criterion benchmarks for spamlens.
//!
//! Covers the hot paths of training and prediction:
//! - Text normalization
//! - TF-IDF fitting and transformation
//! - Naive Bayes prediction

use std::hint::black_box;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use spamlens::analysis::normalizer::normalize;
use spamlens::config::{NaiveBayesConfig, VectorizerConfig};
use spamlens::corpus::Label;
use spamlens::ml::{Classifier, MultinomialNaiveBayes, TfIdfVectorizer};

/// Generate labeled SMS-like messages for benchmarking.
fn generate_messages(count: usize) -> Vec<(String, Label)> {
    let spam_words = [
        "WIN", "free", "prize", "cash", "claim", "urgent", "txt", "reply", "award", "winner",
        "mobile", "offer",
    ];
    let ham_words = [
        "dinner", "later", "home", "lunch", "tomorrow", "sorry", "meeting", "running", "late",
        "milk", "call", "soon",
    ];

    (0..count)
        .map(|i| {
            let (words, label) = if i % 4 == 0 {
                (&spam_words, Label::Spam)
            } else {
                (&ham_words, Label::Ham)
            };
            let length = 5 + (i % 15);
            let text = (0..length)
                .map(|j| words[(i * 7 + j * 13) % words.len()]) // Pseudo-random distribution
                .collect::<Vec<_>>()
                .join(" ");
            (format!("{text}!! 0800{i:06}"), label)
        })
        .collect()
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    let messages = generate_messages(1000);

    group.throughput(Throughput::Elements(100));
    group.bench_function("normalize_batch", |b| {
        b.iter(|| {
            for (text, _) in messages.iter().take(100) {
                black_box(normalize(black_box(text)));
            }
        })
    });

    group.finish();
}

fn bench_vectorizer(c: &mut Criterion) {
    let mut group = c.benchmark_group("tfidf");
    group.sample_size(20);

    let texts: Vec<String> = generate_messages(2000)
        .into_iter()
        .map(|(text, _)| normalize(&text))
        .collect();
    let config = VectorizerConfig::default();

    group.throughput(Throughput::Elements(texts.len() as u64));
    group.bench_function("fit", |b| {
        b.iter(|| black_box(TfIdfVectorizer::fit(black_box(&texts), &config).unwrap()))
    });

    let vectorizer = TfIdfVectorizer::fit(&texts, &config).unwrap();
    group.bench_function("transform_batch", |b| {
        b.iter(|| black_box(vectorizer.transform_batch(black_box(&texts))))
    });

    group.throughput(Throughput::Elements(1));
    group.bench_function("transform_single", |b| {
        b.iter(|| black_box(vectorizer.transform(black_box(&texts[0]))))
    });

    group.finish();
}

fn bench_classifier(c: &mut Criterion) {
    let mut group = c.benchmark_group("naive_bayes");

    let messages = generate_messages(2000);
    let texts: Vec<String> = messages.iter().map(|(text, _)| normalize(text)).collect();
    let labels: Vec<Label> = messages.iter().map(|(_, label)| *label).collect();

    let vectorizer = TfIdfVectorizer::fit(&texts, &VectorizerConfig::default()).unwrap();
    let vectors = vectorizer.transform_batch(&texts);
    let classifier =
        MultinomialNaiveBayes::fit(&vectors, &labels, &NaiveBayesConfig::default()).unwrap();

    group.bench_function("predict_single", |b| {
        b.iter(|| black_box(classifier.predict(black_box(&vectors[0]))))
    });

    group.throughput(Throughput::Elements(vectors.len() as u64));
    group.bench_function("predict_batch", |b| {
        b.iter(|| black_box(classifier.predict_batch(black_box(&vectors))))
    });

    group.finish();
}

criterion_group!(benches, bench_normalize, bench_vectorizer, bench_classifier);
criterion_main!(benches);
