//! Fitted TF-IDF vectorizer, deserialized from the training artifact.
//!
//! Serving reuses the exact vocabulary, idf weights and n-gram range the
//! model was fit with; nothing is refit here. `transform` mirrors the
//! training pipeline: lowercase, tokenize on runs of at least two word
//! characters, emit n-grams in the fitted range, count vocabulary hits,
//! weight by idf and l2-normalize the document.

use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct TfidfVectorizer {
    /// Term -> column index into the idf (and model weight) layout.
    pub vocabulary: HashMap<String, usize>,
    /// Per-column inverse-document-frequency weights.
    pub idf: Vec<f64>,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

impl TfidfVectorizer {
    /// Width of the sparse block this vectorizer produces.
    pub fn n_features(&self) -> usize {
        self.idf.len()
    }

    /// Sparse (column, weight) pairs in ascending column order. Documents
    /// with no vocabulary hit come back empty, which is the all-zero row.
    pub fn transform(&self, text: &str) -> Vec<(usize, f64)> {
        let tokens = tokenize(text);
        let (lo, hi) = self.ngram_range;
        let mut weights: BTreeMap<usize, f64> = BTreeMap::new();

        for n in lo.max(1)..=hi {
            if n > tokens.len() {
                break;
            }
            for window in tokens.windows(n) {
                let term = window.join(" ");
                if let Some(&column) = self.vocabulary.get(&term) {
                    if let Some(idf) = self.idf.get(column) {
                        *weights.entry(column).or_insert(0.0) += idf;
                    }
                }
            }
        }

        let norm = weights.values().map(|w| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for weight in weights.values_mut() {
                *weight /= norm;
            }
        }
        weights.into_iter().collect()
    }
}

/// Lowercased runs of word characters, single-character tokens dropped —
/// the token pattern the training pipeline used.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| token.chars().count() >= 2)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vectorizer() -> TfidfVectorizer {
        TfidfVectorizer {
            vocabulary: HashMap::from([
                ("python".to_string(), 0),
                ("sql".to_string(), 1),
                ("machine learning".to_string(), 2),
            ]),
            idf: vec![1.0, 2.0, 3.0],
            ngram_range: (1, 2),
        }
    }

    #[test]
    fn test_tokenize_lowercases_and_drops_short_tokens() {
        assert_eq!(
            tokenize("Python, SQL & R; c++"),
            vec!["python".to_string(), "sql".to_string()]
        );
    }

    #[test]
    fn test_transform_counts_vocabulary_hits_with_idf() {
        let v = TfidfVectorizer {
            vocabulary: HashMap::from([("python".to_string(), 0), ("sql".to_string(), 1)]),
            idf: vec![1.0, 3.0],
            ngram_range: (1, 1),
        };
        // python appears twice, sql once; pre-norm weights [2.0, 3.0].
        let row = v.transform("python sql python");
        assert_eq!(row.len(), 2);
        let norm = (4.0_f64 + 9.0).sqrt();
        assert!((row[0].1 - 2.0 / norm).abs() < 1e-12);
        assert!((row[1].1 - 3.0 / norm).abs() < 1e-12);
    }

    #[test]
    fn test_bigrams_are_emitted_within_fitted_range() {
        let row = vectorizer().transform("machine learning");
        let columns: Vec<usize> = row.iter().map(|(c, _)| *c).collect();
        assert_eq!(columns, vec![2]);
    }

    #[test]
    fn test_transform_is_l2_normalized() {
        let row = vectorizer().transform("python sql machine learning");
        let norm: f64 = row.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_unseen_terms_produce_empty_row() {
        assert!(vectorizer().transform("haskell prolog").is_empty());
        assert!(vectorizer().transform("").is_empty());
    }

    #[test]
    fn test_columns_are_ascending() {
        let row = vectorizer().transform("machine learning python sql");
        let columns: Vec<usize> = row.iter().map(|(c, _)| *c).collect();
        let mut sorted = columns.clone();
        sorted.sort_unstable();
        assert_eq!(columns, sorted);
    }

    #[test]
    fn test_missing_ngram_range_defaults_to_unigrams() {
        let v: TfidfVectorizer =
            serde_json::from_str(r#"{"vocabulary": {"python": 0}, "idf": [1.0]}"#).unwrap();
        assert_eq!(v.ngram_range, (1, 1));
        assert_eq!(v.transform("python").len(), 1);
    }
}
