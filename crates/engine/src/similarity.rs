//! Text similarity index over the role corpus.
//!
//! # Algorithm
//! Unigram+bigram TF-IDF with a capped vocabulary, scored by cosine
//! similarity:
//! - tokens are case-folded runs of 2+ alphanumeric characters; English
//!   stop words are removed before n-grams are formed
//! - the vocabulary keeps the top 500 terms by total corpus frequency,
//!   ties broken alphabetically so a rebuild over the same corpus is
//!   byte-identical
//! - IDF is smoothed (`ln((1+n)/(1+df)) + 1`) and document vectors are
//!   L2-normalized at fit time, so scoring is a sparse dot product
//!
//! Degenerate inputs never fail: an empty query, an empty corpus, or a
//! query with no in-vocabulary terms all score 0.0 across the board.

use std::collections::{HashMap, HashSet};

const MAX_FEATURES: usize = 500;

/// A fitted TF-IDF index over a fixed corpus. Build once per reference-data
/// load; read-only afterwards and safe to share across sessions.
#[derive(Debug, Clone)]
pub struct TfidfIndex {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    doc_vectors: Vec<Vec<(usize, f64)>>,
}

impl TfidfIndex {
    /// Fits vocabulary statistics over the corpus and pre-vectorizes every
    /// document.
    pub fn fit(corpus: &[String]) -> Self {
        let doc_terms: Vec<Vec<String>> = corpus.iter().map(|text| terms(text)).collect();

        // Corpus-wide term frequency and document frequency.
        let mut total_counts: HashMap<String, usize> = HashMap::new();
        let mut doc_freq: HashMap<String, usize> = HashMap::new();
        for doc in &doc_terms {
            let mut seen: HashSet<&str> = HashSet::new();
            for term in doc {
                *total_counts.entry(term.clone()).or_insert(0) += 1;
                if seen.insert(term) {
                    *doc_freq.entry(term.clone()).or_insert(0) += 1;
                }
            }
        }

        // Cap the vocabulary at the most frequent terms; alphabetical
        // tiebreak keeps refits deterministic.
        let mut ranked: Vec<(&String, &usize)> = total_counts.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(MAX_FEATURES);

        let mut vocabulary = HashMap::with_capacity(ranked.len());
        let mut idf = vec![0.0; ranked.len()];
        let n_docs = corpus.len() as f64;
        for (index, (term, _)) in ranked.into_iter().enumerate() {
            let df = doc_freq.get(term).copied().unwrap_or(0) as f64;
            idf[index] = ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0;
            vocabulary.insert(term.clone(), index);
        }

        let doc_vectors = doc_terms
            .iter()
            .map(|doc| vectorize(doc, &vocabulary, &idf))
            .collect();

        TfidfIndex {
            vocabulary,
            idf,
            doc_vectors,
        }
    }

    /// Cosine similarity between `query` and each corpus document,
    /// order-aligned with the corpus handed to [`TfidfIndex::fit`].
    pub fn score(&self, query: &str) -> Vec<f64> {
        let query_vec = vectorize(&terms(query), &self.vocabulary, &self.idf);
        if query_vec.is_empty() {
            return vec![0.0; self.doc_vectors.len()];
        }

        let query_map: HashMap<usize, f64> = query_vec.into_iter().collect();
        self.doc_vectors
            .iter()
            .map(|doc| {
                doc.iter()
                    .map(|(index, weight)| query_map.get(index).copied().unwrap_or(0.0) * weight)
                    .sum()
            })
            .collect()
    }

    pub fn corpus_len(&self) -> usize {
        self.doc_vectors.len()
    }
}

/// Stop-filtered unigrams and bigrams for one text.
fn terms(text: &str) -> Vec<String> {
    let tokens: Vec<String> = tokenize(text)
        .into_iter()
        .filter(|t| !STOP_WORDS.contains(&t.as_str()))
        .collect();

    let mut terms = tokens.clone();
    terms.extend(tokens.windows(2).map(|pair| pair.join(" ")));
    terms
}

/// Case-folded runs of 2+ alphanumeric characters.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|t| t.len() >= 2)
        .map(str::to_string)
        .collect()
}

/// L2-normalized sparse TF·IDF vector, indices ascending.
fn vectorize(
    doc_terms: &[String],
    vocabulary: &HashMap<String, usize>,
    idf: &[f64],
) -> Vec<(usize, f64)> {
    let mut counts: HashMap<usize, f64> = HashMap::new();
    for term in doc_terms {
        if let Some(&index) = vocabulary.get(term) {
            *counts.entry(index).or_insert(0.0) += 1.0;
        }
    }

    let mut vector: Vec<(usize, f64)> = counts
        .into_iter()
        .map(|(index, tf)| (index, tf * idf[index]))
        .collect();
    vector.sort_by_key(|&(index, _)| index);

    let norm = vector.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
    if norm > 0.0 {
        for (_, weight) in &mut vector {
            *weight /= norm;
        }
    }
    vector
}

/// English stop words removed before vectorization.
const STOP_WORDS: &[&str] = &[
    "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can", "cannot", "could", "did", "do", "does", "doing", "down", "during",
    "each", "few", "for", "from", "further", "had", "has", "have", "having", "he", "her",
    "here", "hers", "herself", "him", "himself", "his", "how", "if", "in", "into", "is", "it",
    "its", "itself", "just", "me", "more", "most", "my", "myself", "no", "nor", "not", "now",
    "of", "off", "on", "once", "only", "or", "other", "our", "ours", "ourselves", "out",
    "over", "own", "same", "she", "should", "so", "some", "such", "than", "that", "the",
    "their", "theirs", "them", "themselves", "then", "there", "these", "they", "this",
    "those", "through", "to", "too", "under", "until", "up", "very", "was", "we", "were",
    "what", "when", "where", "which", "while", "who", "whom", "why", "will", "with", "would",
    "you", "your", "yours", "yourself", "yourselves",
];
