use std::collections::HashMap;

use unicode_segmentation::UnicodeSegmentation;

use crate::corpus::TemplateEntry;

/* ====== Best-match responder ======
   Cosine similarity over term-frequency vectors of tokenized prompts.
   Identical normalized strings score 1.0, disjoint token sets score 0. */

#[derive(Debug, Clone)]
pub struct MatcherConfig {
    /// Minimum score before a corpus response beats the default one.
    pub similarity_threshold: f64,
    pub default_response: String,
    pub lowercase: bool,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.90,
            default_response: "I'm sorry, but I don't understand.".to_string(),
            lowercase: true,
        }
    }
}

pub struct MatchIndex {
    entries: Vec<IndexedPrompt>,
    config: MatcherConfig,
}

struct IndexedPrompt {
    terms: HashMap<String, f64>,
    norm: f64,
    response: String,
}

impl MatchIndex {
    /// Index the corpus once; the result is read-only.
    pub fn build(corpus: Vec<TemplateEntry>, config: MatcherConfig) -> Self {
        let entries = corpus
            .into_iter()
            .map(|entry| {
                let terms = term_counts(&entry.prompt, config.lowercase);
                let norm = vector_norm(&terms);
                IndexedPrompt {
                    terms,
                    norm,
                    response: entry.response,
                }
            })
            .collect();
        Self { entries, config }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Best-scoring response at or above the threshold, else the default.
    pub fn respond(&self, query: &str) -> &str {
        match self.best_match(query) {
            Some((i, score)) if score >= self.config.similarity_threshold => {
                &self.entries[i].response
            }
            _ => &self.config.default_response,
        }
    }

    /// Highest-similarity entry; earlier corpus entries win ties.
    fn best_match(&self, query: &str) -> Option<(usize, f64)> {
        let q_terms = term_counts(query, self.config.lowercase);
        let q_norm = vector_norm(&q_terms);
        if q_norm == 0.0 {
            return None;
        }
        let mut best: Option<(usize, f64)> = None;
        for (i, entry) in self.entries.iter().enumerate() {
            let score = cosine(&q_terms, q_norm, &entry.terms, entry.norm);
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((i, score));
            }
        }
        best
    }
}

fn term_counts(text: &str, lowercase: bool) -> HashMap<String, f64> {
    let mut counts = HashMap::new();
    for word in text.unicode_words() {
        let term = if lowercase {
            word.to_lowercase()
        } else {
            word.to_string()
        };
        *counts.entry(term).or_insert(0.0) += 1.0;
    }
    counts
}

fn vector_norm(terms: &HashMap<String, f64>) -> f64 {
    terms.values().map(|c| c * c).sum::<f64>().sqrt()
}

fn cosine(a: &HashMap<String, f64>, a_norm: f64, b: &HashMap<String, f64>, b_norm: f64) -> f64 {
    if a_norm == 0.0 || b_norm == 0.0 {
        return 0.0;
    }
    let dot: f64 = a
        .iter()
        .filter_map(|(term, c)| b.get(term).map(|d| c * d))
        .sum();
    dot / (a_norm * b_norm)
}
