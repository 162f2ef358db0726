//! Local text analysis backing the fallback engine.
//!
//! No network, no model: a lexicon scan for sentiment polarity and a stopword
//! heuristic for topic nouns. Deliberately cheap so the fallback path stays
//! bounded-latency even on long entries.

/// Local analysis capability: scalar sentiment plus noun-ish topic extraction.
pub trait LocalAnalyzer: Send + Sync {
    /// Sentiment polarity of `text` in `[-1.0, 1.0]`.
    ///
    /// Returns `0.0` for empty text or when no lexicon word matches.
    fn sentiment(&self, text: &str) -> f32;

    /// Candidate topic nouns from `text`, lemmatized and deduplicated, in
    /// order of first appearance.
    fn nouns(&self, text: &str) -> Vec<String>;
}

// ── Lexicons ────────────────────────────────────────────────────────────

const POSITIVE_WORDS: &[&str] = &[
    "happy",
    "great",
    "wonderful",
    "amazing",
    "excited",
    "proud",
    "love",
    "loved",
    "fantastic",
    "joy",
    "joyful",
    "grateful",
    "thankful",
    "awesome",
    "excellent",
    "calm",
    "peaceful",
    "relaxed",
    "energized",
    "accomplished",
    "hopeful",
    "good",
    "fun",
    "brilliant",
];

const NEGATIVE_WORDS: &[&str] = &[
    "sad",
    "bad",
    "badly",
    "terrible",
    "awful",
    "exhausted",
    "exhausting",
    "tired",
    "hopeless",
    "stressed",
    "stressful",
    "anxious",
    "anxiety",
    "worried",
    "angry",
    "lonely",
    "overwhelmed",
    "hurt",
    "scared",
    "afraid",
    "miserable",
    "depressed",
    "hard",
    "tough",
    "failed",
    "failure",
];

/// Function words and other tokens that are never useful as topics.
const STOPWORDS: &[&str] = &[
    "the", "and", "but", "for", "with", "that", "this", "these", "those", "was", "were", "been",
    "being", "have", "has", "had", "not", "you", "your", "our", "out", "about", "into", "over",
    "then", "than", "them", "they", "there", "here", "what", "when", "where", "which", "while",
    "how", "why", "all", "any", "some", "very", "really", "just", "still", "today", "yesterday",
    "feel", "feels", "feeling", "felt", "went", "going", "gone", "get", "got", "getting", "made",
    "make", "makes", "making", "did", "does", "doing", "think", "thought", "know", "knew", "like",
    "liked", "want", "wanted", "because", "would", "could", "should", "cant", "dont", "didnt",
    "its", "ive", "im",
];

// ── LexiconAnalyzer ─────────────────────────────────────────────────────

/// Lexicon-based [`LocalAnalyzer`].
///
/// Sentiment is the signed fraction of polarity hits:
/// `(positive - negative) / (positive + negative)`, so a purely negative entry
/// scores `-1.0` and a mixed one lands in between. Nouns are approximated by
/// dropping stopwords, polarity words (mostly adjectives), and `-ly` adverbs,
/// then lightly lemmatizing plurals.
#[derive(Debug, Default, Clone, Copy)]
pub struct LexiconAnalyzer;

impl LexiconAnalyzer {
    /// Create a lexicon analyzer.
    pub fn new() -> Self {
        Self
    }
}

impl LocalAnalyzer for LexiconAnalyzer {
    fn sentiment(&self, text: &str) -> f32 {
        let mut positive = 0usize;
        let mut negative = 0usize;
        for word in words(text) {
            if POSITIVE_WORDS.contains(&word.as_str()) {
                positive += 1;
            } else if NEGATIVE_WORDS.contains(&word.as_str()) {
                negative += 1;
            }
        }
        let hits = positive + negative;
        if hits == 0 {
            return 0.0;
        }
        (positive as f32 - negative as f32) / hits as f32
    }

    fn nouns(&self, text: &str) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        let mut topics = Vec::new();
        for word in words(text) {
            if word.len() < 3
                || STOPWORDS.contains(&word.as_str())
                || POSITIVE_WORDS.contains(&word.as_str())
                || NEGATIVE_WORDS.contains(&word.as_str())
                || word.ends_with("ly")
            {
                continue;
            }
            let lemma = lemmatize(&word);
            if seen.insert(lemma.clone()) {
                topics.push(lemma);
            }
        }
        topics
    }
}

/// Stub analyzer modeling "analysis unavailable": zero sentiment, no topics.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAnalyzer;

impl LocalAnalyzer for NullAnalyzer {
    fn sentiment(&self, _text: &str) -> f32 {
        0.0
    }

    fn nouns(&self, _text: &str) -> Vec<String> {
        Vec::new()
    }
}

// ── Internals ───────────────────────────────────────────────────────────

/// Lowercased alphabetic tokens, apostrophes dropped ("can't" → "cant").
fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric() && c != '\'')
        .filter(|t| !t.is_empty())
        .map(|t| {
            t.chars()
                .filter(|c| c.is_alphanumeric())
                .collect::<String>()
                .to_lowercase()
        })
        .filter(|t| !t.is_empty())
}

/// Light plural lemmatization: "parties" → "party", "boxes" → "box",
/// "interviews" → "interview". Leaves "ss" endings alone.
fn lemmatize(word: &str) -> String {
    if let Some(stem) = word.strip_suffix("ies")
        && stem.len() >= 2
    {
        return format!("{stem}y");
    }
    for suffix in ["ches", "shes", "sses", "xes", "zes"] {
        if let Some(stem) = word.strip_suffix(suffix) {
            return format!("{}{}", stem, &suffix[..suffix.len() - 2]);
        }
    }
    if word.len() > 3
        && let Some(stem) = word.strip_suffix('s')
        && !stem.ends_with('s')
    {
        return stem.to_owned();
    }
    word.to_owned()
}
