//! Word-list sentiment with negation handling.
//!
//! Each matched word contributes +/-1; a negation word within the three
//! preceding tokens flips the contribution. The raw tally is squashed into
//! (-1, 1) with `x / sqrt(x^2 + alpha)` so a single headline cannot pin
//! the compound at the extremes.

use std::collections::HashSet;

const POSITIVE_WORDS: &[&str] = &[
    "bullish", "rally", "surge", "gain", "profit", "growth", "beat",
    "upgrade", "outperform", "strong", "positive", "rise", "increase",
    "breakthrough", "innovation", "success", "exceed", "momentum",
    "buy", "recommend", "optimistic", "record", "advance", "dividend",
    "buyback", "upside", "recovery", "rebound", "expansion", "robust",
    "raised", "upgraded", "soar", "jump", "tailwind",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bearish", "decline", "loss", "fall", "plunge", "crash", "miss",
    "downgrade", "underperform", "weak", "negative", "drop", "decrease",
    "concern", "risk", "fail", "disappoint", "slump", "sell",
    "warning", "pessimistic", "retreat", "fear", "trouble", "lawsuit",
    "recall", "investigation", "probe", "default", "bankruptcy",
    "layoff", "downside", "headwind", "lowered", "suspended",
];

const NEGATION_WORDS: &[&str] = &[
    "not", "no", "never", "don't", "doesn't", "didn't", "isn't", "aren't",
    "wasn't", "weren't", "won't", "wouldn't", "couldn't", "shouldn't",
    "hardly", "barely", "neither", "nor", "without",
];

const NEGATION_WINDOW: usize = 3;

const NORMALIZATION_ALPHA: f64 = 15.0;

pub struct SentimentLexicon {
    positive: HashSet<&'static str>,
    negative: HashSet<&'static str>,
    negation: HashSet<&'static str>,
}

impl SentimentLexicon {
    pub fn new() -> Self {
        Self {
            positive: POSITIVE_WORDS.iter().copied().collect(),
            negative: NEGATIVE_WORDS.iter().copied().collect(),
            negation: NEGATION_WORDS.iter().copied().collect(),
        }
    }

    /// Compound polarity of `text` in (-1, 1); 0.0 for text with no
    /// lexicon hits.
    pub fn compound(&self, text: &str) -> f64 {
        let raw = self.raw_score(text);
        if raw == 0.0 {
            return 0.0;
        }
        raw / (raw * raw + NORMALIZATION_ALPHA).sqrt()
    }

    fn raw_score(&self, text: &str) -> f64 {
        let lower = text.to_lowercase();
        let words: Vec<&str> = lower
            .split(|c: char| {
                c.is_whitespace() || c == ',' || c == ';' || c == '.' || c == '!' || c == '?'
                    || c == ':'
            })
            .filter(|w| !w.is_empty())
            .collect();

        let negation_positions: Vec<usize> = words
            .iter()
            .enumerate()
            .filter(|(_, w)| self.negation.contains(*w))
            .map(|(i, _)| i)
            .collect();

        let mut score: i32 = 0;
        for (i, word) in words.iter().enumerate() {
            let is_positive = self.positive.contains(*word);
            let is_negative = self.negative.contains(*word);
            if !is_positive && !is_negative {
                continue;
            }

            let negated = negation_positions
                .iter()
                .any(|&pos| pos < i && (i - pos) <= NEGATION_WINDOW);

            if is_positive {
                score += if negated { -1 } else { 1 };
            } else {
                score += if negated { 1 } else { -1 };
            }
        }

        score as f64
    }
}

impl Default for SentimentLexicon {
    fn default() -> Self {
        Self::new()
    }
}
