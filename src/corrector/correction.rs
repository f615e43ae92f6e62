use std::cmp::Ordering;

use serde::Serialize;

use super::{transliterate::transliterate, trie::NodeId};

/// A corrected segment of a query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Correction {
    /// Corrected text.
    pub text: String,
    /// Query text the correction was derived from.
    pub original: String,
    pub distance: usize,
    pub score: f64,
    pub is_terminal: bool,
    /// True if the segment matched the dictionary, false if it was passed
    /// through unchanged.
    pub found: bool,

    // Trie node the match ended on, used to continue into the next word.
    #[serde(skip)]
    pub(crate) node: Option<NodeId>,
}

impl Correction {
    /// A dictionary match ending on the given trie node.
    pub fn matched(
        text: String,
        original: String,
        distance: usize,
        score: f64,
        is_terminal: bool,
        node: NodeId,
    ) -> Self {
        Self {
            text,
            original,
            distance,
            score,
            is_terminal,
            found: true,
            node: Some(node),
        }
    }

    /// Text passed through as-is with zero distance and score.
    pub fn unchanged(text: &str) -> Self {
        Self {
            text: text.to_string(),
            original: text.to_string(),
            distance: 0,
            score: 0.0,
            is_terminal: true,
            found: false,
            node: None,
        }
    }

    /// Number of query words the original text spans.
    pub fn word_count(&self) -> usize {
        self.original.chars().filter(|c| *c == ' ').count() + 1
    }

    /// True if the corrected text equals the original once both are
    /// transliterated, eg. "schön" for "schoen".
    pub fn matches_transliterated(&self) -> bool {
        transliterate(&self.text) == transliterate(&self.original)
    }

    /// Rank two corrections. `Less` means `self` is the better one: smaller
    /// distance first, then a transliteration match, then a higher score.
    pub fn compare(&self, other: &Self) -> Ordering {
        self.distance
            .cmp(&other.distance)
            .then_with(|| {
                other
                    .matches_transliterated()
                    .cmp(&self.matches_transliterated())
            })
            .then_with(|| {
                other
                    .score
                    .partial_cmp(&self.score)
                    .unwrap_or(Ordering::Equal)
            })
    }

    /// Append the correction of the following words. The extension already
    /// carries this word's correction as the prefix of its text because it
    /// was matched from this correction's trie node onwards.
    pub(crate) fn extend(self, longer: Correction) -> Self {
        Self {
            text: longer.text,
            original: self.original + &longer.original,
            distance: self.distance + longer.distance,
            score: longer.score,
            is_terminal: longer.is_terminal,
            found: true,
            node: longer.node,
        }
    }
}

/// Aggregate of all segments of a mapped query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Segment texts joined with ", ".
    pub text: String,
    pub distance: usize,
    pub score: f64,
}

impl Summary {
    pub fn of(segments: &[Correction]) -> Self {
        Self {
            text: segments
                .iter()
                .map(|c| c.text.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            distance: segments.iter().map(|c| c.distance).sum(),
            score: segments.iter().map(|c| c.score).sum(),
        }
    }
}
