use std::collections::HashMap;

use super::{
    automaton::Automaton,
    correction::Correction,
    trie::{NodeId, Trie, Tries, ROOT},
};

/// Default number of words a single phrase correction may span.
pub const DEFAULT_MAX_LOOKAHEAD: usize = 5;

/// Maps a query to dictionary phrases of one language. Splits the query on
/// whitespace and greedily looks for the longest phrase correction at every
/// position, while every single word stays within its own edit budget. A
/// mapper caches single word corrections and is meant to live for one query.
pub struct QueryMapper<'a> {
    trie: Option<&'a Trie>,
    allowed_distances: &'a [usize],
    cache: HashMap<String, Option<Correction>>,
}

impl<'a> QueryMapper<'a> {
    pub fn new(tries: &'a Tries, language: &str, allowed_distances: &'a [usize]) -> Self {
        Self {
            trie: tries.get(language),
            allowed_distances,
            cache: HashMap::new(),
        }
    }

    /// Map a query to its corrected segments. Words that can't be corrected
    /// are passed through as their own segment.
    pub fn map(&mut self, query: &str, max_lookahead: usize) -> Vec<Correction> {
        if self.trie.is_none() {
            return vec![Correction::unchanged(query)];
        }

        let words: Vec<&str> = query.split_whitespace().collect();
        let max_lookahead = max_lookahead.max(1);

        let mut out = Vec::new();
        let mut i = 0;
        while i < words.len() {
            let last = i + max_lookahead.min(words.len() - i) - 1;
            let correction = self
                .correct(&words, i, last, ROOT, false)
                .unwrap_or_else(|| Correction::unchanged(words[i]));

            i += correction.word_count();
            out.push(correction);
        }

        out
    }

    /// Edit budget of a word: the index of the first allowed distance
    /// threshold the word is shorter than.
    pub fn max_edits(&self, word: &str) -> usize {
        let len = word.chars().count();
        self.allowed_distances
            .iter()
            .position(|&max| len < max)
            .unwrap_or(self.allowed_distances.len())
    }

    /// Best correction of a single word on its own, from the trie root.
    pub fn correct_word(&mut self, word: &str) -> Option<Correction> {
        if let Some(c) = self.cache.get(word) {
            return c.clone();
        }

        let trie = self.trie?;
        let best = Automaton::new(word, self.max_edits(word))
            .correct(trie, ROOT)
            .into_iter()
            .reduce(|best, c| if c.compare(&best).is_lt() { c } else { best });

        self.cache.insert(word.to_string(), best.clone());
        best
    }

    /// Best correction of `words[first..=last]` starting at the given trie
    /// node. In phrase mode the word is matched together with the space that
    /// separates it from the previous word. Corrections are extended word by
    /// word as far as the trie allows, but a phrase is never chosen over
    /// correcting a word on its own if that would cost the word more edits.
    pub fn correct(
        &mut self,
        words: &[&str],
        first: usize,
        last: usize,
        from: NodeId,
        phrase: bool,
    ) -> Option<Correction> {
        let trie = self.trie?;
        let word = words[first];
        let max_edits = self.max_edits(word);
        let word_distance = self.correct_word(word).map(|c| c.distance);

        let text = if phrase {
            format!(" {}", word)
        } else {
            word.to_string()
        };

        let mut best: Option<Correction> = None;

        for candidate in Automaton::new(&text, max_edits).correct(trie, from) {
            if word_distance.is_some_and(|d| candidate.distance > d) {
                continue;
            }

            let mut cur = candidate;
            if first < last {
                if let Some(node) = cur.node {
                    if let Some(longer) = self.correct(words, first + 1, last, node, true) {
                        cur = cur.extend(longer);
                    }
                }
            }

            // Partial words only serve as stepping stones into longer phrases.
            if !cur.is_terminal {
                continue;
            }

            best = Some(match best {
                Some(b) => better_of(b, cur),
                None => cur,
            });
        }

        best
    }
}

/// Pick the correction spanning more words, or the better ranked one.
/// Exact ties go to `b`.
fn better_of(a: Correction, b: Correction) -> Correction {
    match a.word_count().cmp(&b.word_count()) {
        std::cmp::Ordering::Greater => a,
        std::cmp::Ordering::Less => b,
        std::cmp::Ordering::Equal => {
            if a.compare(&b).is_lt() {
                a
            } else {
                b
            }
        }
    }
}
