use super::{
    correction::Correction,
    transliterate::transliterate_char,
    trie::{NodeId, Trie},
};

/// Live frontier of the automaton: ascending positions in the target text,
/// each with the cheapest edit cost found to reach it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct State {
    pub positions: Vec<usize>,
    pub costs: Vec<usize>,
}

impl State {
    fn with_capacity(n: usize) -> Self {
        Self {
            positions: Vec::with_capacity(n),
            costs: Vec::with_capacity(n),
        }
    }

    fn push(&mut self, position: usize, cost: usize) {
        self.positions.push(position);
        self.costs.push(cost);
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Cost of the alignment that has consumed the most of the text.
    pub fn distance(&self) -> Option<usize> {
        self.costs.last().copied()
    }
}

/// Levenshtein automaton over a fixed text with an inclusive edit budget.
/// Besides insertions, deletions and substitutions, adjacent transpositions
/// and transliterated digraphs (eg. "oe" for "ö") cost a single edit.
#[derive(Debug, Clone)]
pub struct Automaton {
    text: Vec<char>,
    original: String,
    max_edits: usize,
}

impl Automaton {
    pub fn new(text: &str, max_edits: usize) -> Self {
        Self {
            text: text.chars().collect(),
            original: text.to_string(),
            max_edits,
        }
    }

    /// Initial state: up to `max_edits` leading characters of the text can be
    /// skipped at one edit each.
    pub fn start(&self) -> State {
        let n = self.max_edits.min(self.text.len()) + 1;
        State {
            positions: (0..n).collect(),
            costs: (0..n).collect(),
        }
    }

    /// Advance the state by one trie character. `prev` is the trie character
    /// consumed before `cur`, if any.
    pub fn step(&self, state: &State, cur: char, prev: Option<char>) -> State {
        let mut next = State::with_capacity(state.positions.len() + 1);

        // Insert `cur` in front of the text.
        if let (Some(0), Some(&cost)) = (state.positions.first(), state.costs.first()) {
            if cost < self.max_edits {
                next.push(0, cost + 1);
            }
        }

        for (j, (&i, &cost)) in state.positions.iter().zip(&state.costs).enumerate() {
            if i == self.text.len() {
                break;
            }

            let mut value = cost + self.substitution_cost(i, cur, prev);

            if next.positions.last() == Some(&i) {
                if let Some(&last) = next.costs.last() {
                    value = value.min(last + 1);
                }
            }

            if state.positions.get(j + 1) == Some(&(i + 1)) {
                value = value.min(state.costs[j + 1] + 1);
            }

            if value <= self.max_edits {
                next.push(i + 1, value);
            }
        }

        next
    }

    /// True if some alignment consumed the whole text within budget.
    pub fn is_match(&self, state: &State) -> bool {
        state.positions.last() == Some(&self.text.len())
    }

    /// True while any alignment is within budget. Once false, no descendant
    /// trie node can match.
    pub fn can_match(&self, state: &State) -> bool {
        !state.is_empty()
    }

    /// Return every trie node below (and including) `from` that matches the
    /// text within budget. Partial matches inside a word are returned too and
    /// are told apart by `is_terminal`.
    pub fn correct(&self, trie: &Trie, from: NodeId) -> Vec<Correction> {
        let mut out = Vec::new();
        self.walk(trie, from, &self.start(), &mut out);
        out
    }

    fn walk(&self, trie: &Trie, id: NodeId, state: &State, out: &mut Vec<Correction>) {
        let node = trie.node(id);

        if self.is_match(state) {
            out.push(Correction::matched(
                trie.phrase(id),
                self.original.clone(),
                state.distance().unwrap_or(0),
                node.score(),
                node.is_terminal(),
                id,
            ));
        }

        for (c, child) in node.children() {
            let next = self.step(state, c, node.char());
            if self.can_match(&next) {
                self.walk(trie, child, &next, out);
            }
        }
    }

    fn substitution_cost(&self, i: usize, cur: char, prev: Option<char>) -> usize {
        let text = &self.text;
        if text[i] == cur {
            return 0;
        }

        // Adjacent transposition.
        if i > 0 && prev.is_some_and(|p| text[i - 1] == cur && text[i] == p) {
            return 0;
        }

        // Transliterated digraph, eg. "oe" in the text against "ö" in the trie.
        if let Some(ascii) = transliterate_char(cur) {
            let mut digraph = ascii.chars();
            if i > 0 && digraph.next() == Some(text[i - 1]) && digraph.next() == Some(text[i]) {
                return 0;
            }
        }

        1
    }
}
