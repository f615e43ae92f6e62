use std::collections::{BTreeMap, HashMap};

/// Index of a node in a trie's node table.
pub type NodeId = usize;

/// The root node is always the first entry in the node table.
pub const ROOT: NodeId = 0;

/// A single character position of one or more inserted phrases.
#[derive(Debug, Clone, Default)]
pub struct Node {
    ch: Option<char>,
    parent: Option<NodeId>,
    is_terminal: bool,
    is_phrase: bool,
    score: f64,
    children: BTreeMap<char, NodeId>,
}

impl Node {
    pub fn char(&self) -> Option<char> {
        self.ch
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// True if a phrase, or a word inside a phrase, ends at this node.
    pub fn is_terminal(&self) -> bool {
        self.is_terminal
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn children(&self) -> impl Iterator<Item = (char, NodeId)> + '_ {
        self.children.iter().map(|(c, id)| (*c, *id))
    }

    pub fn child(&self, c: char) -> Option<NodeId> {
        self.children.get(&c).copied()
    }
}

/// Arena allocated prefix tree of lowercased phrases. Nodes refer to their
/// parents by index, so phrases can be rebuilt without owning back-pointers.
#[derive(Debug, Clone)]
pub struct Trie {
    nodes: Vec<Node>,
    num_phrases: usize,
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

impl Trie {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::default()],
            num_phrases: 0,
        }
    }

    /// Insert a phrase with its score. Every word boundary inside the phrase is
    /// marked terminal. Re-inserting a phrase overwrites its score.
    pub fn insert(&mut self, phrase: &str, score: f64) {
        if phrase.is_empty() {
            return;
        }

        let chars: Vec<char> = phrase.to_lowercase().chars().collect();
        let mut id = ROOT;

        for (i, &c) in chars.iter().enumerate() {
            id = match self.nodes[id].child(c) {
                Some(child) => child,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(Node {
                        ch: Some(c),
                        parent: Some(id),
                        ..Default::default()
                    });
                    self.nodes[id].children.insert(c, child);
                    child
                }
            };

            if chars.get(i + 1).is_none_or(|next| *next == ' ') {
                self.nodes[id].is_terminal = true;
            }
        }

        let node = &mut self.nodes[id];
        if !node.is_phrase {
            node.is_phrase = true;
            self.num_phrases += 1;
        }
        node.score = score;
    }

    /// Find the node for the full phrase, if every character is present.
    pub fn lookup(&self, phrase: &str) -> Option<NodeId> {
        phrase
            .chars()
            .try_fold(ROOT, |id, c| self.nodes[id].child(c))
    }

    /// Rebuild the phrase ending at a node by walking up to the root.
    pub fn phrase(&self, id: NodeId) -> String {
        let mut chars = Vec::new();
        let mut cur = Some(id);

        while let Some(n) = cur {
            let node = &self.nodes[n];
            if let Some(c) = node.ch {
                chars.push(c);
            }
            cur = node.parent;
        }

        chars.iter().rev().collect()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Number of nodes including the root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Number of distinct phrases inserted.
    pub fn num_phrases(&self) -> usize {
        self.num_phrases
    }
}

/// One trie per language.
#[derive(Debug, Clone, Default)]
pub struct Tries {
    tries: HashMap<String, Trie>,
}

impl Tries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a phrase into the trie for the given language, creating the
    /// trie on first use.
    pub fn insert(&mut self, language: &str, phrase: &str, score: f64) {
        self.tries
            .entry(language.to_string())
            .or_default()
            .insert(phrase, score);
    }

    pub fn get(&self, language: &str) -> Option<&Trie> {
        self.tries.get(language)
    }

    /// Language tags in sorted order.
    pub fn languages(&self) -> Vec<&str> {
        let mut langs: Vec<&str> = self.tries.keys().map(String::as_str).collect();
        langs.sort_unstable();
        langs
    }

    pub fn is_empty(&self) -> bool {
        self.tries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inserts_and_looks_up_phrases() {
        let mut trie = Trie::new();
        trie.insert("some phrase", 1.0);
        trie.insert("another phrase", 2.0);

        let id = trie.lookup("some phrase").unwrap();
        assert_eq!(trie.phrase(id), "some phrase");
        assert_eq!(trie.node(id).score(), 1.0);

        let id = trie.lookup("another phrase").unwrap();
        assert_eq!(trie.phrase(id), "another phrase");
        assert_eq!(trie.node(id).score(), 2.0);
    }

    #[test]
    fn ignores_empty_phrases() {
        let mut trie = Trie::new();
        trie.insert("", 1.0);

        assert!(trie.is_empty());
        assert!(!trie.node(ROOT).is_terminal());
        assert_eq!(trie.node(ROOT).parent(), None);
        assert_eq!(trie.num_phrases(), 0);
    }

    #[test]
    fn marks_word_boundaries_terminal() {
        let mut trie = Trie::new();
        trie.insert("some phrase", 1.0);

        let some = trie.lookup("some").unwrap();
        assert!(trie.node(some).is_terminal());
        assert_eq!(trie.node(some).score(), 0.0);

        assert!(!trie.node(trie.lookup("som").unwrap()).is_terminal());
        assert!(!trie.node(trie.lookup("some ").unwrap()).is_terminal());
        assert!(trie.node(trie.lookup("some phrase").unwrap()).is_terminal());
    }

    #[test]
    fn lowercases_and_overwrites_scores() {
        let mut trie = Trie::new();
        trie.insert("Some Phrase", 1.0);
        trie.insert("some phrase", 3.0);

        let id = trie.lookup("some phrase").unwrap();
        assert_eq!(trie.node(id).score(), 3.0);
        assert_eq!(trie.num_phrases(), 1);
        assert!(trie.lookup("Some Phrase").is_none());
    }

    #[test]
    fn returns_none_for_missing_phrases() {
        let mut trie = Trie::new();
        trie.insert("some phrase", 1.0);

        assert!(trie.lookup("some phrases").is_none());
        assert!(trie.lookup("unknown").is_none());
        assert_eq!(trie.lookup(""), Some(ROOT));
    }

    #[test]
    fn keeps_languages_apart() {
        let mut tries = Tries::new();
        tries.insert("en", "some phrase", 1.0);
        tries.insert("de", "andere phrase", 2.0);

        let en = tries.get("en").unwrap();
        assert_eq!(en.node(en.lookup("some phrase").unwrap()).score(), 1.0);
        assert!(en.lookup("andere phrase").is_none());

        let de = tries.get("de").unwrap();
        assert_eq!(de.node(de.lookup("andere phrase").unwrap()).score(), 2.0);

        assert!(tries.get("fr").is_none());
        assert_eq!(tries.languages(), vec!["de", "en"]);
    }
}
