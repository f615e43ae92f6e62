mod automaton;
mod correction;
mod mapper;
mod transliterate;
mod trie;

pub use automaton::{Automaton, State};
pub use correction::{Correction, Summary};
pub use mapper::{QueryMapper, DEFAULT_MAX_LOOKAHEAD};
pub use transliterate::{transliterate, transliterate_char};
pub use trie::{Node, NodeId, Trie, Tries, ROOT};

/// Correct a query against the dictionary of the given language and return
/// the corrected segments in query order. `allowed_distances` are the word
/// length thresholds that raise the edit budget by one each.
pub fn correct(
    tries: &Tries,
    query: &str,
    language: &str,
    allowed_distances: &[usize],
    max_lookahead: usize,
) -> Vec<Correction> {
    QueryMapper::new(tries, language, allowed_distances).map(query, max_lookahead)
}
