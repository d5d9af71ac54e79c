// Word-level fuzzy matching: the optional second pass.
//
// When no pattern occurs verbatim in a label, a pattern can still match if
// most of its words appear in the label with at most one edit each. This
// catches typos like "UNION EUROPA" but is loose on short words ("Y" is one
// edit away from any single letter), which is why it's off by default.

use strsim::levenshtein;

/// Maximum edit distance (exclusive) for two words to count as the same.
const MAX_WORD_DISTANCE: usize = 2;

/// Minimum share of pattern words that must be present, as a ratio of 10.
const MIN_WORD_SHARE_TENTHS: usize = 7;

/// How many of a pattern's `word_count` words must be present to match:
/// ceil(0.7 * word_count).
pub fn required_words(word_count: usize) -> usize {
    (word_count * MIN_WORD_SHARE_TENTHS).div_ceil(10)
}

/// Check whether a normalized pattern fuzzily matches a set of label words.
pub fn pattern_matches(label_words: &[&str], pattern: &str) -> bool {
    let pattern_words: Vec<&str> = pattern.split_whitespace().collect();
    if pattern_words.is_empty() {
        return false;
    }

    let present = pattern_words
        .iter()
        .filter(|p| {
            label_words
                .iter()
                .any(|w| levenshtein(w, p) < MAX_WORD_DISTANCE)
        })
        .count();

    present >= required_words(pattern_words.len())
}
