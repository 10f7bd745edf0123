// Banned-word matching and word-list parsing.
//
// Matching is plain case-insensitive substring containment. "class" matches
// the stored word "ass"; there is no word-boundary logic on purpose.

/// Returns true if any entry of `words` occurs in `text`, ignoring case.
///
/// Empty entries never match. The write side refuses to store them, but an
/// empty string is a substring of everything so we skip it here too.
pub fn contains_ban_word<S: AsRef<str>>(text: &str, words: &[S]) -> bool {
    let haystack = text.to_lowercase();
    words
        .iter()
        .map(|w| w.as_ref().to_lowercase())
        .filter(|w| !w.is_empty())
        .any(|w| haystack.contains(&w))
}

/// Normalise a single word for storage: trimmed and lowercased.
/// Returns `None` for input that is empty after trimming.
pub fn normalize_word(raw: &str) -> Option<String> {
    let word = raw.trim().to_lowercase();
    if word.is_empty() {
        None
    } else {
        Some(word)
    }
}

/// Split `/addword` input on runs of commas, semicolons and whitespace.
///
/// Output is normalised and de-duplicated, keeping first-seen order.
pub fn parse_word_list(input: &str) -> Vec<String> {
    let mut words: Vec<String> = Vec::new();
    for raw in input.split(|c: char| c == ',' || c == ';' || c.is_whitespace()) {
        if let Some(word) = normalize_word(raw) {
            if !words.contains(&word) {
                words.push(word);
            }
        }
    }
    words
}
