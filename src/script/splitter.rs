/*!
 * Sentence splitting on sentence-final punctuation.
 */

/// Split `text` into trimmed, non-empty sentences.
///
/// The delimiters themselves are dropped. Text without any delimiter comes
/// back as a single sentence (or nothing when it is blank).
pub fn split_sentences(text: &str, delimiters: &[char]) -> Vec<String> {
    text.split(|c: char| delimiters.contains(&c))
        .map(str::trim)
        .filter(|sentence| !sentence.is_empty())
        .map(str::to_string)
        .collect()
}
