/*!
 * Greedy packing of sentences into size-bounded segments.
 */

/// Pack sentences into segments of fewer than `max_len` characters.
///
/// Every sentence is re-terminated with `terminator`. A sentence is appended
/// to the open segment while `chars(segment) + chars(sentence) < max_len`
/// (the bare sentence, terminator excluded); otherwise the open segment is
/// flushed and the sentence starts a new one. A single sentence that is
/// already too long becomes a segment of its own and is never truncated.
pub fn pack_segments<S: AsRef<str>>(sentences: &[S], max_len: usize, terminator: &str) -> Vec<String> {
    let terminator_len = terminator.chars().count();
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for sentence in sentences {
        let sentence = sentence.as_ref();
        let sentence_len = sentence.chars().count();

        if current_len + sentence_len < max_len {
            current.push_str(sentence);
            current.push_str(terminator);
            current_len += sentence_len + terminator_len;
        } else {
            flush(&mut segments, &mut current);
            current.push_str(sentence);
            current.push_str(terminator);
            current_len = sentence_len + terminator_len;
        }
    }

    flush(&mut segments, &mut current);
    segments
}

fn flush(segments: &mut Vec<String>, current: &mut String) {
    let segment = std::mem::take(current);
    let trimmed = segment.trim();
    if !trimmed.is_empty() {
        segments.push(trimmed.to_string());
    }
}
