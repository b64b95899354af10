/*!
 * Chapter boundary detection from cue phrases.
 *
 * A segment opens a new chapter when one of the configured cue phrases occurs
 * in its leading window. Cues are tried in list order and the first hit wins,
 * so more specific cues ("第一部分") must come before generic ones ("首先").
 */

/// Width of the leading window, in characters, used by [`detect_chapter_start`].
pub const DEFAULT_CUE_WINDOW_CHARS: usize = 50;

/// Return the first cue found within the first 50 characters of `segment`.
pub fn detect_chapter_start<'a, S: AsRef<str>>(segment: &str, cues: &'a [S]) -> Option<&'a str> {
    find_cue(leading_window(segment, DEFAULT_CUE_WINDOW_CHARS), cues)
}

/// Prefix of `text` holding at most `chars` characters.
pub fn leading_window(text: &str, chars: usize) -> &str {
    match text.char_indices().nth(chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

fn find_cue<'a, S: AsRef<str>>(window: &str, cues: &'a [S]) -> Option<&'a str> {
    cues.iter()
        .map(AsRef::as_ref)
        .find(|cue| window.contains(*cue))
}

/// Cue-phrase detector with a configurable window.
#[derive(Debug, Clone)]
pub struct ChapterDetector {
    cues: Vec<String>,
    window_chars: usize,
}

impl ChapterDetector {
    /// Create a detector scanning the default 50-character window
    pub fn new(cues: Vec<String>) -> Self {
        Self::with_window(cues, DEFAULT_CUE_WINDOW_CHARS)
    }

    /// Create a detector scanning `window_chars` leading characters
    pub fn with_window(cues: Vec<String>, window_chars: usize) -> Self {
        Self { cues, window_chars }
    }

    /// Configured cue phrases, in priority order
    pub fn cues(&self) -> &[String] {
        &self.cues
    }

    /// Cue that opens a chapter at `segment`, if any
    pub fn detect(&self, segment: &str) -> Option<&str> {
        find_cue(leading_window(segment, self.window_chars), &self.cues)
    }
}
