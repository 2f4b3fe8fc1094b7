/// Splits raw text into sentences. Terminal punctuation followed by
/// whitespace (or end of input) closes a sentence; a trailing fragment
/// without terminal punctuation still counts as one. Whitespace-only input
/// yields nothing; the caller decides whether that is a failure.
pub fn segment_text(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        current.push(ch);
        if matches!(ch, '.' | '!' | '?') {
            let boundary = chars.peek().map_or(true, |next| next.is_whitespace());
            if boundary {
                flush_sentence(&mut sentences, &mut current);
            }
        }
    }
    flush_sentence(&mut sentences, &mut current);

    sentences
}

fn flush_sentence(sentences: &mut Vec<String>, current: &mut String) {
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
    current.clear();
}

/// Covers `[0, duration)` with contiguous, non-overlapping windows. Every
/// window except the last spans exactly `window_seconds`; the last is
/// clipped to `duration`.
pub fn segment_audio(duration: f64, window_seconds: f64) -> Vec<(f64, f64)> {
    if duration <= 0.0 || window_seconds <= 0.0 {
        return Vec::new();
    }

    let mut windows = Vec::new();
    let mut start = 0.0;
    while start < duration {
        let end = (start + window_seconds).min(duration);
        windows.push((start, end));
        start = end;
    }
    windows
}
