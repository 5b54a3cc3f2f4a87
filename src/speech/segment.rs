//! Split long document text into pieces the synthesizer can handle
//!
//! VITS models degrade on very long inputs, so text is cut at sentence
//! boundaries and the pieces are synthesized one after another.

/// Characters that end a sentence for segmentation purposes
const SENTENCE_ENDINGS: &[char] = &['.', '!', '?', ';', ':', '\n'];

/// Split `text` into segments of at most `max_bytes` bytes
///
/// Whole sentences are kept together where they fit, and overlong sentences
/// are split between words. A segment only exceeds `max_bytes` when a single
/// word does. Whitespace runs collapse to a single space.
pub fn split_for_synthesis(text: &str, max_bytes: usize) -> Vec<String> {
    let max_bytes = max_bytes.max(1);
    let mut segments = Vec::new();
    let mut current = String::new();

    for sentence in sentences(text) {
        if sentence.len() > max_bytes {
            for word in sentence.split_whitespace() {
                push_piece(&mut segments, &mut current, word, max_bytes);
            }
        } else {
            push_piece(&mut segments, &mut current, &sentence, max_bytes);
        }
    }

    if !current.is_empty() {
        segments.push(current);
    }

    segments
}

/// Append `piece` to `current`, flushing first if it would not fit
fn push_piece(segments: &mut Vec<String>, current: &mut String, piece: &str, max_bytes: usize) {
    if !current.is_empty() && current.len() + 1 + piece.len() > max_bytes {
        segments.push(std::mem::take(current));
    }
    if !current.is_empty() {
        current.push(' ');
    }
    current.push_str(piece);
}

/// Sentences with internal whitespace normalized, empty ones dropped
fn sentences(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_inclusive(SENTENCE_ENDINGS)
        .map(|s| s.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|s| !s.is_empty())
}
