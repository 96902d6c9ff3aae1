use once_cell::sync::Lazy;
use regex::Regex;

/// Default upper bound for a single spoken chunk, in characters
pub const DEFAULT_MAX_CHUNK_CHARS: usize = 250;

/// A terminator followed by whitespace; the terminator stays with the sentence
static SENTENCE_BOUNDARY: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]\s+").unwrap());

/// Split normalized text into speakable chunks of at most `max_chunk_chars`
/// characters.
///
/// Sentences are packed greedily; a sentence joins the current chunk only while
/// `len(current) + len(sentence) + 1 < max_chunk_chars`. Chunks that are still
/// too long after packing are re-split at word boundaries with the same rule.
/// A single word longer than the limit is emitted whole.
pub fn split_into_chunks(text: &str, max_chunk_chars: usize) -> Vec<String> {
    let packed = pack(split_sentences(text), max_chunk_chars);

    let mut chunks = Vec::with_capacity(packed.len());
    for chunk in packed {
        if char_len(&chunk) > max_chunk_chars {
            chunks.extend(pack(chunk.split_whitespace(), max_chunk_chars));
        } else {
            chunks.push(chunk);
        }
    }

    chunks
}

/// Sentence candidates, trimmed, with blank candidates dropped
fn split_sentences(text: &str) -> impl Iterator<Item = &str> {
    let mut pieces = Vec::new();
    let mut last_end = 0;

    for boundary in SENTENCE_BOUNDARY.find_iter(text) {
        // terminators are ASCII, so start + 1 is a char boundary
        pieces.push(&text[last_end..boundary.start() + 1]);
        last_end = boundary.end();
    }
    pieces.push(&text[last_end..]);

    pieces
        .into_iter()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
}

/// Greedy packing shared by the sentence and word passes
fn pack<'a>(pieces: impl Iterator<Item = &'a str>, max_chunk_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for piece in pieces {
        let piece_len = char_len(piece);

        if current_len + piece_len + 1 < max_chunk_chars {
            if !current.is_empty() {
                current.push(' ');
                current_len += 1;
            }
            current.push_str(piece);
            current_len += piece_len;
        } else {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
            }
            current.push_str(piece);
            current_len = piece_len;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}
