//! Extraction and retrieval over the uploaded coding-standards text.

use std::collections::HashSet;

const CHUNK_SIZE: usize = 400;
const CHUNK_OVERLAP: usize = 50;

/// Uploaded standards are treated as UTF-8 text; undecodable bytes are
/// replaced rather than rejected.
pub fn extract_standards_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Splits the standards text into overlapping chunks, preferring line breaks
/// as cut points so individual rules stay intact.
pub fn chunk_standards(text: &str) -> Vec<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    if trimmed.len() <= CHUNK_SIZE {
        return vec![trimmed.to_string()];
    }

    let mut chunks = Vec::new();
    let mut start = 0;
    while start < trimmed.len() {
        let mut end = (start + CHUNK_SIZE).min(trimmed.len());
        while end < trimmed.len() && !trimmed.is_char_boundary(end) {
            end += 1;
        }
        if end < trimmed.len() {
            // Cut at the last newline in the window, as long as the chunk
            // stays longer than the overlap so the scan keeps advancing.
            if let Some(pos) = trimmed[start..end].rfind('\n') {
                if pos > CHUNK_OVERLAP {
                    end = start + pos;
                }
            }
        }
        let chunk = trimmed[start..end].trim();
        if !chunk.is_empty() {
            chunks.push(chunk.to_string());
        }
        if end >= trimmed.len() {
            break;
        }
        start = end.saturating_sub(CHUNK_OVERLAP);
        while start > 0 && !trimmed.is_char_boundary(start) {
            start -= 1;
        }
    }
    chunks
}

/// Ranks chunks by lexical token overlap with the code under review and
/// joins the best `top_k`, in document order, for prompting.
pub fn top_guidelines(code: &str, standards_text: &str, top_k: usize) -> String {
    let chunks = chunk_standards(standards_text);
    if chunks.is_empty() {
        return String::new();
    }

    let code_tokens: HashSet<String> = tokenize(code).collect();
    let mut ranked: Vec<(usize, usize)> = chunks
        .iter()
        .enumerate()
        .map(|(index, chunk)| {
            let overlap = tokenize(chunk)
                .filter(|token| code_tokens.contains(token))
                .collect::<HashSet<_>>()
                .len();
            (index, overlap)
        })
        .collect();
    // Stable sort keeps document order between equally relevant chunks.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(top_k);
    ranked.sort_by_key(|(index, _)| *index);

    ranked
        .iter()
        .map(|(index, _)| chunks[*index].as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|ch: char| !ch.is_alphanumeric() && ch != '_')
        .filter(|word| word.len() > 2)
        .map(|word| word.to_ascii_lowercase())
}

#[cfg(test)]
#[path = "tests/standards_tests.rs"]
mod tests;
