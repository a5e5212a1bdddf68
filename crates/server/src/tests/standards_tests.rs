use super::*;

#[test]
fn extraction_replaces_undecodable_bytes() {
    let text = extract_standards_text(b"Use snake_case\xff everywhere");
    assert!(text.starts_with("Use snake_case"));
    assert!(text.contains('\u{fffd}'));
}

#[test]
fn short_standards_stay_as_a_single_chunk() {
    let chunks = chunk_standards("Keep functions short.\nName things well.");
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0], "Keep functions short.\nName things well.");
}

#[test]
fn blank_standards_produce_no_chunks() {
    assert!(chunk_standards("   \n  ").is_empty());
}

#[test]
fn long_standards_split_into_bounded_chunks() {
    let text = (1..=40)
        .map(|n| format!("Rule {n}: every function gets a docstring and a test."))
        .collect::<Vec<_>>()
        .join("\n");
    let chunks = chunk_standards(&text);

    assert!(chunks.len() > 1, "expected a split, got {chunks:?}");
    for chunk in &chunks {
        assert!(chunk.len() <= CHUNK_SIZE, "oversized chunk: {chunk:?}");
        assert!(!chunk.is_empty());
    }
    // Nothing is lost at the tail.
    assert!(chunks.last().expect("tail chunk").contains("Rule 40"));
}

#[test]
fn top_guidelines_prefers_chunks_sharing_tokens_with_the_code() {
    let naming = (1..=12)
        .map(|n| format!("Naming rule {n}: snake_case for functions and variables."))
        .collect::<Vec<_>>()
        .join("\n");
    let indentation = (1..=12)
        .map(|n| format!("Indentation rule {n}: use four spaces, never tabs."))
        .collect::<Vec<_>>()
        .join("\n");
    let standards_text = format!("{naming}\n{indentation}");

    let picked = top_guidelines("# style: snake_case functions variables", &standards_text, 1);
    assert!(picked.contains("snake_case"), "picked: {picked}");
    assert!(!picked.contains("four spaces"), "picked: {picked}");
}

#[test]
fn top_guidelines_on_empty_standards_is_empty() {
    assert_eq!(top_guidelines("code", "", 3), "");
}
