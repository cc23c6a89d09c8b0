use kiosk_core::Chunk;

/// Character budget per chunk. Word boundaries are respected, so actual
/// chunks run slightly under budget unless a single word exceeds it.
pub const MAX_CHUNK_CHARS: usize = 1000;

/// Splits an extraction text into an ordered sequence of chunks, each within
/// the character budget, together covering the whole input. Deterministic:
/// the chunk count drives identity assignment, so the same text must always
/// produce the same sequence.
pub fn chunk_text(text: &str) -> Vec<String> {
    chunk_text_with_budget(text, MAX_CHUNK_CHARS)
}

/// Chunks a document's extraction text, tagging each chunk with its source
/// URL and zero-based position.
pub fn chunk_document(source_url: &str, text: &str) -> Vec<Chunk> {
    chunk_text(text)
        .into_iter()
        .enumerate()
        .map(|(index, text)| Chunk {
            source_url: source_url.to_string(),
            index,
            text,
        })
        .collect()
}

pub fn chunk_text_with_budget(text: &str, budget: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if word.len() > budget {
            // A single oversized token is hard-split so no chunk exceeds
            // the budget and no input is dropped.
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
            }
            let mut rest = word;
            while rest.len() > budget {
                let split = floor_char_boundary(rest, budget);
                chunks.push(rest[..split].to_string());
                rest = &rest[split..];
            }
            current.push_str(rest);
            continue;
        }

        let needed = if current.is_empty() {
            word.len()
        } else {
            current.len() + 1 + word.len()
        };
        if needed > budget && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

fn floor_char_boundary(s: &str, index: usize) -> usize {
    let mut i = index.min(s.len());
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    if i == 0 {
        // Budget smaller than the first char: take the whole char so the
        // split always makes progress.
        s.chars().next().map(char::len_utf8).unwrap_or(0)
    } else {
        i
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_yields_no_chunks() {
        assert!(chunk_text("").is_empty());
        assert!(chunk_text("   ").is_empty());
    }

    #[test]
    fn test_short_input_is_one_chunk() {
        let chunks = chunk_text("just a short sentence");
        assert_eq!(chunks, vec!["just a short sentence".to_string()]);
    }

    #[test]
    fn test_chunks_respect_budget() {
        let text = "word ".repeat(500);
        for chunk in chunk_text_with_budget(&text, 64) {
            assert!(chunk.len() <= 64);
        }
    }

    #[test]
    fn test_coverage_no_word_lost() {
        let text = (0..300).map(|i| format!("w{}", i)).collect::<Vec<_>>().join(" ");
        let chunks = chunk_text_with_budget(&text, 50);
        let rejoined = chunks.join(" ");
        assert_eq!(rejoined, text);
    }

    #[test]
    fn test_deterministic_count() {
        let text = "alpha beta gamma ".repeat(200);
        let first = chunk_text(&text);
        let second = chunk_text(&text);
        assert_eq!(first, second);
    }

    #[test]
    fn test_oversized_word_is_hard_split() {
        let word = "x".repeat(150);
        let chunks = chunk_text_with_budget(&word, 64);
        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| c.len() <= 64));
        assert_eq!(chunks.concat(), word);
    }

    #[test]
    fn test_chunk_document_indices_are_zero_based_and_ordered() {
        let text = "word ".repeat(300);
        let chunks = chunk_document("https://example.com/a", &text);
        assert!(chunks.len() > 1);
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.index, i);
            assert_eq!(chunk.source_url, "https://example.com/a");
        }
    }

    #[test]
    fn test_multibyte_split_stays_on_char_boundary() {
        let word = "é".repeat(100);
        for chunk in chunk_text_with_budget(&word, 33) {
            assert!(chunk.len() <= 33);
            assert!(!chunk.is_empty());
        }
    }
}
