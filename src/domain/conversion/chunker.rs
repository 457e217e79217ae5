/// Maximum characters sent to the synthesis service in one call. The
/// service rejects or degrades on very large inputs.
pub const DEFAULT_CHUNK_SIZE: usize = 4000;

/// Split `text` into consecutive chunks of at most `chunk_size` characters.
///
/// Chunks are produced in original order and partition the text exactly:
/// concatenating them reproduces the input, every chunk except the last is
/// exactly `chunk_size` characters, and the count is
/// `ceil(chars / chunk_size)`. Splitting is character-based so Persian or
/// Chinese input is never cut inside a code point.
pub fn split_into_chunks(text: &str, chunk_size: usize) -> Vec<String> {
    assert!(chunk_size > 0, "chunk_size must be positive");

    if text.is_empty() {
        return Vec::new();
    }

    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(chunk_size)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_text_is_a_single_chunk() {
        let chunks = split_into_chunks("Hello world", 4000);
        assert_eq!(chunks, vec!["Hello world".to_string()]);
    }

    #[test]
    fn test_chunks_partition_the_text_exactly() {
        let text = "The quick brown fox jumps over the lazy dog. ".repeat(300);
        let chunks = split_into_chunks(&text, 1000);

        assert_eq!(chunks.concat(), text);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 1000);
        }
    }

    #[test]
    fn test_chunk_count_is_ceil_of_length_over_size() {
        let text = "a".repeat(9000);
        let chunks = split_into_chunks(&text, 4000);

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].chars().count(), 4000);
        assert_eq!(chunks[1].chars().count(), 4000);
        assert_eq!(chunks[2].chars().count(), 1000);
    }

    #[test]
    fn test_exactly_chunk_size_is_one_chunk() {
        let text = "a".repeat(4000);
        assert_eq!(split_into_chunks(&text, 4000).len(), 1);
    }

    #[test]
    fn test_one_over_chunk_size_is_two_chunks() {
        let text = "a".repeat(4001);
        let chunks = split_into_chunks(&text, 4000);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[1], "a");
    }

    #[test]
    fn test_multibyte_text_splits_on_character_boundaries() {
        // Persian and Chinese characters are multi-byte in UTF-8; the
        // splitter must count characters, not bytes.
        let text = "سلام دنیا 你好世界".repeat(100);
        let chunks = split_into_chunks(&text, 7);

        assert_eq!(chunks.concat(), text);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 7);
        }
        let total_chars = text.chars().count();
        assert_eq!(chunks.len(), total_chars.div_ceil(7));
    }

    #[test]
    fn test_empty_text_yields_no_chunks() {
        assert!(split_into_chunks("", 4000).is_empty());
    }
}
