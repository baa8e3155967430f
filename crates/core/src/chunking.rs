pub const DEFAULT_CHUNK_SIZE: usize = 4_000;

/// Splits `text` into whitespace-delimited word chunks.
///
/// Words are accumulated until the running size (word bytes plus one
/// separator each) reaches `chunk_size`, at which point the chunk is closed.
/// The bound is approximate: the word that crosses the threshold stays in
/// the chunk it crossed.
pub fn chunk_text(text: &str, chunk_size: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_size = 0usize;

    for word in text.split_whitespace() {
        current.push(word);
        current_size += word.len() + 1;

        if current_size >= chunk_size {
            chunks.push(current.join(" "));
            current.clear();
            current_size = 0;
        }
    }

    if !current.is_empty() {
        chunks.push(current.join(" "));
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_one_chunk() {
        let chunks = chunk_text("one two three", 1_000);
        assert_eq!(chunks, vec!["one two three".to_string()]);
    }

    #[test]
    fn blank_text_has_no_chunks() {
        assert!(chunk_text("", DEFAULT_CHUNK_SIZE).is_empty());
        assert!(chunk_text(" \n\t  ", DEFAULT_CHUNK_SIZE).is_empty());
    }

    #[test]
    fn chunks_partition_the_word_sequence() {
        let text = "Lorem  ipsum\tdolor sit\namet, consectetur adipiscing elit sed do eiusmod \
                    tempor incididunt ut labore et dolore magna aliqua";
        let chunks = chunk_text(text, 16);

        assert!(chunks.len() > 1);
        let rejoined = chunks.join(" ");
        let original = text.split_whitespace().collect::<Vec<_>>().join(" ");
        assert_eq!(rejoined, original);
    }

    #[test]
    fn chunks_partition_varied_inputs() {
        let oversized = "y".repeat(100);
        let cases: Vec<(String, usize)> = vec![
            ("Größe über naïve café 日本語 テキスト ü".to_string(), 8),
            (oversized.clone(), 10),
            (format!("a {oversized} b"), 4),
            ("one two three four five".to_string(), 1),
            // "abc " counts 4 and "defg " counts 5, landing on both thresholds.
            ("abc defg hi".to_string(), 4),
            ("abc defg hi".to_string(), 9),
            ("\n\t lone \r\n".to_string(), DEFAULT_CHUNK_SIZE),
        ];

        for (text, threshold) in cases {
            let chunks = chunk_text(&text, threshold);
            let original = text.split_whitespace().collect::<Vec<_>>();
            let rejoined = chunks
                .iter()
                .flat_map(|chunk| chunk.split(' '))
                .collect::<Vec<_>>();

            assert_eq!(rejoined, original, "threshold {threshold} for {text:?}");
            assert!(chunks.iter().all(|chunk| !chunk.is_empty()));
        }
    }

    #[test]
    fn threshold_of_one_puts_each_word_in_its_own_chunk() {
        let chunks = chunk_text("one two three", 1);
        assert_eq!(chunks, vec!["one", "two", "three"]);
    }

    #[test]
    fn multibyte_words_count_bytes_not_chars() {
        // "日本" is 6 bytes, so with the separator it reaches 7 on its own.
        let chunks = chunk_text("日本 語", 7);
        assert_eq!(chunks, vec!["日本", "語"]);
    }

    #[test]
    fn exact_threshold_boundary_closes_chunk() {
        // "abc " counts 4, "defg " brings it to 9.
        assert_eq!(chunk_text("abc defg hi", 9), vec!["abc defg", "hi"]);
        assert_eq!(chunk_text("abc defg hi", 10), vec!["abc defg hi"]);
    }

    #[test]
    fn threshold_closes_chunk_once_reached() {
        // "aaaa " counts 5, so two words reach a threshold of 10.
        let chunks = chunk_text("aaaa bbbb cccc dddd e", 10);
        assert_eq!(chunks, vec!["aaaa bbbb", "cccc dddd", "e"]);
    }

    #[test]
    fn oversized_word_overshoots_threshold() {
        let long_word = "x".repeat(50);
        let text = format!("ab {long_word} cd");
        let chunks = chunk_text(&text, 10);

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0], format!("ab {long_word}"));
        assert_eq!(chunks[1], "cd");
    }
}
