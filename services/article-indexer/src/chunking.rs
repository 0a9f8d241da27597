//! Splits an article's body into overlapping, word-count-sized chunks.
//!
//! Short articles are left whole: the vector index holds one document per
//! article until its body crosses `threshold_words`. Past that point the
//! chunker slices the body into windows of roughly `chunk_size_words`,
//! overlapping by `overlap_words` so a passage near a cut isn't orphaned
//! from its neighbors, and tries to land each cut on a paragraph boundary
//! rather than mid-sentence.

use archive_config::ChunkingConfig;
use archive_core::Chunk;

/// How far past a default cut point to search for a `section_markers` hit
/// before giving up and cutting on the plain word boundary instead.
const BOUNDARY_SEARCH_WINDOW_WORDS: usize = 20;

/// How many times the title is repeated ahead of the body when preparing
/// the first chunk's embedding input, per `title_weighted_text`.
pub const TITLE_WEIGHT_MULTIPLIER: usize = 5;

/// Number of whitespace-delimited words in `text`.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Byte `(start, end)` span of every whitespace-delimited word in `text`, in order.
fn word_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut word_start: Option<usize> = None;

    for (idx, ch) in text.char_indices() {
        if ch.is_whitespace() {
            if let Some(start) = word_start.take() {
                spans.push((start, idx));
            }
        } else if word_start.is_none() {
            word_start = Some(idx);
        }
    }
    if let Some(start) = word_start {
        spans.push((start, text.len()));
    }

    spans
}

/// True if `text[..pos]` ends with one of `markers`, tried longest first so
/// a blank-line boundary (`"\n\n"`) outranks a bare newline.
fn ends_with_marker(text: &str, pos: usize, markers: &[String]) -> bool {
    let mut sorted: Vec<&String> = markers.iter().collect();
    sorted.sort_by_key(|m| std::cmp::Reverse(m.len()));
    sorted.iter().any(|marker| text[..pos].ends_with(marker.as_str()))
}

/// Looks for a word boundary carrying a section marker within
/// `BOUNDARY_SEARCH_WINDOW_WORDS` words of `default_end`, preferring the
/// candidate closest to it. Falls back to `default_end` itself (still a
/// valid word boundary) when none is found.
fn snap_to_boundary(word_spans: &[(usize, usize)], text: &str, default_end: usize, markers: &[String]) -> usize {
    if markers.is_empty() {
        return default_end;
    }

    let lo = default_end.saturating_sub(BOUNDARY_SEARCH_WINDOW_WORDS);
    let hi = (default_end + BOUNDARY_SEARCH_WINDOW_WORDS).min(word_spans.len());

    let mut best: Option<(usize, usize)> = None; // (distance, word_index)
    for word_idx in lo..=hi {
        if word_idx == 0 || word_idx >= word_spans.len() {
            continue;
        }
        let char_pos = word_spans[word_idx].0;
        if ends_with_marker(text, char_pos, markers) {
            let distance = default_end.abs_diff(word_idx);
            if best.map_or(true, |(best_dist, _)| distance < best_dist) {
                best = Some((distance, word_idx));
            }
        }
    }

    best.map(|(_, word_idx)| word_idx).unwrap_or(default_end)
}

/// Splits `body` into chunks for `article_id` per `config`. Returns an empty
/// vector when `word_count(body) <= config.threshold_words`: the caller
/// indexes the whole article as a single vector document in that case.
pub fn chunk_article(article_id: i64, body: &str, config: &ChunkingConfig) -> Vec<Chunk> {
    let spans = word_spans(body);
    if spans.len() <= config.threshold_words {
        return Vec::new();
    }

    let step = config.chunk_size_words.saturating_sub(config.overlap_words).max(1);
    let mut chunks = Vec::new();
    let mut start_word = 0usize;
    let mut chunk_index = 0usize;

    loop {
        let default_end = (start_word + config.chunk_size_words).min(spans.len());
        let end_word = if default_end >= spans.len() {
            spans.len()
        } else {
            snap_to_boundary(&spans, body, default_end, &config.section_markers).max(start_word + 1)
        };

        let start_char = spans[start_word].0;
        let end_char = spans[end_word - 1].1;
        let content = body[start_char..end_char].to_string();
        let chunk_word_count = end_word - start_word;

        chunks.push(Chunk {
            article_id,
            chunk_index,
            content,
            word_count: chunk_word_count,
            start_char,
        });

        if end_word >= spans.len() {
            break;
        }

        chunk_index += 1;
        let next_start = end_word.saturating_sub(config.overlap_words);
        start_word = if next_start > start_word { next_start } else { start_word + step };
    }

    chunks
}

/// Text to embed for one chunk. Only `chunk_index == 0` gets the title
/// folded in, and it's repeated `TITLE_WEIGHT_MULTIPLIER` times ahead of the
/// content so short titles still move the embedding meaningfully.
pub fn title_weighted_text(title: &str, chunk_index: usize, content: &str) -> String {
    if chunk_index != 0 || title.is_empty() {
        return content.to_string();
    }

    let mut text = title.repeat(TITLE_WEIGHT_MULTIPLIER);
    text.push(' ');
    text.push_str(content);
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(threshold: usize, size: usize, overlap: usize) -> ChunkingConfig {
        ChunkingConfig {
            threshold_words: threshold,
            chunk_size_words: size,
            overlap_words: overlap,
            section_markers: vec!["\n\n".to_string(), "\n".to_string()],
        }
    }

    fn words(n: usize) -> String {
        (0..n).map(|i| format!("word{i}")).collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn article_at_exactly_threshold_is_not_chunked() {
        let body = words(10);
        let cfg = config(10, 4, 1);
        assert!(chunk_article(1, &body, &cfg).is_empty());
    }

    #[test]
    fn article_one_word_over_threshold_produces_at_least_two_chunks() {
        let body = words(11);
        let cfg = config(10, 4, 1);
        let chunks = chunk_article(1, &body, &cfg);
        assert!(chunks.len() >= 2, "expected at least 2 chunks, got {}", chunks.len());
    }

    #[test]
    fn chunk_indices_are_contiguous_and_zero_based() {
        let body = words(50);
        let cfg = config(10, 8, 2);
        let chunks = chunk_article(1, &body, &cfg);
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.chunk_index, i);
        }
    }

    #[test]
    fn chunks_never_cut_a_word() {
        let body = words(60);
        let cfg = config(10, 8, 2);
        for chunk in chunk_article(1, &body, &cfg) {
            for token in chunk.content.split_whitespace() {
                assert!(token.starts_with("word"), "chunk contained a partial token: {token:?}");
            }
        }
    }

    #[test]
    fn start_char_is_a_byte_offset_into_the_original_body() {
        let body = words(40);
        let cfg = config(10, 8, 2);
        let chunks = chunk_article(1, &body, &cfg);
        for chunk in &chunks {
            assert_eq!(&body[chunk.start_char..chunk.start_char + chunk.content.len()], chunk.content);
        }
    }

    #[test]
    fn overlap_repeats_words_between_successive_chunks() {
        let body = words(40);
        let cfg = config(10, 10, 3);
        let chunks = chunk_article(1, &body, &cfg);
        assert!(chunks.len() >= 2);
        let first_words: Vec<&str> = chunks[0].content.split_whitespace().collect();
        let second_words: Vec<&str> = chunks[1].content.split_whitespace().collect();
        let overlap: Vec<&&str> = first_words.iter().rev().take(3).collect();
        assert!(second_words.iter().take(3).rev().eq(overlap.into_iter().rev()));
    }

    #[test]
    fn prefers_a_paragraph_boundary_near_the_default_cut() {
        let mut body = words(18);
        body.push_str("\n\n");
        body.push_str(&words(18));
        let cfg = config(5, 18, 2);
        let chunks = chunk_article(1, &body, &cfg);
        assert!(chunks[0].content.trim_end().ends_with("word17"));
    }

    #[test]
    fn falls_back_to_word_boundary_when_no_marker_is_near() {
        let body = words(100);
        let cfg = config(5, 20, 4);
        let chunks = chunk_article(1, &body, &cfg);
        assert!(!chunks.is_empty());
        assert_eq!(chunks[0].word_count, 20);
    }

    #[test]
    fn last_chunk_reaches_the_end_of_the_body() {
        let body = words(37);
        let cfg = config(10, 9, 2);
        let chunks = chunk_article(1, &body, &cfg);
        let last = chunks.last().unwrap();
        assert!(body.ends_with(&last.content[last.content.len().saturating_sub(6)..]));
    }

    #[test]
    fn title_weighting_only_applies_to_the_first_chunk() {
        let text0 = title_weighted_text("Title", 0, "body text");
        let text1 = title_weighted_text("Title", 1, "body text");
        assert_eq!(text0.matches("Title").count(), TITLE_WEIGHT_MULTIPLIER);
        assert_eq!(text1, "body text");
    }

    #[test]
    fn empty_title_is_not_woven_in() {
        assert_eq!(title_weighted_text("", 0, "body text"), "body text");
    }

    #[test]
    fn word_count_counts_whitespace_delimited_tokens() {
        assert_eq!(word_count("one two  three\nfour"), 4);
        assert_eq!(word_count(""), 0);
    }
}
