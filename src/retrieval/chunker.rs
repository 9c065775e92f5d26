//! 文本分块
//!
//! 按空白切词后以固定大小的滑动窗口切块，相邻窗口重叠overlap个词。
//! overlap >= chunk_size会导致窗口无法前进，必须在分块开始前拒绝。

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ChunkError {
    #[error("分块重叠数({overlap})必须小于分块大小({chunk_size})")]
    InvalidConfiguration { chunk_size: usize, overlap: usize },
}

/// 将文本切分为带重叠的词窗口序列
pub fn chunk_text(text: &str, chunk_size: usize, overlap: usize) -> Result<Vec<String>, ChunkError> {
    if overlap >= chunk_size {
        return Err(ChunkError::InvalidConfiguration {
            chunk_size,
            overlap,
        });
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    let mut chunks = Vec::new();
    let step = chunk_size - overlap;
    let mut start = 0;

    while start < words.len() {
        let end = (start + chunk_size).min(words.len());
        chunks.push(words[start..end].join(" "));
        start += step;
    }

    Ok(chunks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_words(count: usize) -> String {
        (0..count)
            .map(|i| format!("w{}", i))
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_empty_text_yields_no_chunks() {
        assert_eq!(chunk_text("", 800, 100).unwrap(), Vec::<String>::new());
    }

    #[test]
    fn test_short_text_yields_single_chunk() {
        let text = sample_words(5);
        let chunks = chunk_text(&text, 800, 100).unwrap();
        assert_eq!(chunks, vec![text]);
    }

    #[test]
    fn test_windows_cover_all_words_with_exact_overlap() {
        let text = sample_words(25);
        let chunks = chunk_text(&text, 10, 3).unwrap();

        // 窗口起点 0, 7, 14, 21
        assert_eq!(chunks.len(), 4);

        // 每个词都被覆盖
        let mut covered: Vec<&str> = chunks.iter().flat_map(|c| c.split_whitespace()).collect();
        covered.sort();
        covered.dedup();
        assert_eq!(covered.len(), 25);

        // 相邻窗口重叠恰好3个词（末对窗口允许更少）
        for pair in chunks.windows(2).take(chunks.len() - 2) {
            let left: Vec<&str> = pair[0].split_whitespace().collect();
            let right: Vec<&str> = pair[1].split_whitespace().collect();
            let shared = left.iter().filter(|w| right.contains(w)).count();
            assert_eq!(shared, 3);
        }
    }

    #[test]
    fn test_overlap_equal_to_size_is_rejected() {
        let err = chunk_text("a b c", 100, 100).unwrap_err();
        assert_eq!(
            err,
            ChunkError::InvalidConfiguration {
                chunk_size: 100,
                overlap: 100
            }
        );
    }

    #[test]
    fn test_overlap_larger_than_size_is_rejected() {
        assert!(chunk_text("a b c", 100, 150).is_err());
    }

    #[test]
    fn test_zero_chunk_size_is_rejected() {
        assert!(chunk_text("a b c", 0, 0).is_err());
    }
}
