//! Recursive character splitter for resume text.
//!
//! Splits at paragraph breaks first, then line breaks, then spaces, and only
//! hard-cuts when a run of text has no separators at all. Adjacent chunks
//! share an overlap so context is not lost at the seams.

/// Target chunk size, in characters.
pub const CHUNK_SIZE: usize = 1000;
/// Overlap carried from one chunk into the next.
pub const CHUNK_OVERLAP: usize = 200;

const SEPARATORS: [&str; 3] = ["\n\n", "\n", " "];

/// Splits `text` into chunks of at most [`CHUNK_SIZE`] characters.
/// Empty and whitespace-only chunks are dropped.
pub fn split_text(text: &str) -> Vec<String> {
    split_recursive(text, &SEPARATORS)
        .into_iter()
        .map(|chunk| chunk.trim().to_string())
        .filter(|chunk| !chunk.is_empty())
        .collect()
}

fn split_recursive(text: &str, separators: &[&str]) -> Vec<String> {
    if char_len(text) <= CHUNK_SIZE {
        return vec![text.to_string()];
    }
    let Some((sep, rest)) = separators.split_first() else {
        return hard_split(text);
    };
    if !text.contains(sep) {
        return split_recursive(text, rest);
    }

    // Every piece ends up at most CHUNK_SIZE characters before merging.
    let mut pieces: Vec<String> = Vec::new();
    for part in text.split(sep) {
        if part.is_empty() {
            continue;
        }
        if char_len(part) > CHUNK_SIZE {
            pieces.extend(split_recursive(part, rest));
        } else {
            pieces.push(part.to_string());
        }
    }
    merge_pieces(&pieces, sep)
}

/// Greedily packs pieces into chunks, carrying an overlap tail across each
/// chunk boundary.
fn merge_pieces(pieces: &[String], sep: &str) -> Vec<String> {
    let sep_len = char_len(sep);
    let mut chunks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_len = 0usize;

    for piece in pieces {
        let piece_len = char_len(piece);
        let extra = if current.is_empty() {
            piece_len
        } else {
            piece_len + sep_len
        };
        if current_len + extra > CHUNK_SIZE && !current.is_empty() {
            chunks.push(current.join(sep));
            let (tail, tail_len) = overlap_tail(&current, sep_len, piece_len);
            current = tail;
            current_len = tail_len;
        }
        current_len += if current.is_empty() {
            piece_len
        } else {
            piece_len + sep_len
        };
        current.push(piece);
    }

    if !current.is_empty() {
        chunks.push(current.join(sep));
    }
    chunks
}

/// Trailing pieces of a flushed chunk that fit the overlap budget while still
/// leaving room for the incoming piece.
fn overlap_tail<'a>(
    current: &[&'a str],
    sep_len: usize,
    incoming_len: usize,
) -> (Vec<&'a str>, usize) {
    let mut tail: Vec<&'a str> = Vec::new();
    let mut tail_len = 0usize;
    for prev in current.iter().rev() {
        let extra = char_len(prev) + if tail.is_empty() { 0 } else { sep_len };
        if tail_len + extra > CHUNK_OVERLAP
            || tail_len + extra + sep_len + incoming_len > CHUNK_SIZE
        {
            break;
        }
        tail.push(prev);
        tail_len += extra;
    }
    tail.reverse();
    (tail, tail_len)
}

/// Fixed-stride cut for text with no usable separators.
fn hard_split(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let step = CHUNK_SIZE - CHUNK_OVERLAP;
    let mut chunks = Vec::new();
    let mut start = 0;
    while start < chars.len() {
        let end = (start + CHUNK_SIZE).min(chars.len());
        chunks.push(chars[start..end].iter().collect());
        if end == chars.len() {
            break;
        }
        start += step;
    }
    chunks
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_yields_no_chunks() {
        assert!(split_text("").is_empty());
        assert!(split_text("   \n\n  ").is_empty());
    }

    #[test]
    fn test_short_text_is_single_chunk() {
        let text = "Senior engineer with ten years of experience.";
        let chunks = split_text(text);
        assert_eq!(chunks, vec![text.to_string()]);
    }

    #[test]
    fn test_paragraph_boundaries_preferred() {
        let para_a = "a".repeat(600);
        let para_b = "b".repeat(600);
        let text = format!("{para_a}\n\n{para_b}");

        let chunks = split_text(&text);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0], para_a);
        assert_eq!(chunks[1], para_b);
    }

    #[test]
    fn test_line_boundaries_when_no_paragraphs() {
        let lines: Vec<String> = (0..5)
            .map(|i| char::from(b'a' + i as u8).to_string().repeat(300))
            .collect();
        let text = lines.join("\n");

        let chunks = split_text(&text);
        assert_eq!(chunks.len(), 2);
        assert!(chunks.iter().all(|c| c.chars().count() <= CHUNK_SIZE));
        // First three lines fit in one chunk, the remaining two in the next.
        assert_eq!(chunks[0], lines[..3].join("\n"));
        assert_eq!(chunks[1], lines[3..].join("\n"));
    }

    #[test]
    fn test_word_chunks_share_overlap() {
        let words: Vec<String> = (0..400).map(|i| format!("word{i:03}")).collect();
        let text = words.join(" ");

        let chunks = split_text(&text);
        assert!(chunks.len() >= 2, "expected multiple chunks");
        for chunk in &chunks {
            assert!(chunk.chars().count() <= CHUNK_SIZE);
        }
        // Each chunk begins with a trailing slice of its predecessor.
        for pair in chunks.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            let overlap_found = (50..=CHUNK_OVERLAP)
                .rev()
                .any(|k| k <= prev.len() && next.starts_with(&prev[prev.len() - k..]));
            assert!(
                overlap_found,
                "chunks do not overlap: ...{} | {}...",
                &prev[prev.len() - 50..],
                &next[..50]
            );
        }
    }

    #[test]
    fn test_hard_cut_without_separators() {
        let text: String = (0..2500)
            .map(|i| char::from_digit(i % 10, 10).unwrap())
            .collect();

        let chunks = split_text(&text);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].len(), CHUNK_SIZE);
        assert_eq!(chunks[1].len(), CHUNK_SIZE);
        assert_eq!(chunks[2].len(), 900);
        // 200-character overlap at the stride boundary
        assert_eq!(chunks[1][..CHUNK_OVERLAP], chunks[0][800..]);
    }

    #[test]
    fn test_mixed_document_respects_size() {
        let mut text = String::new();
        for i in 0..40 {
            text.push_str(&format!("Section {i}. "));
            text.push_str(&"detail word ".repeat(20));
            text.push_str("\n\n");
        }
        let chunks = split_text(&text);
        assert!(!chunks.is_empty());
        for chunk in &chunks {
            assert!(chunk.chars().count() <= CHUNK_SIZE);
        }
    }
}
