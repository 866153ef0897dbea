//! Paragraph-first text chunker.
//!
//! Splits document text into segments no longer than a configured size,
//! preferring paragraph boundaries and falling back to sentence boundaries
//! for paragraphs that are too long on their own. Lengths are measured in
//! characters, not bytes, so CJK text budgets the same as Latin text.
//!
//! Splitting is deterministic: the same text and configuration always
//! produce byte-identical segments, which keeps re-indexing reproducible.

/// Sentence-ending punctuation, CJK and Latin.
const SENTENCE_TERMINATORS: [char; 6] = ['。', '！', '？', '.', '!', '?'];

/// Splits text into bounded-length segments.
///
/// The algorithm is greedy: consecutive paragraphs are packed into a
/// segment while the running character count stays within `chunk_size`.
/// A paragraph that alone exceeds `chunk_size` is split after sentence
/// terminators and its sentences are packed the same way. A sentence that
/// alone exceeds `chunk_size` becomes its own oversized segment - content
/// is never truncated.
#[derive(Debug, Clone)]
pub struct TextChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl TextChunker {
    /// Create a chunker with the given segment size and overlap, both in
    /// characters.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size,
            chunk_overlap,
        }
    }

    /// Maximum characters per segment.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Configured overlap between consecutive segments.
    ///
    /// Accepted for configuration symmetry; the current algorithm does not
    /// duplicate trailing content between segments, so existing chunk
    /// boundaries stay stable.
    pub fn chunk_overlap(&self) -> usize {
        self.chunk_overlap
    }

    /// Split `text` into segments.
    ///
    /// Empty or whitespace-only input yields no segments. If the splitting
    /// rules produce nothing for non-empty input, the trimmed input is
    /// returned as a single segment.
    pub fn chunk(&self, text: &str) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut current = String::new();
        let mut current_len = 0usize;

        for paragraph in split_paragraphs(text) {
            let paragraph = paragraph.trim();
            if paragraph.is_empty() {
                continue;
            }
            let paragraph_len = paragraph.chars().count();

            if current_len + paragraph_len <= self.chunk_size {
                if current.is_empty() {
                    current.push_str(paragraph);
                    current_len = paragraph_len;
                } else {
                    current.push_str("\n\n");
                    current.push_str(paragraph);
                    current_len += 2 + paragraph_len;
                }
                continue;
            }

            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }

            if paragraph_len > self.chunk_size {
                for sentence in split_sentences(paragraph) {
                    let sentence_len = sentence.chars().count();
                    if current_len + sentence_len <= self.chunk_size {
                        current.push_str(&sentence);
                        current_len += sentence_len;
                    } else {
                        if !current.is_empty() {
                            chunks.push(std::mem::take(&mut current));
                        }
                        current = sentence;
                        current_len = sentence_len;
                    }
                }
            } else {
                current.push_str(paragraph);
                current_len = paragraph_len;
            }
        }

        if !current.is_empty() {
            chunks.push(current);
        }

        // Pathological input: fall back to the whole trimmed text.
        if chunks.is_empty() && !text.trim().is_empty() {
            chunks.push(text.trim().to_string());
        }

        chunks
    }
}

/// Split text on blank-line boundaries. A line containing only whitespace
/// separates paragraphs; single newlines stay inside their paragraph.
fn split_paragraphs(text: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current = String::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(std::mem::take(&mut current));
            }
        } else {
            if !current.is_empty() {
                current.push('\n');
            }
            current.push_str(line);
        }
    }
    if !current.is_empty() {
        paragraphs.push(current);
    }

    paragraphs
}

/// Split after sentence terminators, consuming the whitespace that follows
/// each one. Trailing text without a terminator becomes the last sentence.
fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);
        if SENTENCE_TERMINATORS.contains(&c) {
            while chars.peek().is_some_and(|n| n.is_whitespace()) {
                chars.next();
            }
            sentences.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        sentences.push(current);
    }

    sentences
}
