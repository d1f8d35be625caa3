//! Core data structures for word-window chunking

/// A contiguous run of source words, materialized back into a string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChunk {
    /// Words joined by single spaces
    pub content: String,
    /// Index of the first word in the source sequence
    pub word_start: usize,
    /// Index one past the last word in the source sequence
    pub word_end: usize,
    /// Index of this chunk in the sequence
    pub chunk_index: usize,
}

impl TextChunk {
    pub fn new(content: String, word_start: usize, word_end: usize, chunk_index: usize) -> Self {
        Self {
            content,
            word_start,
            word_end,
            chunk_index,
        }
    }

    /// Number of words in the chunk
    pub fn word_count(&self) -> usize {
        self.word_end - self.word_start
    }

    pub fn is_empty(&self) -> bool {
        self.word_start == self.word_end
    }

    /// Word position range as a tuple
    pub fn word_range(&self) -> (usize, usize) {
        (self.word_start, self.word_end)
    }

    /// 1-based position, as presented to the model
    pub fn number(&self) -> usize {
        self.chunk_index + 1
    }
}

/// Where a chunk sits in the book, used to frame its summary request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkPosition {
    First,
    Last,
    Middle { number: usize, total: usize },
}

impl ChunkPosition {
    /// `number` is 1-based. The first chunk wins when there is only one.
    pub fn of(number: usize, total: usize) -> Self {
        if number <= 1 {
            ChunkPosition::First
        } else if number == total {
            ChunkPosition::Last
        } else {
            ChunkPosition::Middle { number, total }
        }
    }

    pub fn description(&self) -> String {
        match self {
            ChunkPosition::First => "This is the beginning of the book.".to_string(),
            ChunkPosition::Last => "This is the end of the book.".to_string(),
            ChunkPosition::Middle { number, total } => {
                format!("This is part {number} of {total} of the book.")
            }
        }
    }
}

impl std::fmt::Display for ChunkPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}
