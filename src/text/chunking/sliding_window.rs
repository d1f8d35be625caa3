/// Sliding window utilities over word sequences
///
/// Pure position arithmetic: no text is touched here, so the same windows
/// can be materialized from any word source.
use crate::text::chunking::error::{ChunkingError, Result};

/// Core sliding window calculation algorithm
pub struct SlidingWindowCalculator;

impl SlidingWindowCalculator {
    /// Calculate sliding window positions over `text_length` words
    ///
    /// # Arguments
    /// * `text_length` - Number of words to be windowed
    /// * `window_size` - Maximum words per window
    /// * `overlap_size` - Words shared by consecutive windows
    ///
    /// # Returns
    /// Vector of (start_pos, end_pos) tuples for each window, half-open
    pub fn calculate_sliding_windows(
        text_length: usize,
        window_size: usize,
        overlap_size: usize,
    ) -> Result<Vec<(usize, usize)>> {
        if window_size == 0 {
            return Err(ChunkingError::Configuration(
                "window size must be greater than 0".to_string(),
            ));
        }
        if overlap_size >= window_size {
            return Err(ChunkingError::Configuration(format!(
                "overlap too large: {overlap_size} words >= window size {window_size}"
            )));
        }

        // Single window case
        if text_length <= window_size {
            return Ok(vec![(0, text_length)]);
        }

        let stride = window_size - overlap_size;
        let mut positions = Vec::with_capacity(Self::expected_window_count(
            text_length,
            window_size,
            overlap_size,
        ));
        let mut start_pos = 0;

        loop {
            let end_pos = std::cmp::min(start_pos + window_size, text_length);
            positions.push((start_pos, end_pos));

            // last window may be short and has no overlap constraint
            if end_pos >= text_length {
                break;
            }

            start_pos += stride;
        }

        Ok(positions)
    }

    /// Number of windows `calculate_sliding_windows` yields for a valid configuration
    pub fn expected_window_count(text_length: usize, window_size: usize, overlap_size: usize) -> usize {
        if text_length <= window_size || overlap_size >= window_size {
            return 1;
        }
        (text_length - overlap_size).div_ceil(window_size - overlap_size)
    }
}
