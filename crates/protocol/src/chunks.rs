//! Chunk arithmetic.
//!
//! All values here are derived from `(file_size, CHUNK_SIZE)` on demand.

/// Fixed chunk size: 10 KiB.
///
/// The server reassembles on this boundary, so it is a protocol constant
/// rather than a per-request parameter.
pub const CHUNK_SIZE: u64 = 10 * 1024;

/// Number of chunks a file of `file_size` bytes is split into.
///
/// A zero-byte file has zero chunks; the upload flow still issues one
/// zero-length request for it (see [`is_final_chunk`]).
pub fn total_chunks(file_size: u64) -> u64 {
    file_size.div_ceil(CHUNK_SIZE)
}

/// Byte range `[from, to)` covered by chunk `index` of a file.
///
/// The end is clamped to `file_size`, so the last chunk may be short and
/// the empty-file convention chunk spans `(0, 0)`.
pub fn chunk_span(file_size: u64, index: u64) -> (u64, u64) {
    let from = (index * CHUNK_SIZE).min(file_size);
    let to = (from + CHUNK_SIZE).min(file_size);
    (from, to)
}

/// Whether acknowledging chunk `index` completes the file.
///
/// True for `index == total_chunks - 1`, and for index 0 of a zero-byte
/// file (whose single request carries `totalChunks == 0`).
pub fn is_final_chunk(file_size: u64, index: u64) -> bool {
    let total = total_chunks(file_size);
    total == 0 || index == total - 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_chunks_exact_multiple() {
        assert_eq!(total_chunks(CHUNK_SIZE), 1);
        assert_eq!(total_chunks(3 * CHUNK_SIZE), 3);
    }

    #[test]
    fn total_chunks_rounds_up() {
        assert_eq!(total_chunks(1), 1);
        assert_eq!(total_chunks(CHUNK_SIZE + 1), 2);
        // 25,600 bytes -> 10240 + 10240 + 5120.
        assert_eq!(total_chunks(25_600), 3);
    }

    #[test]
    fn total_chunks_empty_file_is_zero() {
        assert_eq!(total_chunks(0), 0);
    }

    #[test]
    fn chunk_span_interior_and_final() {
        assert_eq!(chunk_span(25_600, 0), (0, 10_240));
        assert_eq!(chunk_span(25_600, 1), (10_240, 20_480));
        assert_eq!(chunk_span(25_600, 2), (20_480, 25_600));
    }

    #[test]
    fn chunk_span_empty_file() {
        assert_eq!(chunk_span(0, 0), (0, 0));
    }

    #[test]
    fn chunk_span_past_end_is_empty() {
        let (from, to) = chunk_span(5, 3);
        assert_eq!(from, to);
    }

    #[test]
    fn final_chunk_detection() {
        assert!(!is_final_chunk(25_600, 0));
        assert!(!is_final_chunk(25_600, 1));
        assert!(is_final_chunk(25_600, 2));
        assert!(is_final_chunk(1, 0));
    }

    #[test]
    fn final_chunk_empty_file_is_index_zero() {
        assert!(is_final_chunk(0, 0));
    }
}
