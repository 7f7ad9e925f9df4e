// Detect AES in ECB mode

use std::collections::HashMap;

/// Return a score for how likely some bytes were encrypted using AES-128 ECB.
///
/// The score will be between 0 and 1, but does not indicate a probability.
/// The score is the ratio of repeated blocks to blocks. As the same plaintext
/// block will result in the same ciphertext when using ECB, you are likely to
/// get the same fraction of repeated blocks as you would in English. This
/// fraction will almost certainly be higher than some random string of bytes.
pub fn score_aes_ecb_likelihood(bytes: &[u8]) -> f64 {
    if bytes.len() < 16 {
        return 0.;
    }
    let n_blocks = bytes.len() / 16;
    let n_distinct = block_counts(bytes, 16).len();
    (n_blocks - n_distinct) as f64 / n_blocks as f64
}

/// The number of times the most common block appears in `bytes`.
///
/// Any trailing partial block is ignored.
pub fn max_block_repetitions(bytes: &[u8], block_size: usize) -> usize {
    block_counts(bytes, block_size)
        .into_values()
        .max()
        .unwrap_or(0)
}

fn block_counts(bytes: &[u8], block_size: usize) -> HashMap<&[u8], usize> {
    let mut counts = HashMap::new();
    for block in bytes.chunks_exact(block_size) {
        *counts.entry(block).or_insert(0) += 1;
    }
    counts
}
