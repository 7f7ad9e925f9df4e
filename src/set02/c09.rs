/// Implement PKCS#7 padding

/// Pad `bytes` up to the next multiple of `block_size`.
///
/// A message that is already block aligned gets a whole block of padding,
/// so the final byte always says how many bytes to strip.
///
/// Panics if `block_size` is zero.
pub fn pkcs7_pad(bytes: &[u8], block_size: u8) -> Vec<u8> {
    let n_pad = block_size - (bytes.len() % block_size as usize) as u8;
    let mut out = Vec::with_capacity(bytes.len() + n_pad as usize);
    out.extend_from_slice(bytes);
    out.resize(bytes.len() + n_pad as usize, n_pad);
    out
}
