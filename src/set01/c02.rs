/// Fixed XOR
pub fn xor_bytes(buf_a: &[u8], buf_b: &[u8]) -> Result<Vec<u8>, String> {
    if buf_a.len() != buf_b.len() {
        return Err("Buffers are not of equal length".to_string());
    }
    Ok(buf_a.iter().zip(buf_b.iter()).map(|(a, b)| a ^ b).collect())
}

/// XOR two blocks of the same, fixed size.
pub fn xor_blocks<const N: usize>(block_a: &[u8; N], block_b: &[u8; N]) -> [u8; N] {
    std::array::from_fn(|i| block_a[i] ^ block_b[i])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xor_streams() {
        let a = hex::decode("1c0111001f010100061a024b53535009181c").unwrap();
        let b = hex::decode("686974207468652062756c6c277320657965").unwrap();

        let xored = xor_bytes(&a, &b);

        let expected = hex::decode("746865206b696420646f6e277420706c6179").unwrap();
        assert_eq!(xored, Ok(expected));
    }

    #[test]
    fn xor_bytes_rejects_unequal_lengths() {
        assert!(xor_bytes(b"abc", b"ab").is_err());
    }

    #[test]
    fn xor_blocks_is_self_inverse() {
        let a = *b"YELLOW SUBMARINE";
        let b = [0x5Au8; 16];

        assert_eq!(xor_blocks(&xor_blocks(&a, &b), &b), a);
    }
}
