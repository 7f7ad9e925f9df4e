// Implement CTR, the stream cipher mode
//
// Keystream block i is AES_k(nonce || i), with the block counter encoded as a
// little-endian u64 starting at zero. Encryption and decryption are the same
// operation.
use crate::aes::{AesCipher, BLOCK_SIZE};

pub fn aes_128_ctr(message: &[u8], key: &[u8; BLOCK_SIZE], nonce: &[u8; 8]) -> Vec<u8> {
    let cipher = AesCipher::new(key);
    let mut output = Vec::with_capacity(message.len());
    for (counter, message_block) in message.chunks(BLOCK_SIZE).enumerate() {
        let key_stream = ctr_keystream_block(&cipher, nonce, counter as u64);
        // The final block may be partial; zip stops at the shorter of the two.
        output.extend(message_block.iter().zip(key_stream).map(|(p, k)| p ^ k));
    }
    output
}

pub(crate) fn ctr_keystream_block(
    cipher: &AesCipher,
    nonce: &[u8; 8],
    counter: u64,
) -> [u8; BLOCK_SIZE] {
    let mut ctr_block = [0u8; BLOCK_SIZE];
    ctr_block[..8].copy_from_slice(nonce);
    ctr_block[8..].copy_from_slice(&counter.to_le_bytes());
    cipher.encrypt_block(ctr_block)
}
