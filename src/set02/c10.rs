/// Implement CBC mode
use crate::{
    aes::{to_blocks, AesCipher, BLOCK_SIZE},
    pkcs7_pad, pkcs7_unpad, xor_blocks, Result,
};

pub fn encrypt_aes_128_cbc(
    plaintext: &[u8],
    key: &[u8; BLOCK_SIZE],
    iv: &[u8; BLOCK_SIZE],
) -> Vec<u8> {
    let cipher = AesCipher::new(key);
    let padded = pkcs7_pad(plaintext, BLOCK_SIZE as u8);
    let mut ciphertext = Vec::with_capacity(padded.len());

    let mut last_block = *iv;
    for plaintext_block in padded.chunks_exact(BLOCK_SIZE) {
        let mut message_buf = [0u8; BLOCK_SIZE];
        message_buf.copy_from_slice(plaintext_block);
        last_block = cipher.encrypt_block(xor_blocks(&message_buf, &last_block));
        ciphertext.extend_from_slice(&last_block);
    }
    ciphertext
}

/// Decrypt and unpad. An `InvalidPadding` error is exactly the signal a
/// padding oracle leaks.
pub fn decrypt_aes_128_cbc(
    ciphertext: &[u8],
    key: &[u8; BLOCK_SIZE],
    iv: &[u8; BLOCK_SIZE],
) -> Result<Vec<u8>> {
    let mut message = decrypt_aes_128_cbc_unchecked_padding(ciphertext, key, iv)?;
    pkcs7_unpad(&mut message)?;
    Ok(message)
}

/// Decrypt without touching the padding.
pub fn decrypt_aes_128_cbc_unchecked_padding(
    ciphertext: &[u8],
    key: &[u8; BLOCK_SIZE],
    iv: &[u8; BLOCK_SIZE],
) -> Result<Vec<u8>> {
    let cipher = AesCipher::new(key);
    let mut message = Vec::with_capacity(ciphertext.len());

    let mut last_block = *iv;
    for ciphertext_block in to_blocks(ciphertext)? {
        let message_buf = cipher.decrypt_block(ciphertext_block);
        message.extend_from_slice(&xor_blocks(&last_block, &message_buf));
        last_block = ciphertext_block;
    }
    Ok(message)
}
