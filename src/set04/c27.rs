// Recover the key from CBC with IV=Key

use crate::{
    aes::BLOCK_SIZE, decrypt_aes_128_cbc_unchecked_padding, encrypt_aes_128_cbc,
    set02::c16::build_query, EncryptionOracle, Error, Result,
};

/// Recover the key of an oracle that uses its key as the CBC IV.
///
/// Send C_1 || 0 || C_1. The oracle decrypts it to
///    P'_1 = D(C_1) ⊕ IV
///    P'_3 = D(C_1) ⊕ 0
/// so P'_1 ⊕ P'_3 = IV = key. The middle block is garbage, which makes the
/// oracle complain and hand us the plaintext.
pub fn recover_key_from_iv_eq_key_cbc_oracle(
    oracle: &CbcIvEqKeyQueryOracle,
) -> Result<[u8; BLOCK_SIZE]> {
    let message = b"We all live on a yellow submarine, a yellow sub.";
    let ciphertext = oracle.encrypt(message);
    let first_block = ciphertext.get(..BLOCK_SIZE).ok_or(Error::KeyNotFound)?;

    let modified_message = [first_block, [0u8; BLOCK_SIZE].as_slice(), first_block].concat();

    match oracle.decrypt_and_check_ascii(&modified_message) {
        Err(Error::NonAsciiPlaintext { plaintext }) => {
            let mut key = [0u8; BLOCK_SIZE];
            for (k, (p1, p3)) in key
                .iter_mut()
                .zip(plaintext[..BLOCK_SIZE].iter().zip(&plaintext[(2 * BLOCK_SIZE)..]))
            {
                *k = p1 ^ p3;
            }
            Ok(key)
        }
        Err(err) => Err(err),
        // The garbage block happened to decrypt to ASCII.
        Ok(()) => Err(Error::KeyNotFound),
    }
}

pub struct CbcIvEqKeyQueryOracle {
    key: [u8; BLOCK_SIZE],
}

impl CbcIvEqKeyQueryOracle {
    pub fn new(key: [u8; BLOCK_SIZE]) -> Self {
        Self { key }
    }

    /// Decrypt, ignoring padding, and return the plaintext in the error if any
    /// byte of it is not ASCII.
    pub fn decrypt_and_check_ascii(&self, ciphertext: &[u8]) -> Result<()> {
        let plaintext = decrypt_aes_128_cbc_unchecked_padding(ciphertext, &self.key, &self.key)?;
        if plaintext.is_ascii() {
            return Ok(());
        }
        Err(Error::NonAsciiPlaintext { plaintext })
    }
}

impl EncryptionOracle for CbcIvEqKeyQueryOracle {
    fn encrypt(&self, msg: &[u8]) -> Vec<u8> {
        encrypt_aes_128_cbc(&build_query(msg), &self.key, &self.key)
    }
}
