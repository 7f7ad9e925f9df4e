// Capabilities the attacks are given instead of keys.
//
// The secret state (key, IV, prefix, suffix) lives in private fields of the
// implementing type. Attacks only ever call these methods.

/// Encrypt attacker-chosen plaintext under some fixed, hidden parameters.
pub trait EncryptionOracle {
    fn encrypt(&self, plaintext: &[u8]) -> Vec<u8>;
}

/// Report whether a CBC ciphertext decrypts to validly padded plaintext.
pub trait ValidationOracle {
    fn padding_valid(&self, ciphertext: &[u8], iv: &[u8; 16]) -> bool;
}

impl<F> EncryptionOracle for F
where
    F: Fn(&[u8]) -> Vec<u8>,
{
    fn encrypt(&self, plaintext: &[u8]) -> Vec<u8> {
        self(plaintext)
    }
}

impl<F> ValidationOracle for F
where
    F: Fn(&[u8], &[u8; 16]) -> bool,
{
    fn padding_valid(&self, ciphertext: &[u8], iv: &[u8; 16]) -> bool {
        self(ciphertext, iv)
    }
}
