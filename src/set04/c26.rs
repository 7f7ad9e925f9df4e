// CTR bitflipping

use crate::{
    aes::BLOCK_SIZE,
    aes_128_ctr,
    set02::c16::{build_query, is_admin_query},
    EncryptionOracle, Error, Result,
};

pub fn forge_admin_ctr_ciphertext_with_bit_flipping_attack<O>(oracle: &O) -> Result<Vec<u8>>
where
    O: EncryptionOracle + ?Sized,
{
    // Discover the length of the query prefix
    let c_0 = oracle.encrypt(b"0");
    let c_1 = oracle.encrypt(b"1");
    let prefix_len = c_0
        .iter()
        .zip(c_1.iter())
        .position(|(a, b)| a != b)
        .ok_or(Error::PrefixNotFound)?;

    // By querying the oracle with some message, M, we can recover the part of
    // the XOR key stream used in the encryption:
    //   C = AES_k(nonce|ctr) ⊕ M
    //     -> AES_k(nonce|ctr) = C ⊕ M
    // With this, we can create a valid ciphertext forgery C_F with equal
    // length to M, decrypting to a plaintext forgery, F, by:
    //   C_F := M ⊕ F ⊕ C
    let plaintext_forgery = b";admin=true";
    let message = b"A".repeat(plaintext_forgery.len());
    let mut ciphertext = oracle.encrypt(&message);

    let flip = message
        .iter()
        .zip(plaintext_forgery.iter())
        .map(|(m, f)| m ^ f);
    ciphertext
        .get_mut(prefix_len..(prefix_len + message.len()))
        .ok_or(Error::PrefixNotFound)?
        .iter_mut()
        .zip(flip)
        .for_each(|(c, f)| *c ^= f);
    Ok(ciphertext)
}

pub struct CtrQueryOracle {
    key: [u8; BLOCK_SIZE],
    nonce: [u8; 8],
}

impl CtrQueryOracle {
    pub fn new(key: [u8; BLOCK_SIZE], nonce: [u8; 8]) -> Self {
        Self { key, nonce }
    }

    pub fn decrypt_and_check_admin(&self, ciphertext: &[u8]) -> bool {
        is_admin_query(&aes_128_ctr(ciphertext, &self.key, &self.nonce))
    }
}

impl EncryptionOracle for CtrQueryOracle {
    fn encrypt(&self, msg: &[u8]) -> Vec<u8> {
        aes_128_ctr(&build_query(msg), &self.key, &self.nonce)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::random_bytes_with_seed;

    #[test]
    fn forge_admin_ctr_ciphertext_with_bit_flipping_attack_forges_admin_query() {
        let key = random_bytes_with_seed::<16>(101);
        let nonce = random_bytes_with_seed::<8>(102);
        let oracle = CtrQueryOracle::new(key, nonce);

        let admin_forgery = forge_admin_ctr_ciphertext_with_bit_flipping_attack(&oracle).unwrap();

        assert!(oracle.decrypt_and_check_admin(&admin_forgery));
    }

    #[test]
    fn oracle_does_not_accept_injected_admin() {
        let key = random_bytes_with_seed::<16>(101);
        let nonce = random_bytes_with_seed::<8>(102);
        let oracle = CtrQueryOracle::new(key, nonce);

        let ciphertext = oracle.encrypt(b";admin=true;");

        assert!(!oracle.decrypt_and_check_admin(&ciphertext));
    }

    #[test]
    fn attack_fails_against_oracle_ignoring_input() {
        let oracle = |_: &[u8]| vec![0u8; 64];

        let result = forge_admin_ctr_ciphertext_with_bit_flipping_attack(&oracle);

        assert_eq!(result, Err(Error::PrefixNotFound));
    }
}
