// CBC bitflipping attacks
use crate::{
    aes::BLOCK_SIZE, decrypt_aes_128_cbc, encrypt_aes_128_cbc, xor_blocks, EncryptionOracle,
    Error, Result,
};

const QUERY_PREFIX: &[u8] = b"comment1=cooking%20MCs;userdata=";
const QUERY_SUFFIX: &[u8] = b";comment2=%20like%20a%20pound%20of%20bacon";

/// Wrap user data in the fixed query string, quoting out the metacharacters
/// by dropping them.
pub(crate) fn build_query(userdata: &[u8]) -> Vec<u8> {
    let sanitised = userdata
        .iter()
        .filter(|el| ![b'"', b';'].contains(*el))
        .copied()
        .collect::<Vec<u8>>();
    [QUERY_PREFIX, sanitised.as_slice(), QUERY_SUFFIX].concat()
}

pub(crate) fn is_admin_query(plaintext: &[u8]) -> bool {
    plaintext
        .split(|x| *x == b';')
        .any(|args| args == b"admin=true")
}

/// Index of the first block in which two ciphertexts differ.
fn first_differing_block(a: &[u8], b: &[u8]) -> Option<usize> {
    a.chunks(BLOCK_SIZE)
        .zip(b.chunks(BLOCK_SIZE))
        .position(|(block_a, block_b)| block_a != block_b)
}

/// Forge a ciphertext that the oracle decrypts to a query containing
/// `admin=true`.
///
/// The oracle's prefix is assumed to fill a whole number of blocks.
pub fn forge_admin_cbc_ciphertext_with_bit_flipping_attack<O>(oracle: &O) -> Result<Vec<u8>>
where
    O: EncryptionOracle + ?Sized,
{
    // Our input starts in the first block that changes with it.
    let garbage_block_idx =
        first_differing_block(&oracle.encrypt(b"A"), &oracle.encrypt(b"B"))
            .ok_or(Error::PrefixNotFound)?;

    // The block we flip bits in, followed by the block we forge. The flip
    // block decrypts to garbage, which the query parser does not care about.
    let garbage_block = [b'G'; BLOCK_SIZE];
    let forgery_block = [b'F'; BLOCK_SIZE];
    let mut ciphertext = oracle.encrypt(&[garbage_block, forgery_block].concat());

    // In CBC, the forged block decrypts as
    //    P2 = Dec(C2) ⊕ C1 = F.
    // XORing C1 with (F ⊕ forgery) leaves Dec(C2) ⊕ C1 ⊕ F ⊕ forgery, which
    // is the forgery.
    let forgery = b"AAAA;admin=true;";
    let flip = xor_blocks(&forgery_block, forgery);
    let start = garbage_block_idx * BLOCK_SIZE;
    ciphertext
        .get_mut(start..(start + BLOCK_SIZE))
        .ok_or(Error::PrefixNotFound)?
        .iter_mut()
        .zip(flip)
        .for_each(|(c, f)| *c ^= f);
    Ok(ciphertext)
}

pub struct CbcQueryOracle {
    key: [u8; BLOCK_SIZE],
    iv: [u8; BLOCK_SIZE],
}

impl CbcQueryOracle {
    pub fn new(key: [u8; BLOCK_SIZE], iv: [u8; BLOCK_SIZE]) -> Self {
        Self { key, iv }
    }

    pub fn decrypt_and_check_admin(&self, ciphertext: &[u8]) -> Result<bool> {
        let plaintext = decrypt_aes_128_cbc(ciphertext, &self.key, &self.iv)?;
        Ok(is_admin_query(&plaintext))
    }
}

impl EncryptionOracle for CbcQueryOracle {
    fn encrypt(&self, msg: &[u8]) -> Vec<u8> {
        encrypt_aes_128_cbc(&build_query(msg), &self.key, &self.iv)
    }
}
