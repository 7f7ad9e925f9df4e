// Break "random access read/write" AES CTR

// AES-CTR mode works as follows:
//
//         nonce|counter0                nonce|counter1
//              ↓                             ↓
//     key → < AES >                 key → < AES >
//              ↓                             ↓                 ...
// plaintext →  ⊕               plaintext  →  ⊕
//              ↓                             ↓
//          ciphertext                    ciphertext
//
// Every keystream block depends only on its counter, so an edit at any
// offset only needs the keystream blocks that the new text overlaps.

use crate::{
    aes::{AesCipher, BLOCK_SIZE},
    aes_128_ctr,
    set03::c18::ctr_keystream_block,
    Error, Result,
};

/// Replace the plaintext under `ciphertext[offset..]` with `new_text`.
///
/// The ciphertext grows if the new text runs past its end, but the edit must
/// start inside (or immediately after) the existing ciphertext.
pub fn edit_aes_ctr_ciphertext(
    ciphertext: &mut Vec<u8>,
    key: &[u8; BLOCK_SIZE],
    nonce: &[u8; 8],
    offset: usize,
    new_text: &[u8],
) -> Result<()> {
    if offset > ciphertext.len() {
        return Err(Error::OffsetOutOfRange {
            offset,
            len: ciphertext.len(),
        });
    }
    if new_text.is_empty() {
        return Ok(());
    }

    let end = offset + new_text.len();
    if end > ciphertext.len() {
        ciphertext.resize(end, 0);
    }

    let cipher = AesCipher::new(key);
    let mut counter = offset / BLOCK_SIZE;
    let mut key_stream = ctr_keystream_block(&cipher, nonce, counter as u64);
    for (pos, byte) in (offset..end).zip(new_text) {
        if pos / BLOCK_SIZE != counter {
            counter = pos / BLOCK_SIZE;
            key_stream = ctr_keystream_block(&cipher, nonce, counter as u64);
        }
        ciphertext[pos] = byte ^ key_stream[pos % BLOCK_SIZE];
    }
    Ok(())
}

/// Holds a CTR ciphertext and its key, and exposes an edit API.
pub struct CtrEditOracle {
    key: [u8; BLOCK_SIZE],
    nonce: [u8; 8],
    ciphertext: Vec<u8>,
}

impl CtrEditOracle {
    pub fn new(key: [u8; BLOCK_SIZE], nonce: [u8; 8], plaintext: &[u8]) -> Self {
        Self {
            key,
            nonce,
            ciphertext: aes_128_ctr(plaintext, &key, &nonce),
        }
    }

    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    /// Return the ciphertext as it would be after the edit. The stored
    /// ciphertext is unchanged.
    pub fn edit(&self, offset: usize, new_text: &[u8]) -> Result<Vec<u8>> {
        let mut buf = self.ciphertext.clone();
        edit_aes_ctr_ciphertext(&mut buf, &self.key, &self.nonce, offset, new_text)?;
        Ok(buf)
    }
}

/// Recover the plaintext from an AES CTR edit oracle.
///
/// CTR encryption and decryption are the same operation, so "editing" the
/// ciphertext to contain itself as plaintext decrypts it.
pub fn recover_ctr_edit_oracle_plaintext(oracle: &CtrEditOracle) -> Result<Vec<u8>> {
    oracle.edit(0, oracle.ciphertext())
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    use crate::random_bytes_with_seed;

    const PLAINTEXT: &[u8] = b"I'm back and I'm ringin' the bell \n\
A rockin' on the mike while the fly girls yell \n\
In ecstasy in the back of me \n\
Well that's my DJ Deshay cuttin' all them Z's \n";

    #[rstest]
    #[case(0, 5)]
    #[case(13, 21)]
    #[case(16, 16)]
    #[case(30, 1)]
    #[case(100, 0)]
    fn edit_matches_direct_substitution_in_plaintext(#[case] offset: usize, #[case] len: usize) {
        let key = random_bytes_with_seed::<BLOCK_SIZE>(101);
        let nonce = random_bytes_with_seed::<8>(102);
        let mut ciphertext = aes_128_ctr(PLAINTEXT, &key, &nonce);
        let new_text = b"Z".repeat(len);

        edit_aes_ctr_ciphertext(&mut ciphertext, &key, &nonce, offset, &new_text).unwrap();

        let mut expected = PLAINTEXT.to_vec();
        expected[offset..(offset + len)].copy_from_slice(&new_text);
        assert_eq!(aes_128_ctr(&ciphertext, &key, &nonce), expected);
    }

    #[test]
    fn edit_aes_ctr_ciphertext_updates_ciphertext_in_place() {
        let plaintext = b"\0".repeat(37);
        let key = random_bytes_with_seed::<BLOCK_SIZE>(101);
        let nonce = [0u8; 8];
        let mut ciphertext = aes_128_ctr(&plaintext, &key, &nonce);

        edit_aes_ctr_ciphertext(&mut ciphertext, &key, &nonce, 13, &b"A".repeat(21)).unwrap();

        let new_plaintext = aes_128_ctr(&ciphertext, &key, &nonce);
        assert_eq!(
            new_plaintext,
            [b"\0".repeat(13), b"A".repeat(21), b"\0".repeat(3)].concat()
        );
    }

    #[test]
    fn edit_aes_ctr_ciphertext_extends_past_end() {
        let key = random_bytes_with_seed::<BLOCK_SIZE>(101);
        let nonce = [0u8; 8];
        let mut ciphertext = aes_128_ctr(b"short", &key, &nonce);

        edit_aes_ctr_ciphertext(&mut ciphertext, &key, &nonce, 3, b"rt and sweet").unwrap();

        assert_eq!(aes_128_ctr(&ciphertext, &key, &nonce), b"short and sweet");
    }

    #[test]
    fn edit_aes_ctr_ciphertext_returns_err_for_offset_past_end() {
        let key = random_bytes_with_seed::<BLOCK_SIZE>(101);
        let nonce = [0u8; 8];
        let mut ciphertext = aes_128_ctr(b"short", &key, &nonce);
        let original = ciphertext.clone();

        let result = edit_aes_ctr_ciphertext(&mut ciphertext, &key, &nonce, 6, b"x");

        assert_eq!(result, Err(Error::OffsetOutOfRange { offset: 6, len: 5 }));
        assert_eq!(ciphertext, original);
    }

    #[test]
    fn recover_ctr_edit_oracle_plaintext_recovers_plaintext() {
        let key = random_bytes_with_seed::<BLOCK_SIZE>(103);
        let nonce = random_bytes_with_seed::<8>(104);
        let oracle = CtrEditOracle::new(key, nonce, PLAINTEXT);

        let recovered_plaintext = recover_ctr_edit_oracle_plaintext(&oracle).unwrap();

        assert_eq!(recovered_plaintext, PLAINTEXT);
    }
}
