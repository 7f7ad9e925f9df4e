mod aes;
mod base64;
mod error;
mod mode;
pub mod mt19937;
mod oracle;
mod set01;
mod set02;
mod set03;
mod set04;

pub use self::aes::{decrypt_aes_128_ecb, encrypt_aes_128_ecb, to_blocks, AesCipher, BLOCK_SIZE};
pub use self::base64::{base64_decode, base64_encode};
pub use error::{Error, Result};
pub use mode::Mode;
pub use mt19937::Mt19937;
pub use oracle::{EncryptionOracle, ValidationOracle};
pub use set01::c02::{xor_blocks, xor_bytes};
pub use set01::c08::{max_block_repetitions, score_aes_ecb_likelihood};
pub use set02::c09::pkcs7_pad;
pub use set02::c10::{
    decrypt_aes_128_cbc, decrypt_aes_128_cbc_unchecked_padding, encrypt_aes_128_cbc,
};
pub use set02::c11::{
    detect_block_mode, random_bytes, random_bytes_with_seed, BlockMode, RandomModeOracle,
};
pub use set02::c12::{
    byte_at_a_time_ecb_decrypt, detect_block_size, find_prefix_alignment, EcbSuffixOracle,
    PrefixAlignment,
};
pub use set02::c14::EcbRandomPrefixOracle;
pub use set02::c15::{is_pkcs7_padded, pkcs7_unpad, pkcs7_unpad_unchecked, pkcs7_validate};
pub use set02::c16::{forge_admin_cbc_ciphertext_with_bit_flipping_attack, CbcQueryOracle};
pub use set03::c17::{cbc_padding_oracle_attack, CbcPaddingOracle};
pub use set03::c18::aes_128_ctr;
pub use set03::c22::{break_time_dependent_mt19937_seed, DEFAULT_SEED_WINDOW};
pub use set03::c23::{clone_mt19937_from_output, clone_mt19937_from_outputs, untemper};
pub use set03::c24::{
    is_token_for_recent_time, mt19937_cipher, mt19937_stream_seed,
    recover_seed_from_mt19937_cipher_encrypted_message, ResetTokenOracle, DEFAULT_TOKEN_WINDOW,
};
pub use set04::c25::{edit_aes_ctr_ciphertext, recover_ctr_edit_oracle_plaintext, CtrEditOracle};
pub use set04::c26::{forge_admin_ctr_ciphertext_with_bit_flipping_attack, CtrQueryOracle};
pub use set04::c27::{recover_key_from_iv_eq_key_cbc_oracle, CbcIvEqKeyQueryOracle};
