use std::fmt::Display;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The oracle's ciphertexts do not show the repeated blocks ECB produces.
    ModeNotEcb,
    /// The trailing bytes of a decryption are not valid PKCS#7 padding.
    InvalidPadding,
    /// There were no bytes to unpad, or the pad length exceeds the buffer.
    MalformedPadding,
    /// A byte-at-a-time attack finished without recovering a single byte.
    NoMatchFound,
    /// No candidate byte produced valid padding in a padding oracle attack.
    NoValidPaddingFound { block: usize, byte: usize },
    /// An exhaustive seed or key search ran out of candidates.
    KeyNotFound,
    BlockSizeNotDetected,
    PrefixNotFound,
    InvalidCiphertextLength { len: usize, block_size: usize },
    OffsetOutOfRange { offset: usize, len: usize },
    /// A decryption contained bytes outside the ASCII range.
    NonAsciiPlaintext { plaintext: Vec<u8> },
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::ModeNotEcb => write!(f, "ciphertext not encrypted using ECB"),
            Error::InvalidPadding => write!(f, "invalid pkcs7 padding"),
            Error::MalformedPadding => write!(f, "malformed pkcs7 padding"),
            Error::NoMatchFound => write!(f, "no plaintext bytes could be matched"),
            Error::NoValidPaddingFound { block, byte } => write!(
                f,
                "could not find plaintext byte {byte} for block {block}"
            ),
            Error::KeyNotFound => write!(f, "key not found in search space"),
            Error::BlockSizeNotDetected => write!(f, "could not detect block size"),
            Error::PrefixNotFound => write!(f, "could not find length of oracle prefix"),
            Error::InvalidCiphertextLength { len, block_size } => write!(
                f,
                "ciphertext length {len} is not a multiple of the block size {block_size}"
            ),
            Error::OffsetOutOfRange { offset, len } => {
                write!(f, "offset {offset} is past the end of a {len} byte buffer")
            }
            Error::NonAsciiPlaintext { plaintext } => write!(
                f,
                "plaintext contains non-ascii bytes: {}",
                String::from_utf8_lossy(plaintext)
            ),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_failure_position() {
        let err = Error::NoValidPaddingFound { block: 2, byte: 15 };

        assert_eq!(
            err.to_string(),
            "could not find plaintext byte 15 for block 2"
        );
    }
}
