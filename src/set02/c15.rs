// PKCS#7 padding validation

use crate::{Error, Result};

/// Strip valid PKCS#7 padding from the end of `bytes`.
///
/// Leaves `bytes` untouched on error.
pub fn pkcs7_unpad(bytes: &mut Vec<u8>) -> Result<()> {
    if bytes.is_empty() {
        return Err(Error::MalformedPadding);
    }
    let n_pad = is_pkcs7_padded(bytes).ok_or(Error::InvalidPadding)?;
    bytes.truncate(bytes.len() - n_pad as usize);
    Ok(())
}

/// Strip as many bytes as the final byte claims, without checking them.
pub fn pkcs7_unpad_unchecked(bytes: &mut Vec<u8>) -> Result<()> {
    let n_pad = *bytes.last().ok_or(Error::MalformedPadding)? as usize;
    if n_pad > bytes.len() {
        return Err(Error::MalformedPadding);
    }
    bytes.truncate(bytes.len() - n_pad);
    Ok(())
}

pub fn pkcs7_validate(bytes: &[u8]) -> bool {
    is_pkcs7_padded(bytes).is_some()
}

/// Return the padding length if `bytes` ends in valid PKCS#7 padding.
pub fn is_pkcs7_padded(bytes: &[u8]) -> Option<u8> {
    let n_pad = *bytes.last()?;
    if n_pad == 0 || n_pad as usize > bytes.len() {
        return None;
    }
    let padded = &bytes[(bytes.len() - n_pad as usize)..];
    if padded.iter().all(|el| *el == n_pad) {
        return Some(n_pad);
    }
    None
}
