/// Base64 decoding of fixture data.
use base64::Engine;

/// Decode standard base64, ignoring any embedded whitespace or line breaks.
pub fn base64_decode(s: &str) -> Result<Vec<u8>, String> {
    let stripped: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    base64::engine::general_purpose::STANDARD
        .decode(stripped)
        .map_err(|e| format!("invalid base64: {e}"))
}

pub fn base64_encode(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}
