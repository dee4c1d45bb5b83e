//! Strict-charset base64url codec used for every key carried in a URI.

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};

use crate::error::{Base64UrlError, ParseError, ParseErrorKind};

/// URL-safe alphabet, no padding on encode, padding optional and trailing
/// bits tolerated on decode.
const ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Encodes a UTF-8 string as unpadded base64url.
///
/// # Examples
///
/// ```
/// use arc82::{decode_base64url, encode_base64url};
///
/// let encoded = encode_base64url("global_key");
/// assert_eq!(encoded, "Z2xvYmFsX2tleQ");
/// assert_eq!(decode_base64url(&encoded).unwrap(), "global_key");
/// ```
#[must_use]
pub fn encode_base64url(input: &str) -> String {
    encode_base64url_bytes(input.as_bytes())
}

/// Encodes raw bytes as unpadded base64url.
#[must_use]
pub fn encode_base64url_bytes(input: &[u8]) -> String {
    ENGINE.encode(input)
}

/// Decodes base64url text into a UTF-8 string.
///
/// # Errors
///
/// Returns `ParseError` if the input has characters outside
/// `[A-Za-z0-9-_]`, has an impossible length, or decodes to bytes that
/// are not UTF-8.
pub fn decode_base64url(input: &str) -> Result<String, ParseError> {
    let bytes = decode_base64url_bytes(input)?;
    String::from_utf8(bytes).map_err(|_| {
        ParseError::new(input, ParseErrorKind::InvalidBase64Url(Base64UrlError::NotUtf8))
    })
}

/// Decodes base64url text into raw bytes.
///
/// Box keys are arbitrary byte strings, so the executors use this variant.
///
/// # Errors
///
/// Returns `ParseError` if the charset or length is invalid.
pub fn decode_base64url_bytes(input: &str) -> Result<Vec<u8>, ParseError> {
    decode_raw(input).map_err(|e| ParseError::new(input, ParseErrorKind::InvalidBase64Url(e)))
}

/// Checks the wire charset without decoding.
///
/// # Errors
///
/// Returns the first offending character.
pub(crate) fn validate_charset(input: &str) -> Result<(), Base64UrlError> {
    match input.chars().enumerate().find(|&(_, c)| !is_valid_char(c)) {
        Some((position, char)) => Err(Base64UrlError::InvalidChar { char, position }),
        None => Ok(()),
    }
}

/// Full validation of a transported key: charset plus decodability.
pub(crate) fn validate_key(input: &str) -> Result<(), Base64UrlError> {
    decode_raw(input).map(|_| ())
}

/// Returns true if the character belongs to the base64url alphabet.
#[must_use]
pub const fn is_valid_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_')
}

fn decode_raw(input: &str) -> Result<Vec<u8>, Base64UrlError> {
    validate_charset(input)?;
    if input.len() % 4 == 1 {
        return Err(Base64UrlError::InvalidLength {
            length: input.len(),
        });
    }
    // Charset and length are checked above, so the engine cannot reject the input.
    ENGINE.decode(input).map_err(|_| Base64UrlError::InvalidLength {
        length: input.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_samples() {
        for s in ["", "Hello World", "🙂 unicode", "ab", "abcd", "a string whose byte length % 3 != 0"] {
            assert_eq!(decode_base64url(&encode_base64url(s)).unwrap(), s);
        }
    }

    #[test]
    fn encode_uses_url_alphabet_without_padding() {
        // "??>" encodes to "Pz8+" in standard base64
        assert_eq!(encode_base64url("??>"), "Pz8-");
        assert_eq!(encode_base64url_bytes(&[0xff, 0xfe]), "__4");
        assert!(!encode_base64url("a").contains('='));
    }

    #[test]
    fn decode_rejects_standard_alphabet() {
        let err = decode_base64url("Pz8+").unwrap_err();
        assert!(matches!(
            err.kind,
            ParseErrorKind::InvalidBase64Url(Base64UrlError::InvalidChar { char: '+', position: 3 })
        ));
    }

    #[test]
    fn decode_rejects_padding_on_the_wire() {
        assert!(decode_base64url("YQ==").is_err());
    }

    #[test]
    fn decode_rejects_dangling_sextet() {
        let err = decode_base64url("abcde").unwrap_err();
        assert!(matches!(
            err.kind,
            ParseErrorKind::InvalidBase64Url(Base64UrlError::InvalidLength { length: 5 })
        ));
    }

    #[test]
    fn decode_rejects_non_utf8() {
        let err = decode_base64url("__4").unwrap_err();
        assert!(matches!(
            err.kind,
            ParseErrorKind::InvalidBase64Url(Base64UrlError::NotUtf8)
        ));
        assert_eq!(decode_base64url_bytes("__4").unwrap(), vec![0xff, 0xfe]);
    }

    #[test]
    fn empty_input_decodes_to_empty() {
        assert_eq!(decode_base64url("").unwrap(), "");
    }
}
